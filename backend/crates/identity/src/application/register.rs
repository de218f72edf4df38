//! Register Use Case
//!
//! Creates a new account through the identity factory, records the
//! event, and sends a welcome mail. Audit and mail are best-effort;
//! only the account write itself can fail the request.

use std::sync::Arc;

use kernel::error::app_error::{AppError, AppResult};
use kernel::id::UserId;
use kernel::response::Response;
use serde::Serialize;

use crate::application::config::IdentityConfig;
use crate::domain::entity::activity::ActivityRecord;
use crate::domain::entity::user::{Registration, User};
use crate::domain::repository::{ActivityRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::infra::mail::{MailBody, Mailer};

/// Register output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub user_id: UserId,
    pub first_name: String,
    pub other_names: String,
    pub email: Email,
}

/// Register use case
pub struct RegisterUseCase<U, A, M>
where
    U: UserRepository,
    A: ActivityRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    activity_repo: Arc<A>,
    mailer: Arc<M>,
    config: Arc<IdentityConfig>,
}

impl<U, A, M> RegisterUseCase<U, A, M>
where
    U: UserRepository,
    A: ActivityRepository,
    M: Mailer,
{
    pub fn new(
        user_repo: Arc<U>,
        activity_repo: Arc<A>,
        mailer: Arc<M>,
        config: Arc<IdentityConfig>,
    ) -> Self {
        Self {
            user_repo,
            activity_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: Registration) -> AppResult<Response<RegisteredUser>> {
        let user = User::register(input, &self.config.password_policy, &self.config.kdf_cost)?;

        if self.user_repo.exists_by_email(&user.email).await? {
            return Err(AppError::response(
                "An account with this email address already exists",
            ));
        }

        self.user_repo.create(&user).await?;

        // The account exists; a failed audit write must not undo that
        let audit = ActivityRecord::account_created(user.user_id, user.email.as_str());
        if let Err(e) = self.activity_repo.create(&audit).await {
            tracing::error!(error = %e, user_id = %user.user_id, "Audit write failed after registration");
        }

        let welcome = MailBody {
            recipient: user.email.as_str().to_string(),
            subject: "Welcome to Planner".to_string(),
            body: format!(
                "Hi {},\n\nYour account has been created. You can now log in with your email address.",
                user.first_name
            ),
        };
        if !self.mailer.send(&welcome).await {
            tracing::warn!(user_id = %user.user_id, "Welcome mail was not delivered");
        }

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(Response::created(
            "User created successfully",
            RegisteredUser {
                user_id: user.user_id,
                first_name: user.first_name,
                other_names: user.other_names,
                email: user.email,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kernel::error::kind::ErrorKind;

    use crate::domain::entity::aggregate::{UserAggregate, UserQuery};
    use crate::domain::repository::LoginCredentials;

    #[derive(Default)]
    struct MemoryStore {
        users: Mutex<HashMap<String, User>>,
        activities: Mutex<Vec<ActivityRecord>>,
        fail_activity_writes: bool,
    }

    impl UserRepository for MemoryStore {
        async fn create(&self, user: &User) -> AppResult<()> {
            self.users
                .lock()
                .unwrap()
                .insert(user.email.as_str().to_string(), user.clone());
            Ok(())
        }

        async fn find_login_credentials(
            &self,
            email: &Email,
        ) -> AppResult<Option<LoginCredentials>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .get(email.as_str())
                .map(|u| LoginCredentials {
                    user_id: u.user_id,
                    salt: u.salt.clone(),
                    password_hash: u.password_hash.clone(),
                }))
        }

        async fn find_by_id(
            &self,
            _user_id: &UserId,
            _query: UserQuery,
        ) -> AppResult<Option<UserAggregate>> {
            Ok(None)
        }

        async fn exists_by_email(&self, email: &Email) -> AppResult<bool> {
            Ok(self.users.lock().unwrap().contains_key(email.as_str()))
        }
    }

    impl ActivityRepository for MemoryStore {
        async fn create(&self, record: &ActivityRecord) -> AppResult<()> {
            if self.fail_activity_writes {
                return Err(AppError::database("activity insert failed"));
            }
            self.activities.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    /// Mailer that records delivery attempts and answers as told
    struct StubMailer {
        accept: bool,
        sent: AtomicUsize,
    }

    impl StubMailer {
        fn new(accept: bool) -> Self {
            Self {
                accept,
                sent: AtomicUsize::new(0),
            }
        }
    }

    impl Mailer for StubMailer {
        async fn send(&self, _mail: &MailBody) -> bool {
            self.sent.fetch_add(1, Ordering::SeqCst);
            self.accept
        }
    }

    fn registration() -> Registration {
        Registration {
            id: None,
            first_name: "Ada".to_string(),
            other_names: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            password: "correct horse battery".to_string(),
        }
    }

    fn use_case(
        store: Arc<MemoryStore>,
        mailer: Arc<StubMailer>,
    ) -> RegisterUseCase<MemoryStore, MemoryStore, StubMailer> {
        RegisterUseCase::new(
            store.clone(),
            store,
            mailer,
            Arc::new(IdentityConfig::insecure_fast()),
        )
    }

    #[tokio::test]
    async fn test_successful_registration() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(StubMailer::new(true));

        let response = use_case(store.clone(), mailer.clone())
            .execute(registration())
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(response.message, "User created successfully");
        let created = response.item.unwrap();
        assert_eq!(created.email.as_str(), "ada@example.com");

        assert!(store.users.lock().unwrap().contains_key("ada@example.com"));
        let activities = store.activities.lock().unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].title, "Account created");
        assert_eq!(mailer.sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_before_any_write() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(StubMailer::new(true));
        let use_case = use_case(store.clone(), mailer.clone());

        use_case.execute(registration()).await.unwrap();
        let err = use_case.execute(registration()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Response);
        assert_eq!(store.users.lock().unwrap().len(), 1);
        assert_eq!(store.activities.lock().unwrap().len(), 1);
        assert_eq!(mailer.sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_sends_nothing() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(StubMailer::new(true));

        let err = use_case(store.clone(), mailer.clone())
            .execute(Registration {
                password: "short".to_string(),
                ..registration()
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(store.users.lock().unwrap().is_empty());
        assert_eq!(mailer.sent.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_undo_the_account() {
        let store = Arc::new(MemoryStore {
            fail_activity_writes: true,
            ..Default::default()
        });
        let mailer = Arc::new(StubMailer::new(true));

        let response = use_case(store.clone(), mailer)
            .execute(registration())
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        assert!(store.users.lock().unwrap().contains_key("ada@example.com"));
    }

    #[tokio::test]
    async fn test_mail_refusal_does_not_fail_registration() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(StubMailer::new(false));

        let response = use_case(store, mailer.clone())
            .execute(registration())
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(mailer.sent.load(Ordering::SeqCst), 1);
    }
}
