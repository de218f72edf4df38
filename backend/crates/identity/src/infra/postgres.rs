//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use kernel::error::app_error::AppResult;
use kernel::id::UserId;

use crate::domain::entity::activity::ActivityRecord;
use crate::domain::entity::aggregate::{Profile, UserAggregate, UserDetails, UserQuery};
use crate::domain::entity::session::AppSession;
use crate::domain::entity::user::User;
use crate::domain::repository::{
    ActivityRepository, LoginCredentials, SessionRepository, UserRepository,
};
use crate::domain::value_object::email::Email;

/// PostgreSQL-backed identity repository
#[derive(Clone)]
pub struct PgPlannerRepository {
    pool: PgPool,
}

impl PgPlannerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions
    pub async fn cleanup_expired(&self) -> AppResult<u64> {
        let deleted = sqlx::query("DELETE FROM app_sessions WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgPlannerRepository {
    async fn create(&self, user: &User) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                first_name,
                other_names,
                email,
                phone,
                password,
                salt,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.first_name)
        .bind(&user.other_names)
        .bind(user.email.as_str())
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(&user.salt)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await?;

        // Every account starts with a profile; 2FA is opt-in
        sqlx::query(
            "INSERT INTO user_profiles (user_id, two_fa, created_at) VALUES ($1, FALSE, $2)",
        )
        .bind(user.user_id.as_uuid())
        .bind(user.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn find_login_credentials(&self, email: &Email) -> AppResult<Option<LoginCredentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT user_id, salt, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CredentialsRow::into_credentials))
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        query: UserQuery,
    ) -> AppResult<Option<UserAggregate>> {
        let row = sqlx::query_as::<_, UserAggregateRow>(
            r#"
            SELECT
                u.user_id,
                u.first_name,
                u.other_names,
                u.email,
                u.phone,
                u.created_at,
                p.two_fa
            FROM users u
            LEFT JOIN user_profiles p ON p.user_id = u.user_id
            WHERE u.user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_aggregate(query)))
    }

    async fn exists_by_email(&self, email: &Email) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

// ============================================================================
// Activity Repository Implementation
// ============================================================================

impl ActivityRepository for PgPlannerRepository {
    async fn create(&self, record: &ActivityRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO activities (
                activity_id,
                user_id,
                title,
                description,
                metadata,
                hash,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.activity_id.as_uuid())
        .bind(record.user_id.as_uuid())
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.metadata.to_string())
        .bind(&record.hash)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgPlannerRepository {
    async fn create(&self, session: &AppSession) -> AppResult<String> {
        let platform_details = serde_json::to_string(&session.platform_details)?;

        let session_id = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO app_sessions (
                session_id,
                user_id,
                platform,
                platform_details,
                expires_at,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING session_id
            "#,
        )
        .bind(&session.session_id)
        .bind(session.user_id.as_uuid())
        .bind(&session.platform)
        .bind(platform_details)
        .bind(session.expires_at)
        .bind(session.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(session_id)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    user_id: Uuid,
    salt: String,
    password: String,
}

impl CredentialsRow {
    fn into_credentials(self) -> LoginCredentials {
        LoginCredentials {
            user_id: UserId::from_uuid(self.user_id),
            salt: self.salt,
            password_hash: self.password,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserAggregateRow {
    user_id: Uuid,
    first_name: String,
    other_names: String,
    email: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    two_fa: Option<bool>,
}

impl UserAggregateRow {
    fn into_aggregate(self, query: UserQuery) -> UserAggregate {
        let details = query.details.then(|| UserDetails {
            first_name: self.first_name,
            other_names: self.other_names,
            email: Email::from_db(self.email),
            phone: self.phone,
            created_at: self.created_at,
        });

        let profile = query.profile.then(|| Profile {
            two_fa: self.two_fa.unwrap_or(false),
        });

        UserAggregate {
            user_id: UserId::from_uuid(self.user_id),
            details,
            profile,
        }
    }
}
