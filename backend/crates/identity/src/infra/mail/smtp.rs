//! SMTP Transport
//!
//! Sends mail through a relay with lettre. The blocking transport runs
//! on tokio's blocking pool so delivery never stalls a request worker.

use std::time::Duration;

use lettre::message::header;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::{MailBody, MailConfig, Mailer};

/// SMTP relay settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Use STARTTLS instead of implicit TLS
    pub starttls: bool,
    pub timeout_secs: u64,
}

/// Mailer backed by an SMTP relay
pub struct SmtpMailer {
    config: MailConfig,
    smtp: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: MailConfig, smtp: SmtpConfig) -> Self {
        Self { config, smtp }
    }

    fn transport(&self) -> Result<SmtpTransport, lettre::transport::smtp::Error> {
        let credentials =
            Credentials::new(self.smtp.username.clone(), self.smtp.password.clone());

        let builder = if self.smtp.starttls {
            SmtpTransport::starttls_relay(&self.smtp.host)
        } else {
            SmtpTransport::relay(&self.smtp.host)
        }?;

        Ok(builder
            .port(self.smtp.port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(self.smtp.timeout_secs)))
            .build())
    }

    fn message(&self, mail: &MailBody) -> Option<Message> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .ok()?;
        let to = mail.recipient.parse().ok()?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&mail.subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .ok()
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, mail: &MailBody) -> bool {
        let Some(message) = self.message(mail) else {
            tracing::error!(recipient = %mail.recipient, "Mail message could not be built");
            return false;
        };

        let transport = match self.transport() {
            Ok(transport) => transport,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create SMTP transport");
                return false;
            }
        };

        let result = tokio::task::spawn_blocking(move || transport.send(&message)).await;

        match result {
            Ok(Ok(_)) => {
                tracing::info!(recipient = %mail.recipient, subject = %mail.subject, "Mail delivered");
                true
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, recipient = %mail.recipient, "SMTP delivery failed");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Mail delivery task failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> SmtpMailer {
        SmtpMailer::new(
            MailConfig {
                from_email: "noreply@example.com".to_string(),
                from_name: "Planner".to_string(),
            },
            SmtpConfig {
                host: "smtp.example.com".to_string(),
                port: 587,
                username: "user".to_string(),
                password: "secret".to_string(),
                starttls: true,
                timeout_secs: 30,
            },
        )
    }

    #[test]
    fn test_message_builds_for_valid_recipient() {
        let mail = MailBody {
            recipient: "ada@example.com".to_string(),
            subject: "Welcome".to_string(),
            body: "Hello".to_string(),
        };
        assert!(mailer().message(&mail).is_some());
    }

    #[test]
    fn test_message_rejects_garbage_recipient() {
        let mail = MailBody {
            recipient: "not an address".to_string(),
            subject: "Welcome".to_string(),
            body: "Hello".to_string(),
        };
        assert!(mailer().message(&mail).is_none());
    }
}
