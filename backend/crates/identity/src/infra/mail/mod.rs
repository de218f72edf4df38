//! Mail Delivery
//!
//! Outbound mail transports. Delivery is best-effort: `send` reports
//! whether the transport accepted the message and never returns an
//! error, so a mail outage cannot fail the use case that triggered it.

pub mod sendgrid;
pub mod smtp;

pub use sendgrid::SendGridMailer;
pub use smtp::{SmtpConfig, SmtpMailer};

/// A plain-text message ready for delivery
#[derive(Debug, Clone)]
pub struct MailBody {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Sender identity shared by all transports
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub from_email: String,
    pub from_name: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_email: "noreply@localhost".to_string(),
            from_name: "Planner".to_string(),
        }
    }
}

/// Mail transport trait
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Deliver one message; returns whether the transport accepted it
    async fn send(&self, mail: &MailBody) -> bool;
}
