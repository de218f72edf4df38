//! Infrastructure Layer
//!
//! Concrete adapters: PostgreSQL persistence and mail transports.

pub mod mail;
pub mod postgres;

pub use mail::{MailBody, MailConfig, Mailer, SendGridMailer, SmtpMailer};
pub use postgres::PgPlannerRepository;
