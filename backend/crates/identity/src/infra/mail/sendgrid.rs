//! SendGrid Transport
//!
//! Sends mail through the SendGrid v3 HTTP API.

use serde_json::json;

use super::{MailBody, MailConfig, Mailer};

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Mailer backed by the SendGrid HTTP API
pub struct SendGridMailer {
    client: reqwest::Client,
    config: MailConfig,
    api_key: String,
}

impl SendGridMailer {
    pub fn new(config: MailConfig, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            api_key: api_key.into(),
        }
    }

    fn payload(&self, mail: &MailBody) -> serde_json::Value {
        json!({
            "personalizations": [{ "to": [{ "email": mail.recipient }] }],
            "from": {
                "email": self.config.from_email,
                "name": self.config.from_name,
            },
            "subject": mail.subject,
            "content": [{ "type": "text/plain", "value": mail.body }],
        })
    }
}

impl Mailer for SendGridMailer {
    async fn send(&self, mail: &MailBody) -> bool {
        let response = self
            .client
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&self.payload(mail))
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                tracing::info!(recipient = %mail.recipient, "Mail delivered");
                true
            }
            Ok(response) => {
                tracing::error!(
                    status = %response.status(),
                    recipient = %mail.recipient,
                    "SendGrid rejected mail"
                );
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "SendGrid request failed");
                false
            }
        }
    }
}
