pub mod resend;
pub mod smtp;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::MailProvider;

/// A fully rendered message, ready for any provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Email delivery collaborator. One call sends one message, once.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Returns the provider's message id.
    async fn send(&self, email: &OutboundEmail) -> Result<String, String>;
}

/// Build the process-wide mailer for the configured provider.
pub fn build_mailer(provider: &MailProvider) -> Result<Arc<dyn Mailer>, String> {
    match provider {
        MailProvider::Resend { api_key, api_url } => {
            tracing::info!("Email provider: Resend");
            Ok(Arc::new(resend::ResendMailer::new(api_key, api_url)?))
        }
        MailProvider::Smtp(smtp) => {
            tracing::info!("Email provider: SMTP ({})", smtp.host);
            Ok(Arc::new(smtp::SmtpMailer::new(smtp)?))
        }
    }
}
