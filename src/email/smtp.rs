use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

use super::{Mailer, OutboundEmail};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("SMTP error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<String, String> {
        let message = build_message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        Ok(response.message().collect::<Vec<_>>().join(" "))
    }
}

/// Build the MIME message. An unparseable reply-to is dropped rather than
/// failing the send: the submitter's address only has to pass a shape check,
/// and the admin notification must still go out.
pub fn build_message(email: &OutboundEmail) -> Result<Message, String> {
    let mut builder = Message::builder()
        .from(parse_mailbox(&email.from, "from")?)
        .to(parse_mailbox(&email.to, "to")?)
        .subject(email.subject.as_str());

    if let Some(reply_to) = &email.reply_to {
        match parse_mailbox(reply_to, "reply-to") {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => tracing::warn!("{e}, sending without Reply-To"),
        }
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))
        .map_err(|e| format!("Failed to build email: {e}"))
}

fn parse_mailbox(address: &str, role: &str) -> Result<Mailbox, String> {
    address
        .parse()
        .map_err(|e| format!("Invalid {role} address '{address}': {e}"))
}
