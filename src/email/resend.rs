use async_trait::async_trait;
use serde::Deserialize;

use super::{Mailer, OutboundEmail};

/// Sends through the Resend HTTP API.
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    name: Option<String>,
    message: Option<String>,
}

impl ResendMailer {
    pub fn new(api_key: &str, api_url: &str) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint: format!("{}/emails", api_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<String, String> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| format!("Email request failed: {e}"))?;

        let status = resp.status();
        if status.is_success() {
            let sent: SendResponse = resp
                .json()
                .await
                .map_err(|e| format!("Unexpected provider response: {e}"))?;
            return Ok(sent.id);
        }

        let detail = match resp.json::<ErrorResponse>().await {
            Ok(ErrorResponse {
                name,
                message: Some(message),
            }) => match name {
                Some(name) => format!("{name}: {message}"),
                None => message,
            },
            _ => "no error detail".to_string(),
        };
        Err(format!("Email provider returned {}: {detail}", status.as_u16()))
    }
}
