use serde_json::Value;

use crate::error::SubmissionError;
use crate::models::DeliveryOutcome;

use super::dispatcher::Dispatcher;
use super::{fields, normalizer};

/// How a well-formed submission was handled.
#[derive(Debug)]
pub enum Handled {
    /// Addressed to another form; nothing was sent or stored.
    Ignored { form_name: String },
    Delivered(DeliveryOutcome),
}

/// Normalize, screen and deliver one decoded request body.
pub async fn run(dispatcher: &Dispatcher, raw: &Value) -> Result<Handled, SubmissionError> {
    let record = normalizer::normalize(raw).inspect_err(|e| match e {
        SubmissionError::SpamDetected => tracing::info!("Honeypot field filled, ignoring submission"),
        other => tracing::warn!("Could not normalize submission: {other}"),
    })?;

    if !record.is_expected_form() {
        tracing::warn!(
            "Received submission for form \"{}\", ignoring",
            record.form_name
        );
        return Ok(Handled::Ignored {
            form_name: record.form_name,
        });
    }

    if !fields::is_valid_email(&record.email) {
        tracing::warn!("Invalid email: {}", record.email);
        return Err(SubmissionError::InvalidEmail(record.email));
    }

    let outcome = dispatcher.dispatch(&record).await?;
    Ok(Handled::Delivered(outcome))
}
