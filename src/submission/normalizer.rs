use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::error::SubmissionError;
use crate::models::{EXPECTED_FORM_NAME, SubmissionRecord};

use super::fields;
use super::honeypot;

/// The payload layouts the webhook is known to receive, tried in this order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayloadShape<'a> {
    /// `{ payload: { data: {...}, form_name, created_at } }`, the forms relay format.
    Relay {
        data: &'a Value,
        envelope: &'a Value,
    },
    /// `{ data: {...}, form_name | form-name, created_at }`
    Flat {
        data: &'a Value,
        envelope: &'a Value,
    },
    /// Fields at the root: `{ navn | name, email, ... }`
    Direct { root: &'a Value },
}

impl<'a> PayloadShape<'a> {
    pub fn detect(raw: &'a Value) -> Result<Self, SubmissionError> {
        if let Some(envelope) = raw.get("payload") {
            if let Some(data) = envelope.get("data").filter(|d| d.is_object()) {
                return Ok(PayloadShape::Relay { data, envelope });
            }
        }

        if let Some(data) = raw.get("data").filter(|d| d.is_object()) {
            return Ok(PayloadShape::Flat {
                data,
                envelope: raw,
            });
        }

        let has_direct_fields = fields::NAME
            .iter()
            .chain(fields::EMAIL)
            .any(|key| !fields::sanitize(raw.get(*key)).is_empty());
        if raw.is_object() && has_direct_fields {
            return Ok(PayloadShape::Direct { root: raw });
        }

        Err(SubmissionError::MalformedPayload(
            "Invalid payload structure - no form data found".to_string(),
        ))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PayloadShape::Relay { .. } => "relay",
            PayloadShape::Flat { .. } => "flat",
            PayloadShape::Direct { .. } => "direct",
        }
    }

    fn data(&self) -> &'a Value {
        match *self {
            PayloadShape::Relay { data, .. } | PayloadShape::Flat { data, .. } => data,
            PayloadShape::Direct { root } => root,
        }
    }

    fn form_name(&self) -> String {
        let source = match *self {
            PayloadShape::Relay { envelope, .. } => fields::sanitize(envelope.get("form_name")),
            PayloadShape::Flat { envelope, .. } => fields::pick(envelope, fields::FORM_NAME),
            PayloadShape::Direct { root } => fields::pick(root, &["form-name", "form_name"]),
        };
        if source.is_empty() {
            EXPECTED_FORM_NAME.to_string()
        } else {
            source
        }
    }

    fn created_at(&self) -> Option<String> {
        let envelope = match *self {
            PayloadShape::Relay { envelope, .. } | PayloadShape::Flat { envelope, .. } => envelope,
            PayloadShape::Direct { root } => root,
        };
        fields::optional(fields::sanitize(envelope.get("created_at")))
    }
}

/// Turn a decoded webhook body into a canonical record.
///
/// Fails with `MalformedPayload` when no known shape matches and with
/// `SpamDetected` when the honeypot is filled. Form name and email are
/// left for the caller to judge.
pub fn normalize(raw: &Value) -> Result<SubmissionRecord, SubmissionError> {
    let shape = PayloadShape::detect(raw)?;
    let data = shape.data();

    if honeypot::is_spam(data) {
        return Err(SubmissionError::SpamDetected);
    }

    tracing::debug!(shape = shape.name(), "Normalizing submission");

    Ok(SubmissionRecord {
        form_name: shape.form_name(),
        name: fields::pick(data, fields::NAME),
        email: fields::normalize_email(&fields::pick(data, fields::EMAIL)),
        website: fields::optional(fields::pick(data, fields::WEBSITE)),
        service: fields::pick(data, fields::SERVICE),
        budget: fields::pick(data, fields::BUDGET),
        message: fields::optional(fields::pick(data, fields::MESSAGE)),
        timestamp: shape
            .created_at()
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    })
}
