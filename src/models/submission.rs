use chrono::{DateTime, Utc};
use serde::Serialize;

/// The only form this service delivers.
pub const EXPECTED_FORM_NAME: &str = "kontakt";

/// Canonical contact-form submission, built once per request by the normalizer.
///
/// Every string is already trimmed and capped; `email` is lower-cased.
/// Optional fields are `None` when the submitter left them blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub form_name: String,
    pub name: String,
    pub email: String,
    pub website: Option<String>,
    pub service: String,
    pub budget: String,
    pub message: Option<String>,
    pub timestamp: String,
}

impl SubmissionRecord {
    pub fn is_expected_form(&self) -> bool {
        self.form_name == EXPECTED_FORM_NAME
    }

    /// Parsed submission time. Falls back to now when the upstream value
    /// is not RFC 3339.
    pub fn submitted_at(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now())
    }
}
