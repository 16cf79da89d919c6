use serde::Serialize;
use serde_json::Value;

use super::fields;

pub const CONSENT: &[&str] = &["samtykke", "consent"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Validate a contact form posted straight from the site.
///
/// Mirrors the checks the page runs before submitting: required fields,
/// the consent checkbox and the email shape. All problems are reported,
/// not just the first.
pub fn validate(data: &Value) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    let required = [
        ("name", fields::NAME),
        ("email", fields::EMAIL),
        ("service", fields::SERVICE),
        ("budget", fields::BUDGET),
    ];
    for (field, aliases) in required {
        if fields::pick(data, aliases).is_empty() {
            errors.push(FieldError {
                field,
                message: "This field is required",
            });
        }
    }

    if !consent_given(data) {
        errors.push(FieldError {
            field: "consent",
            message: "Consent is required",
        });
    }

    let email = fields::pick(data, fields::EMAIL);
    if !email.is_empty() && !fields::is_valid_email(&email) {
        errors.push(FieldError {
            field: "email",
            message: "Invalid email address",
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn consent_given(data: &Value) -> bool {
    CONSENT.iter().any(|key| match data.get(*key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "yes" | "ja" | "1"
        ),
        _ => false,
    })
}
