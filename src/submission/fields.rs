use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Hard cap applied to every free-text field, in characters.
pub const MAX_FIELD_LENGTH: usize = 10_000;

pub const NAME: &[&str] = &["navn", "name"];
pub const EMAIL: &[&str] = &["email"];
pub const WEBSITE: &[&str] = &["nettside", "website"];
pub const SERVICE: &[&str] = &["tjeneste", "service"];
pub const BUDGET: &[&str] = &["budsjett", "budget"];
pub const MESSAGE: &[&str] = &["melding", "message"];
pub const FORM_NAME: &[&str] = &["form_name", "form-name"];

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Coerce a JSON value to text, trim it and cap it at [`MAX_FIELD_LENGTH`].
pub fn sanitize(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => return String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    };
    sanitize_str(&text)
}

pub fn sanitize_str(input: &str) -> String {
    let trimmed = input.trim();
    match trimmed.char_indices().nth(MAX_FIELD_LENGTH) {
        Some((cut, _)) => trimmed[..cut].to_string(),
        None => trimmed.to_string(),
    }
}

/// First alias that yields a non-empty sanitized value.
pub fn pick(data: &Value, aliases: &[&str]) -> String {
    aliases
        .iter()
        .map(|alias| sanitize(data.get(*alias)))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

pub fn optional(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

pub fn normalize_email(email: &str) -> String {
    sanitize_str(email).to_lowercase()
}

/// Shape check only: `local@domain.tld` with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sanitize_is_idempotent_on_clean_input() {
        let once = sanitize_str("Kari Nordmann");
        assert_eq!(once, "Kari Nordmann");
        assert_eq!(sanitize_str(&once), once);
    }

    #[test]
    fn sanitize_caps_long_input() {
        let long = "x".repeat(20_000);
        let capped = sanitize_str(&long);
        assert_eq!(capped.chars().count(), MAX_FIELD_LENGTH);
        assert_eq!(sanitize_str(&long), capped);
    }

    #[test]
    fn sanitize_cap_is_exact_even_at_whitespace() {
        let input = format!("{} {}", "a".repeat(MAX_FIELD_LENGTH - 1), "b".repeat(50));
        let capped = sanitize_str(&input);
        assert_eq!(capped.chars().count(), MAX_FIELD_LENGTH);
        assert!(capped.ends_with(' '));
    }

    #[test]
    fn sanitize_counts_characters_not_bytes() {
        let long = "ø".repeat(MAX_FIELD_LENGTH + 5);
        assert_eq!(sanitize_str(&long).chars().count(), MAX_FIELD_LENGTH);
    }

    #[test]
    fn sanitize_coerces_non_strings() {
        assert_eq!(sanitize(Some(&json!(42))), "42");
        assert_eq!(sanitize(Some(&json!(true))), "true");
        assert_eq!(sanitize(Some(&json!(null))), "");
        assert_eq!(sanitize(None), "");
    }

    #[test]
    fn pick_prefers_first_non_empty_alias() {
        let data = json!({"navn": "  ", "name": "Ola"});
        assert_eq!(pick(&data, NAME), "Ola");
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Kari@Firma.NO "), "kari@firma.no");
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("kari@firma.no"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("kari@firma"));
        assert!(!is_valid_email("ka ri@firma.no"));
        assert!(!is_valid_email(""));
    }
}
