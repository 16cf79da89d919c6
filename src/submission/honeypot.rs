use serde_json::Value;

/// Names the hidden anti-spam field has gone by.
pub const HONEYPOT_FIELDS: &[&str] = &["bot-field", "bot_field", "botField"];

/// Check whether any honeypot alias is filled. Returns true if spam detected.
pub fn is_spam(data: &Value) -> bool {
    HONEYPOT_FIELDS
        .iter()
        .any(|field| match data.get(*field) {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Bool(b)) => *b,
            Some(Value::Null) | None => false,
            Some(_) => true,
        })
}
