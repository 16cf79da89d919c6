use serde_json::{Map, Value};

/// Decode a request body. JSON is always tried first; anything that is not
/// JSON is decoded as `key=value&...`. The declared Content-Type is only
/// logged, since the relay does not label its bodies reliably.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Value, String> {
    match serde_json::from_slice(body) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            tracing::debug!(
                content_type = content_type.unwrap_or("none"),
                "Body is not JSON, decoding as form data"
            );
            parse_form_urlencoded(body).map_err(|e| {
                format!("Unable to parse body as JSON ({json_err}) or form data ({e})")
            })
        }
    }
}

/// Decode a form body. Bracketed keys such as `data[navn]` become nested
/// objects so a form-encoded relay payload lands in the same shape as JSON.
pub fn parse_form_urlencoded(body: &[u8]) -> Result<Value, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let mut map = Map::new();
    for (key, value) in form_urlencoded::parse(body_str.trim().as_bytes()) {
        let path = key_path(&key);
        insert_path(&mut map, &path, Value::String(value.into_owned()));
    }
    Ok(Value::Object(map))
}

fn key_path(key: &str) -> Vec<&str> {
    let Some(open) = key.find('[') else {
        return vec![key];
    };
    if !key.ends_with(']') || open == 0 {
        return vec![key];
    }

    let mut path = vec![&key[..open]];
    path.extend(key[open + 1..key.len() - 1].split("]["));
    if path.iter().any(|segment| segment.is_empty()) {
        return vec![key];
    }
    path
}

fn insert_path(map: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [last] => {
            // First occurrence wins, like URLSearchParams::get
            map.entry(last.to_string()).or_insert(value);
        }
        [head, rest @ ..] => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(inner) = entry {
                insert_path(inner, rest, value);
            }
        }
    }
}
