//! Decoding of query strings and request bodies.
//!
//! Bodies are negotiated by `Content-Type`:
//!
//! - `application/json` (and `+json` suffixes) - parsed as JSON; only objects
//!   and arrays are accepted at the top level
//! - `application/x-www-form-urlencoded` - pairs decoded into an object, with
//!   bracketed keys (`address[city]=Paris`, `tags[]=a`) building nested values
//! - anything else, or an empty body - an empty object

use axum::http::{HeaderMap, header};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use url::form_urlencoded;

use crate::error::AppError;

/// Decodes a query string into a flat mapping. Repeated keys keep the last value.
pub fn parse_query(query: Option<&str>) -> BTreeMap<String, String> {
    query
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Decodes the body according to the request's content type.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if a JSON body is malformed or its top
/// level is not an object or array.
pub fn parse_body(headers: &HeaderMap, bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if content_type == "application/json" || content_type.ends_with("+json") {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| {
            AppError::bad_request("Malformed JSON body", json!({ "reason": e.to_string() }))
        })?;

        if !value.is_object() && !value.is_array() {
            return Err(AppError::bad_request(
                "Malformed JSON body",
                json!({ "reason": "top-level value must be an object or array" }),
            ));
        }
        return Ok(value);
    }

    if content_type == "application/x-www-form-urlencoded" {
        return Ok(parse_form(bytes));
    }

    Ok(Value::Object(Map::new()))
}

/// Decodes form pairs into an object. Later pairs overwrite earlier ones.
pub fn parse_form(bytes: &[u8]) -> Value {
    let mut object = Map::new();
    for (key, value) in form_urlencoded::parse(bytes) {
        insert(&mut object, &key_path(&key), value.into_owned());
    }
    Value::Object(object)
}

/// Splits `a[b][c]` into `["a", "b", "c"]`; keys without brackets stay whole.
fn key_path(key: &str) -> Vec<&str> {
    match key.find('[') {
        Some(open) if open > 0 && key.ends_with(']') => {
            let mut path = vec![&key[..open]];
            path.extend(key[open + 1..key.len() - 1].split("]["));
            path
        }
        _ => vec![key],
    }
}

fn insert(object: &mut Map<String, Value>, path: &[&str], value: String) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        object.insert((*head).to_string(), Value::String(value));
        return;
    }

    let entry = object.entry(*head).or_insert(Value::Null);

    if rest == [""] {
        match entry {
            Value::Array(items) => items.push(Value::String(value)),
            other => *other = Value::Array(vec![Value::String(value)]),
        }
        return;
    }

    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(child) = entry {
        insert(child, rest, value);
    }
}
