//! Helpers for reading API Gateway proxy events (REST v1 and HTTP API v2).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Map, Value};
use tracing::warn;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// HTTP method of the request: `httpMethod` (v1) or `requestContext.http.method` (v2).
pub fn request_method(event: &Value) -> Option<&str> {
    v_str(event, &["httpMethod"]).or_else(|| v_str(event, &["requestContext", "http", "method"]))
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// Header value from the event's `headers` map, matched case-insensitively.
pub fn event_header<'a>(event: &'a Value, name: &str) -> Option<&'a str> {
    event
        .get("headers")
        .and_then(|headers| get_header_value(headers, name))
}

/// Raw request body, base64-decoded when `isBase64Encoded` is set.
///
/// Returns `None` when there is no body or it cannot be decoded.
pub fn request_body(event: &Value) -> Option<String> {
    let body = event.get("body").and_then(Value::as_str)?;

    let encoded = event
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Some(body.to_string());
    }

    match BASE64.decode(body) {
        Ok(bytes) => String::from_utf8(bytes)
            .map_err(|e| warn!("Decoded base64 body is not UTF-8: {}", e))
            .ok(),
        Err(e) => {
            warn!("Failed to decode base64 body: {}", e);
            None
        }
    }
}

/// Parses a body as a JSON object. Anything else yields an empty object.
pub fn parse_json_object(body: Option<&str>) -> Value {
    let Some(body) = body else {
        return Value::Object(Map::new());
    };

    match serde_json::from_str::<Value>(body) {
        Ok(v @ Value::Object(_)) => v,
        Ok(other) => {
            warn!("Request body is JSON but not an object: {}", other);
            Value::Object(Map::new())
        }
        Err(e) => {
            warn!("Request body is not valid JSON: {}", e);
            Value::Object(Map::new())
        }
    }
}
