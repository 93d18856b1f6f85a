//! Response builders for API Gateway proxy integrations.

use serde_json::{Map, Value, json};
use tracing::{error, warn};

use crate::errors::ApiError;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Which cross-origin header a handler attaches to its responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cors {
    None,
    AllowAnyOrigin,
}

fn headers(content_type: &str, cors: Cors) -> Value {
    let mut map = Map::new();
    map.insert("Content-Type".into(), Value::String(content_type.to_string()));
    if cors == Cors::AllowAnyOrigin {
        map.insert("Access-Control-Allow-Origin".into(), Value::String("*".into()));
    }
    Value::Object(map)
}

/// Returns a response whose body is `body` serialized as JSON.
#[must_use]
pub fn json_response(status_code: u16, body: &Value, cors: Cors) -> Value {
    json!({
        "statusCode": status_code,
        "headers": headers(JSON_CONTENT_TYPE, cors),
        "body": body.to_string()
    })
}

#[must_use]
pub fn html_response(status_code: u16, html: String, cors: Cors) -> Value {
    json!({
        "statusCode": status_code,
        "headers": headers(HTML_CONTENT_TYPE, cors),
        "body": html
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str, cors: Cors) -> Value {
    json_response(status_code, &json!({ "error": message }), cors)
}

/// Maps a handler error to its response. Internal errors are logged in full
/// and answered with `internal_message` only.
#[must_use]
pub fn error_to_response(err: &ApiError, internal_message: &str, cors: Cors) -> Value {
    let status = err.status_code();
    if err.is_internal() {
        error!(status, "Request failed: {}", err);
        return err_response(status, internal_message, cors);
    }

    warn!(status, "Request rejected: {}", err);
    err_response(status, err.public_message().unwrap_or(internal_message), cors)
}
