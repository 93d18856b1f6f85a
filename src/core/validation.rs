use regex::Regex;
use std::sync::LazyLock;

use super::models::NewUserRequest;
use crate::errors::ApiError;

pub const MISSING_FIELDS_MESSAGE: &str = "The 'name' and 'email' fields are required.";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address.";

// Prefix match only: local@domain.tld, nothing more.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("static regex compile"));

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validated `(name, email)` pair from a registration request.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] if either field is missing, empty or not a
/// string, or if the email does not look like an address.
pub fn validate_new_user(request: &NewUserRequest) -> Result<(String, String), ApiError> {
    let name = non_empty_str(request.name.as_ref());
    let email = non_empty_str(request.email.as_ref());

    let (Some(name), Some(email)) = (name, email) else {
        return Err(ApiError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    };

    if !is_valid_email(email) {
        return Err(ApiError::Validation(INVALID_EMAIL_MESSAGE.to_string()));
    }

    Ok((name.to_string(), email.to_string()))
}

fn non_empty_str(value: Option<&serde_json::Value>) -> Option<&str> {
    value.and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}
