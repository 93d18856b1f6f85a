//! User registration handler.
//!
//! Accepts `POST {name, email}`, validates it, rejects duplicate emails and
//! stores a new record with a generated id.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::info;

use super::{
    helpers::{self, Cors},
    parsing,
};
use crate::core::{
    models::{NewUserRequest, User},
    validation,
};
use crate::errors::ApiError;
use crate::repositories::UserRepository;

pub const CREATE_METHOD: &str = "POST";

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed. Use POST.";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "This email address already exists.";
pub const USER_CREATED_MESSAGE: &str = "User created successfully.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while creating the user.";

/// Lambda entry point for user registration.
///
/// Always returns a proxy response; failures are reported through its status code.
#[tracing::instrument(level = "info", skip(users, event))]
pub async fn function_handler(
    users: &dyn UserRepository,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    info!("Registration Lambda received request: {:?}", event.payload);
    Ok(handle_registration(users, &event.payload).await)
}

/// Runs one registration and converts the outcome into a response.
pub async fn handle_registration(users: &dyn UserRepository, event: &Value) -> Value {
    match register_user(users, event).await {
        Ok(user) => {
            info!(user_id = %user.id, "User registered");
            helpers::json_response(201, &json!({ "message": USER_CREATED_MESSAGE }), Cors::None)
        }
        Err(e) => helpers::error_to_response(&e, INTERNAL_ERROR_MESSAGE, Cors::None),
    }
}

/// Validates the request, checks uniqueness and writes the record.
///
/// # Errors
///
/// - [`ApiError::MethodNotAllowed`] for anything but `POST`
/// - [`ApiError::Validation`] for missing fields or a malformed email
/// - [`ApiError::Conflict`] when the email is already registered
/// - internal variants when the store fails
pub async fn register_user(users: &dyn UserRepository, event: &Value) -> Result<User, ApiError> {
    let method = parsing::request_method(event);
    if method != Some(CREATE_METHOD) {
        return Err(ApiError::MethodNotAllowed(
            METHOD_NOT_ALLOWED_MESSAGE.to_string(),
        ));
    }

    let body = parsing::request_body(event);
    let parsed = parsing::parse_json_object(body.as_deref());
    let request: NewUserRequest = serde_json::from_value(parsed).unwrap_or_default();
    let (name, email) = validation::validate_new_user(&request)?;

    // Not atomic with the write below: two concurrent requests can both pass.
    if users.email_exists(&email).await? {
        return Err(ApiError::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()));
    }

    let user = User::new(name, email);
    users.create(&user).await?;
    Ok(user)
}
