use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("Failed to serialize data: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// HTTP status code reported to the caller for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::MethodNotAllowed(_) => 405,
            ApiError::Conflict(_) => 409,
            ApiError::AwsError(_) | ApiError::SerializationError(_) | ApiError::ConfigError(_) => {
                500
            }
        }
    }

    /// Whether the error is an internal failure whose detail must stay out of responses.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }

    /// Message safe to return to the caller, or `None` for internal errors.
    #[must_use]
    pub fn public_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation(m) | ApiError::MethodNotAllowed(m) | ApiError::Conflict(m) => {
                Some(m)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::SerializationError(error.to_string())
    }
}
