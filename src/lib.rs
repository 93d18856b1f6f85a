//! userdata - two small Lambda functions over DynamoDB and S3.
//!
//! # Architecture
//!
//! 1. A registration Lambda that validates `{name, email}`, rejects duplicate
//!    emails and stores a new user record
//! 2. An export Lambda that scans a table, writes the sorted snapshot to S3
//!    and returns a one-hour pre-signed download link
//!
//! The functions share nothing at runtime. SDK clients are built once in each
//! binary's `main` and handed to the handlers through the traits in
//! [`repositories`], so tests can run the handlers against in-memory stores.
//!
//! # Example
//!
//! ```no_run
//! use userdata::api::register;
//! use userdata::core::config::{RegistrationConfig, load_aws_config};
//! use userdata::repositories::DynamoDbUserRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     userdata::setup_logging();
//!
//!     let config = RegistrationConfig::from_env()?;
//!     let shared = load_aws_config().await;
//!     let users = DynamoDbUserRepository::new(
//!         aws_sdk_dynamodb::Client::new(&shared),
//!         config.users_table,
//!     );
//!
//!     let event = serde_json::json!({
//!         "httpMethod": "POST",
//!         "body": r#"{"name": "Ann", "email": "ann@example.com"}"#
//!     });
//!     let response = register::handle_registration(&users, &event).await;
//!     println!("{}", response["statusCode"]);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod core;
pub mod errors;
pub mod export;
pub mod repositories;

pub use errors::ApiError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Output goes to `CloudWatch` Logs. The level comes from `RUST_LOG` and
/// defaults to `info`. Call once, at the start of each Lambda binary.
///
/// # Example
///
/// ```
/// userdata::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
