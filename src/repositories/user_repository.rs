use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::{info, instrument};

use super::scan::{EqualsFilter, ScanControl, scan_pages};
use crate::core::models::User;
use crate::errors::ApiError;

/// Storage for registered users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether any stored record has exactly this email (case-sensitive).
    async fn email_exists(&self, email: &str) -> Result<bool, ApiError>;

    /// Writes a new user record keyed by its id.
    async fn create(&self, user: &User) -> Result<(), ApiError>;
}

pub struct DynamoDbUserRepository {
    client: DynamoDbClient,
    table_name: String,
}

impl DynamoDbUserRepository {
    #[must_use]
    pub fn new(client: DynamoDbClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    // Full-table scan filtered server-side; there is no email index.
    #[instrument(skip(self, email), fields(table = %self.table_name))]
    async fn email_exists(&self, email: &str) -> Result<bool, ApiError> {
        let filter = EqualsFilter::string("email", email);
        let mut found = false;

        let pages = scan_pages(&self.client, &self.table_name, Some(&filter), |items| {
            if items.is_empty() {
                ScanControl::Continue
            } else {
                found = true;
                ScanControl::Stop
            }
        })
        .await?;

        info!(pages, found, "Checked email uniqueness");
        Ok(found)
    }

    #[instrument(skip(self, user), fields(table = %self.table_name, id = %user.id))]
    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("id", AttributeValue::S(user.id.clone()))
            .item("name", AttributeValue::S(user.name.clone()))
            .item("email", AttributeValue::S(user.email.clone()))
            .send()
            .await
            .map_err(|e| {
                ApiError::AwsError(format!("dynamodb put_item: {}", DisplayErrorContext(&e)))
            })?;

        info!("Stored user record");
        Ok(())
    }
}
