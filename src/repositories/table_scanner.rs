use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use tracing::{info, instrument};

use super::Item;
use super::scan::{ScanControl, scan_pages};
use crate::errors::ApiError;

/// Reads a whole table, whatever schema its items hold.
#[async_trait]
pub trait TableScanner: Send + Sync {
    async fn scan_all(&self) -> Result<Vec<Item>, ApiError>;
}

pub struct DynamoDbTableScanner {
    client: DynamoDbClient,
    table_name: String,
}

impl DynamoDbTableScanner {
    #[must_use]
    pub fn new(client: DynamoDbClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl TableScanner for DynamoDbTableScanner {
    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn scan_all(&self) -> Result<Vec<Item>, ApiError> {
        let mut items = Vec::new();
        let pages = scan_pages(&self.client, &self.table_name, None, |page| {
            items.extend(page);
            ScanControl::Continue
        })
        .await?;

        info!(pages, items = items.len(), "Scanned table");
        Ok(items)
    }
}
