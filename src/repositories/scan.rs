//! Paginated `Scan` over a DynamoDB table.
//!
//! A single `Scan` call returns at most 1 MB of data. Both handlers need the
//! whole table, so every read here follows `LastEvaluatedKey` until the
//! table is exhausted.

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use super::Item;
use crate::errors::ApiError;

/// Server-side equality filter applied to every page.
#[derive(Debug, Clone)]
pub struct EqualsFilter {
    pub attribute: String,
    pub value: AttributeValue,
}

impl EqualsFilter {
    #[must_use]
    pub fn string(attribute: &str, value: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            value: AttributeValue::S(value.to_string()),
        }
    }
}

/// What to do after a page has been collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    Continue,
    Stop,
}

/// One page of results plus the key to resume from, if any.
pub type Page = (Vec<Item>, Option<Item>);

/// Drives `fetch_page` until the store stops returning a resume key or
/// `on_page` returns [`ScanControl::Stop`]. An empty resume key map also ends
/// the loop. Returns the number of pages read.
///
/// # Errors
///
/// Returns the first error produced by `fetch_page`.
pub async fn paginate<Fetch, Fut, F>(
    mut fetch_page: Fetch,
    mut on_page: F,
) -> Result<usize, ApiError>
where
    Fetch: FnMut(Option<Item>) -> Fut,
    Fut: Future<Output = Result<Page, ApiError>>,
    F: FnMut(Vec<Item>) -> ScanControl,
{
    let mut start_key: Option<Item> = None;
    let mut pages = 0;

    loop {
        let (items, last_key) = fetch_page(start_key.take()).await?;
        pages += 1;

        if on_page(items) == ScanControl::Stop {
            break;
        }

        match last_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => break,
        }
    }

    Ok(pages)
}

/// Scans `table_name` page by page, handing each page's items to `on_page`.
///
/// # Errors
///
/// Returns [`ApiError::AwsError`] if any page request fails.
pub async fn scan_pages<F>(
    client: &DynamoDbClient,
    table_name: &str,
    filter: Option<&EqualsFilter>,
    on_page: F,
) -> Result<usize, ApiError>
where
    F: FnMut(Vec<Item>) -> ScanControl,
{
    let fetch_page = |start_key: Option<Item>| async move {
        let mut request = client
            .scan()
            .table_name(table_name)
            .set_exclusive_start_key(start_key);

        if let Some(filter) = filter {
            request = request
                .filter_expression("#attr = :value")
                .expression_attribute_names("#attr", &filter.attribute)
                .expression_attribute_values(":value", filter.value.clone());
        }

        let response = request.send().await.map_err(|e| {
            ApiError::AwsError(format!(
                "dynamodb scan on {table_name}: {}",
                DisplayErrorContext(&e)
            ))
        })?;

        let items = response.items.unwrap_or_default();
        debug!(table = %table_name, items = items.len(), "Scanned page");
        Ok::<Page, ApiError>((items, response.last_evaluated_key))
    };

    paginate(fetch_page, on_page).await
}
