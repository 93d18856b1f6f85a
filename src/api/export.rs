//! Table export handler.
//!
//! Scans the configured table, writes the sorted snapshot to object storage
//! and answers with a one-hour download link, as JSON or as a small HTML
//! page depending on the `accept` header.

use chrono::{DateTime, Utc};
use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use super::{
    helpers::{self, Cors},
    parsing,
};
use crate::errors::ApiError;
use crate::export::{self, DOWNLOAD_URL_TTL, SNAPSHOT_CONTENT_TYPE, snapshot};
use crate::repositories::{ObjectStore, TableScanner};

pub const READ_METHOD: &str = "GET";

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed. Use GET.";
pub const EXPORT_DONE_MESSAGE: &str = "Export completed successfully.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Error while exporting data.";

/// Clients and settings an export invocation runs against.
#[derive(Clone)]
pub struct ExportContext {
    pub scanner: Arc<dyn TableScanner>,
    pub store: Arc<dyn ObjectStore>,
    pub key_prefix: String,
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub object_key: String,
    pub download_url: String,
    pub record_count: usize,
}

/// Lambda entry point for the export.
#[tracing::instrument(level = "info", skip(ctx, event))]
pub async fn function_handler(
    ctx: &ExportContext,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    info!("Export Lambda received request: {:?}", event.payload);
    Ok(handle_export(ctx, &event.payload).await)
}

/// Runs one export and converts the outcome into a response.
pub async fn handle_export(ctx: &ExportContext, event: &Value) -> Value {
    if parsing::request_method(event) != Some(READ_METHOD) {
        let err = ApiError::MethodNotAllowed(METHOD_NOT_ALLOWED_MESSAGE.to_string());
        return helpers::error_to_response(&err, INTERNAL_ERROR_MESSAGE, Cors::AllowAnyOrigin);
    }

    match export_table(ctx, Utc::now()).await {
        Ok(outcome) => {
            info!(
                key = %outcome.object_key,
                records = outcome.record_count,
                "Export finished"
            );
            if wants_html(event) {
                helpers::html_response(
                    200,
                    download_page(&outcome.download_url),
                    Cors::AllowAnyOrigin,
                )
            } else {
                helpers::json_response(
                    200,
                    &json!({
                        "message": EXPORT_DONE_MESSAGE,
                        "download_url": outcome.download_url
                    }),
                    Cors::AllowAnyOrigin,
                )
            }
        }
        Err(e) => helpers::error_to_response(&e, INTERNAL_ERROR_MESSAGE, Cors::AllowAnyOrigin),
    }
}

/// Scans, serializes, uploads and presigns. Steps run strictly in order and
/// the first failure aborts the rest; an uploaded object is left in place if
/// presigning fails.
///
/// # Errors
///
/// Returns the first store or serialization error encountered.
pub async fn export_table(
    ctx: &ExportContext,
    now: DateTime<Utc>,
) -> Result<ExportOutcome, ApiError> {
    let items = ctx.scanner.scan_all().await?;
    let body = export::render_snapshot(&items)?;

    let object_key = export::object_key(&ctx.key_prefix, now, &snapshot::key_suffix());
    ctx.store
        .put_object(&object_key, body.into_bytes(), SNAPSHOT_CONTENT_TYPE)
        .await?;

    let download_url = ctx.store.presign_get(&object_key, DOWNLOAD_URL_TTL).await?;

    Ok(ExportOutcome {
        object_key,
        download_url,
        record_count: items.len(),
    })
}

fn wants_html(event: &Value) -> bool {
    parsing::event_header(event, "accept")
        .is_some_and(|accept| accept.to_lowercase().contains("text/html"))
}

fn download_page(url: &str) -> String {
    format!(
        "<html><body><p>Export successful!</p><p><a href='{url}'>Download the file</a></p></body></html>"
    )
}
