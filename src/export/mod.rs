//! Table snapshot export to object storage

pub mod snapshot;

use std::time::Duration;

/// Lifetime of the pre-signed download link.
pub const DOWNLOAD_URL_TTL: Duration = Duration::from_secs(3600);

pub const SNAPSHOT_CONTENT_TYPE: &str = "application/json";

pub use snapshot::{object_key, render_snapshot, sort_by_email};
