use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use std::time::Duration;
use tracing::{info, instrument};

use crate::errors::ApiError;

/// Object storage holding exported snapshots.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `body` under `key`, replacing any object already there.
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApiError>;

    /// Returns a credential-free GET link for `key` valid for `expires_in`.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, ApiError>;
}

pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    #[must_use]
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, body), fields(bucket = %self.bucket, size = body.len()))]
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApiError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| ApiError::AwsError(format!("s3 put_object: {}", DisplayErrorContext(&e))))?;

        info!("Uploaded export object");
        Ok(())
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, ApiError> {
        let config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| ApiError::ConfigError(format!("invalid presign config: {e}")))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(|e| ApiError::AwsError(format!("s3 presign: {}", DisplayErrorContext(&e))))?;

        Ok(presigned.uri().to_string())
    }
}
