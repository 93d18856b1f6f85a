use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;
use userdata::api::export::{self, ExportContext};
use userdata::core::config::{ExportConfig, load_aws_config};
use userdata::repositories::{DynamoDbTableScanner, S3ObjectStore};

#[tokio::main]
async fn main() -> Result<(), Error> {
    userdata::setup_logging();

    let config = ExportConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let shared = load_aws_config().await;
    let ctx = ExportContext {
        scanner: Arc::new(DynamoDbTableScanner::new(
            aws_sdk_dynamodb::Client::new(&shared),
            config.table_name,
        )),
        store: Arc::new(S3ObjectStore::new(
            aws_sdk_s3::Client::new(&shared),
            config.bucket_name,
        )),
        key_prefix: config.key_prefix,
    };
    let ctx = &ctx;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        export::function_handler(ctx, event).await
    }))
    .await
}
