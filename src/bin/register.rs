use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::error;
use userdata::api::register;
use userdata::core::config::{RegistrationConfig, load_aws_config};
use userdata::repositories::DynamoDbUserRepository;

#[tokio::main]
async fn main() -> Result<(), Error> {
    userdata::setup_logging();

    let config = RegistrationConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let shared = load_aws_config().await;
    let users = DynamoDbUserRepository::new(
        aws_sdk_dynamodb::Client::new(&shared),
        config.users_table,
    );
    let users = &users;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        register::function_handler(users, event).await
    }))
    .await
}
