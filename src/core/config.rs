use std::env;

/// Region used when the SDK provider chain resolves none.
pub const DEFAULT_REGION: &str = "eu-west-1";

pub const DEFAULT_EXPORT_TABLE: &str = "CryptoPrices";
pub const DEFAULT_EXPORT_KEY_PREFIX: &str = "exports/crypto";

#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    pub users_table: String,
}

impl RegistrationConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            users_table: env::var("STORAGE_USERS_NAME")
                .map_err(|e| format!("STORAGE_USERS_NAME: {}", e))?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub table_name: String,
    pub bucket_name: String,
    pub key_prefix: String,
}

impl ExportConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            table_name: env::var("STORAGE_CRYPTOPRICES_NAME")
                .unwrap_or_else(|_| DEFAULT_EXPORT_TABLE.to_string()),
            bucket_name: env::var("STORAGE_EXPORTS_BUCKETNAME")
                .map_err(|e| format!("STORAGE_EXPORTS_BUCKETNAME: {}", e))?,
            key_prefix: env::var("EXPORT_KEY_PREFIX")
                .ok()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_EXPORT_KEY_PREFIX.to_string()),
        })
    }
}

/// Loads the shared AWS SDK configuration, falling back to [`DEFAULT_REGION`].
pub async fn load_aws_config() -> aws_config::SdkConfig {
    use aws_config::meta::region::RegionProviderChain;

    let region = RegionProviderChain::default_provider()
        .or_else(aws_config::Region::new(DEFAULT_REGION));
    aws_config::from_env().region(region).load().await
}
