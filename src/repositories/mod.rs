//! Data access layer: DynamoDB tables and the S3 export bucket

pub mod object_store;
pub mod scan;
pub mod table_scanner;
pub mod user_repository;

use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

/// A raw DynamoDB item as returned by `Scan`.
pub type Item = HashMap<String, AttributeValue>;

pub use object_store::{ObjectStore, S3ObjectStore};
pub use table_scanner::{DynamoDbTableScanner, TableScanner};
pub use user_repository::{DynamoDbUserRepository, UserRepository};
