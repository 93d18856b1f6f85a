#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use userdata::ApiError;
use userdata::api::export::ExportContext;
use userdata::core::models::User;
use userdata::repositories::{Item, ObjectStore, TableScanner, UserRepository};

/// In-memory user table.
#[derive(Default)]
pub struct MemoryUsers {
    pub users: Mutex<Vec<User>>,
    pub fail: AtomicBool,
}

impl MemoryUsers {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            fail: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(ApiError::AwsError("ResourceNotFoundException: users".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn email_exists(&self, email: &str) -> Result<bool, ApiError> {
        self.check()?;
        Ok(self.users.lock().unwrap().iter().any(|u| u.email == email))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.check()?;
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

/// Fixed set of items returned by every scan.
#[derive(Default)]
pub struct MemoryTable {
    pub items: Mutex<Vec<Item>>,
    pub fail: AtomicBool,
}

impl MemoryTable {
    pub fn with(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl TableScanner for MemoryTable {
    async fn scan_all(&self) -> Result<Vec<Item>, ApiError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::AwsError("scan throttled".into()));
        }
        Ok(self.items.lock().unwrap().clone())
    }
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// In-memory bucket whose presigned links are fake https URLs.
#[derive(Default)]
pub struct MemoryBucket {
    pub objects: Mutex<BTreeMap<String, StoredObject>>,
    pub presigned: Mutex<Vec<(String, Duration)>>,
    pub fail_presign: AtomicBool,
}

impl MemoryBucket {
    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    /// Resolves a link handed out by `presign_get` back to its object.
    pub fn download(&self, url: &str) -> Option<StoredObject> {
        let key = url
            .strip_prefix("https://exports.example.s3.amazonaws.com/")?
            .split('?')
            .next()?;
        self.object(key)
    }
}

#[async_trait]
impl ObjectStore for MemoryBucket {
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApiError> {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, ApiError> {
        if self.fail_presign.load(Ordering::SeqCst) {
            return Err(ApiError::AwsError("presign failed".into()));
        }
        self.presigned
            .lock()
            .unwrap()
            .push((key.to_string(), expires_in));
        Ok(format!(
            "https://exports.example.s3.amazonaws.com/{key}?X-Amz-Expires={}&X-Amz-Signature=abc",
            expires_in.as_secs()
        ))
    }
}

pub fn export_context(table: Arc<MemoryTable>, bucket: Arc<MemoryBucket>) -> ExportContext {
    ExportContext {
        scanner: table,
        store: bucket,
        key_prefix: "exports/crypto".to_string(),
    }
}

pub fn rest_event(method: &str, body: Option<&str>) -> Value {
    json!({
        "httpMethod": method,
        "headers": { "Content-Type": "application/json" },
        "body": body
    })
}

pub fn with_accept(mut event: Value, accept: &str) -> Value {
    event["headers"]["accept"] = Value::String(accept.to_string());
    event
}

pub fn status(response: &Value) -> u64 {
    response["statusCode"].as_u64().unwrap()
}

pub fn body_json(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().unwrap()).unwrap()
}
