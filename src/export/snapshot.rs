//! Turning raw table items into the exported JSON document.

use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};

use crate::errors::ApiError;
use crate::repositories::Item;

/// Attribute the snapshot is ordered by.
pub const SORT_ATTRIBUTE: &str = "email";

/// Converts a DynamoDB attribute into plain JSON. Decimal numbers become floats.
///
/// # Errors
///
/// Returns [`ApiError::SerializationError`] for numbers that do not fit an
/// `f64` and for attribute types this SDK version does not know.
pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, ApiError> {
    Ok(match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_to_json(n)?,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => Value::Array(
            list.iter()
                .map(attribute_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(map_to_json(map.iter())?),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(
            set.iter()
                .map(|n| number_to_json(n))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::B(blob) => Value::String(BASE64.encode(blob.as_ref())),
        AttributeValue::Bs(set) => Value::Array(
            set.iter()
                .map(|blob| Value::String(BASE64.encode(blob.as_ref())))
                .collect(),
        ),
        other => {
            return Err(ApiError::SerializationError(format!(
                "unsupported attribute value: {other:?}"
            )));
        }
    })
}

fn number_to_json(raw: &str) -> Result<Value, ApiError> {
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| ApiError::SerializationError(format!("number out of range: {raw}")))
}

fn map_to_json<'a>(
    entries: impl Iterator<Item = (&'a String, &'a AttributeValue)>,
) -> Result<Map<String, Value>, ApiError> {
    entries
        .map(|(k, v)| attribute_to_json(v).map(|json| (k.clone(), json)))
        .collect()
}

/// Converts a whole item into a JSON object.
///
/// # Errors
///
/// See [`attribute_to_json`].
pub fn item_to_json(item: &Item) -> Result<Value, ApiError> {
    map_to_json(item.iter()).map(Value::Object)
}

/// Lowercased email of a record, or `""` when absent or not a string.
fn sort_key(record: &Value) -> String {
    record
        .get(SORT_ATTRIBUTE)
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Stable sort by lowercase email.
pub fn sort_by_email(records: &mut [Value]) {
    records.sort_by_cached_key(sort_key);
}

/// Converts, sorts and pretty-prints the scanned items.
///
/// # Errors
///
/// Fails if an attribute cannot be converted or the document cannot be serialized.
pub fn render_snapshot(items: &[Item]) -> Result<String, ApiError> {
    let mut records = items
        .iter()
        .map(item_to_json)
        .collect::<Result<Vec<_>, _>>()?;
    sort_by_email(&mut records);
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Object key for an export taken at `now`:
/// `{prefix}_{YYYY-MM-DDTHH-MM-SS}_{suffix}.json`.
#[must_use]
pub fn object_key(prefix: &str, now: DateTime<Utc>, suffix: &str) -> String {
    format!(
        "{}_{}_{}.json",
        prefix.trim_end_matches('_'),
        now.format("%Y-%m-%dT%H-%M-%S"),
        suffix
    )
}

/// Short random disambiguator for keys written within the same second.
#[must_use]
pub fn key_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
