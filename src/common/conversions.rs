//! Attribute conversion between domain records and DynamoDB item maps.
//!
//! Pure functions, testable without DynamoDB access. Only scalar attribute
//! values are supported: movie attributes are opaque scalars passed through
//! verbatim, so nested arrays and objects are rejected as malformed.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};

use crate::common::store::StoreError;
use crate::common::{CastEntry, Movie};

pub fn movie_to_item(movie: &Movie) -> Result<HashMap<String, AttributeValue>, StoreError> {
    let mut item = HashMap::new();
    item.insert("id".to_string(), AttributeValue::N(movie.id.to_string()));
    item.insert("title".to_string(), AttributeValue::S(movie.title.clone()));

    for (name, value) in &movie.attributes {
        item.insert(name.clone(), json_to_attr(name, value)?);
    }

    Ok(item)
}

pub fn item_to_movie(item: &HashMap<String, AttributeValue>) -> Result<Movie, StoreError> {
    let mut attributes = Map::new();
    for (name, value) in item {
        if name == "id" || name == "title" {
            continue;
        }
        attributes.insert(name.clone(), attr_to_json(name, value)?);
    }

    Ok(Movie {
        id: get_number(item, "id")?,
        title: get_string(item, "title")?,
        attributes,
    })
}

pub fn cast_to_item(entry: &CastEntry) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(
        "movieId".to_string(),
        AttributeValue::N(entry.movie_id.to_string()),
    );
    item.insert(
        "actorName".to_string(),
        AttributeValue::S(entry.actor_name.clone()),
    );
    item.insert(
        "roleName".to_string(),
        AttributeValue::S(entry.role_name.clone()),
    );
    item
}

pub fn item_to_cast(item: &HashMap<String, AttributeValue>) -> Result<CastEntry, StoreError> {
    Ok(CastEntry {
        movie_id: get_number(item, "movieId")?,
        actor_name: get_string(item, "actorName")?,
        role_name: get_string(item, "roleName")?,
    })
}

fn json_to_attr(name: &str, value: &Value) -> Result<AttributeValue, StoreError> {
    match value {
        Value::String(s) => Ok(AttributeValue::S(s.clone())),
        Value::Number(n) => Ok(AttributeValue::N(n.to_string())),
        Value::Bool(b) => Ok(AttributeValue::Bool(*b)),
        Value::Null => Ok(AttributeValue::Null(true)),
        Value::Array(_) | Value::Object(_) => Err(StoreError::Malformed(format!(
            "non-scalar attribute: {name}"
        ))),
    }
}

fn attr_to_json(name: &str, value: &AttributeValue) -> Result<Value, StoreError> {
    match value {
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => parse_number(name, n),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        other => Err(StoreError::Malformed(format!(
            "unsupported attribute type for {name}: {other:?}"
        ))),
    }
}

fn parse_number(name: &str, raw: &str) -> Result<Value, StoreError> {
    if let Ok(int) = raw.parse::<i64>() {
        return Ok(Value::Number(int.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| StoreError::Malformed(format!("invalid number for {name}: {raw}")))
}

/// Get a required string attribute.
fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, StoreError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StoreError::Malformed(format!("missing or invalid field: {key}")))
}

/// Get a required numeric attribute.
fn get_number(item: &HashMap<String, AttributeValue>, key: &str) -> Result<i64, StoreError> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| StoreError::Malformed(format!("missing or invalid field: {key}")))
}
