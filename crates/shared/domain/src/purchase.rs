//! Purchase log entries.
//!
//! Purchases are free-form JSON objects. The only field the service owns is
//! the receipt `date`, stamped when the entry is accepted.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::PURCHASE_DATE_FIELD;
use crate::error::{DomainError, DomainResult};

/// A single logged purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Purchase(Map<String, Value>);

impl Purchase {
    /// Stamp client-supplied fields with the receipt time, replacing any
    /// `date` the client sent.
    pub fn stamped(mut fields: Map<String, Value>, received_at: DateTime<Utc>) -> Self {
        fields.insert(
            PURCHASE_DATE_FIELD.to_string(),
            Value::String(received_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Self(fields)
    }

    /// Receipt timestamp, as stored
    pub fn date(&self) -> Option<&str> {
        self.0.get(PURCHASE_DATE_FIELD).and_then(Value::as_str)
    }

    /// All stored fields
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Split a request body into purchase entries.
///
/// Accepts a single object or an array of objects. Any non-object entry
/// rejects the whole batch.
pub fn split_batch(body: Value) -> DomainResult<Vec<Map<String, Value>>> {
    match body {
        Value::Object(fields) => Ok(vec![fields]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(fields) => Ok(fields),
                _ => Err(DomainError::invalid_input(format!(
                    "purchase entry {} is not an object",
                    index
                ))),
            })
            .collect(),
        _ => Err(DomainError::invalid_input(
            "purchase body must be an object or an array of objects",
        )),
    }
}
