//! Inbound updates.
//!
//! An [`Update`] wraps the raw JSON object the platform sent and the
//! [`UpdateKind`] it classifies as. The kind is computed once, when the value
//! is built, and every accessor branches on it.
//! Docs: <https://core.telegram.org/bots/api#update>

mod fields;
mod kind;
pub mod types;

#[cfg(test)]
mod tests;

pub use kind::UpdateKind;

use crate::error::CourierError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One inbound event: a message, a callback press, an inline query, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct Update {
    raw: Value,
    kind: Option<UpdateKind>,
}

impl From<Value> for Update {
    fn from(raw: Value) -> Self {
        let kind = UpdateKind::classify(&raw);
        Self { raw, kind }
    }
}

impl From<Update> for Value {
    fn from(update: Update) -> Self {
        update.raw
    }
}

impl Update {
    /// Decode a webhook body. The body must be a JSON object.
    pub fn from_slice(body: &[u8]) -> Result<Self, CourierError> {
        let raw: Value = serde_json::from_slice(body)
            .map_err(|e| CourierError::Decode(format!("update is not valid JSON: {e}")))?;
        if !raw.is_object() {
            return Err(CourierError::Decode(
                "update must be a JSON object".to_string(),
            ));
        }
        Ok(Self::from(raw))
    }

    /// The classified kind, `None` for shapes Courier does not know.
    pub fn kind(&self) -> Option<UpdateKind> {
        self.kind
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// Non-null value at a JSON pointer.
    pub fn at(&self, pointer: &str) -> Option<&Value> {
        self.raw.pointer(pointer).filter(|v| !v.is_null())
    }

    fn str_at(&self, pointer: &str) -> Option<&str> {
        self.at(pointer).and_then(Value::as_str)
    }

    fn i64_at(&self, pointer: &str) -> Option<i64> {
        self.at(pointer).and_then(Value::as_i64)
    }
}

/// A batch returned by `getUpdates`, kept alongside the envelope it came in.
#[derive(Debug, Clone, Default)]
pub struct UpdateBatch {
    response: Value,
    updates: Vec<Update>,
}

impl UpdateBatch {
    /// Split a decoded `getUpdates` envelope. A failure envelope, or one
    /// whose `result` is not an array, yields an empty batch.
    pub fn from_response(response: Value) -> Self {
        let updates = match response.get("result") {
            Some(Value::Array(items)) if !crate::traits::is_failure(&response) => {
                items.iter().cloned().map(Update::from).collect()
            }
            _ => Vec::new(),
        };
        Self { response, updates }
    }

    /// The envelope exactly as decoded.
    pub fn response(&self) -> &Value {
        &self.response
    }

    pub fn is_ok(&self) -> bool {
        !crate::traits::is_failure(&self.response)
    }

    /// `description` of a failure envelope.
    pub fn description(&self) -> Option<&str> {
        self.response.get("description").and_then(Value::as_str)
    }

    pub fn updates(&self) -> &[Update] {
        &self.updates
    }

    pub fn get(&self, index: usize) -> Option<&Update> {
        self.updates.get(index)
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// `update_id` of the last update in the batch.
    pub fn last_update_id(&self) -> Option<i64> {
        self.updates.last().and_then(Update::update_id)
    }
}

impl<'a> IntoIterator for &'a UpdateBatch {
    type Item = &'a Update;
    type IntoIter = std::slice::Iter<'a, Update>;

    fn into_iter(self) -> Self::IntoIter {
        self.updates.iter()
    }
}
