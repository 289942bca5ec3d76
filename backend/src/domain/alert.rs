//! Alerts are populated outside this service and only ever counted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque alert record; any JSON value is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alert(Value);

impl Alert {
    /// Wrap an arbitrary JSON document.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Underlying JSON document.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
