//! Opaque provider resources.
//!
//! The backend forwards provider objects (readers, intents, customers,
//! locations) without modeling their full shape. A [`Resource`] keeps the
//! raw JSON and exposes just the handful of fields the handlers read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single provider-side object, kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Value);

impl Resource {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The resource identifier, when the provider included one.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Client secret carried by intents.
    pub fn client_secret(&self) -> Option<&str> {
        self.0.get("client_secret").and_then(Value::as_str)
    }

    /// Short-lived secret carried by connection tokens.
    pub fn secret(&self) -> Option<&str> {
        self.0.get("secret").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// A provider list response; only `data` matters to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub data: Vec<Resource>,
}

impl ResourceList {
    pub fn new(data: Vec<Resource>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
