//! Request parameter normalization.
//!
//! Clients send JSON, form-encoded, or bare-text bodies; handlers only ever
//! see a [`ParamsMap`]. Parsing is content-type driven and strict for JSON:
//! a declared-JSON body that fails to parse is rejected rather than treated
//! as empty.

use serde_json::{Map, Value};

use crate::error::{BackendError, ParseBodyError};

/// Flat string-keyed parameter map backing every handler.
///
/// Values stay as raw JSON so nested objects (card options, addresses)
/// pass through to the provider untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamsMap(Map<String, Value>);

impl ParamsMap {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps an already-parsed JSON value. Non-objects carry no keys and
    /// normalize to an empty map.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scalar value rendered as a string; `None` for objects, arrays and null.
    pub fn scalar(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(scalar_to_string)
    }

    /// Like [`scalar`](Self::scalar) but treats an empty string as absent,
    /// so defaulted fields fall back instead of sending `""` upstream.
    pub fn text(&self, key: &str) -> Option<String> {
        self.scalar(key).filter(|s| !s.is_empty())
    }

    /// List of strings: accepts a JSON array of scalars or a single scalar.
    pub fn string_list(&self, key: &str) -> Option<Vec<String>> {
        match self.0.get(key) {
            Some(Value::Array(items)) => {
                Some(items.iter().filter_map(scalar_to_string).collect())
            }
            Some(other) => scalar_to_string(other).map(|s| vec![s]),
            None => None,
        }
    }

    /// Mandatory identifier: present and non-empty, or the request is a 400.
    pub fn required_str(&self, name: &'static str) -> Result<String, BackendError> {
        match self.0.get(name).and_then(scalar_to_string) {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(BackendError::MissingParam { name }),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parses a raw request body into a [`ParamsMap`] based on its content type.
///
/// - empty body: empty map, regardless of content type
/// - JSON: must parse; a non-object document has no keys and yields an empty map
/// - form-encoded: percent-decoded `key=value` pairs, last key wins
/// - anything else: the text lands under a single `raw` key
pub fn parse_body(body: &[u8], content_type: Option<&str>) -> Result<ParamsMap, ParseBodyError> {
    if body.is_empty() {
        return Ok(ParamsMap::new());
    }
    let content_type = content_type.unwrap_or("").to_ascii_lowercase();

    if content_type.contains("application/json") {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| ParseBodyError::InvalidJson)?;
        return Ok(ParamsMap::from_value(value));
    }

    if content_type.contains("application/x-www-form-urlencoded") {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_bytes(body).map_err(|_| ParseBodyError::InvalidForm)?;
        let mut params = ParamsMap::new();
        for (key, value) in pairs {
            params.insert(key, Value::String(value));
        }
        return Ok(params);
    }

    let mut params = ParamsMap::new();
    params.insert("raw", Value::String(String::from_utf8_lossy(body).into_owned()));
    Ok(params)
}
