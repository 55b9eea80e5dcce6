//! Open-ended metadata bag attached to every record.
//!
//! Entities carry a JSON object of extension fields next to their typed core
//! columns. Two rules govern every reader and writer:
//!
//! - Absence of a key means "unset", never an error. Readers supply a literal
//!   default (empty string, `false`, `[]`) so the UI never renders a null.
//! - Writers overlay edits on top of the original map, so keys the UI does
//!   not know about survive a save untouched.
//!
//! The overlay also encodes the unset sentinels: an empty string or a `None`
//! number is omitted rather than written, so a partial update cannot clobber
//! a server-side value with an empty one, and an empty numeric input is
//! never coerced to zero.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// A record's extension fields: an open string-to-JSON mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    /// Empty bag.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap an existing JSON object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying JSON object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Raw value lookup; prefer the typed readers below.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    // -- Defaulted readers --------------------------------------------------

    /// String value, defaulting to `""` when absent or not a string.
    pub fn str_or_default(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        }
    }

    /// Boolean value, defaulting to `false` when absent or not a boolean.
    pub fn bool_or_default(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(Value::Bool(true)))
    }

    /// String-array value, defaulting to `[]`. Non-string elements are
    /// dropped rather than treated as an error.
    pub fn list_or_default(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Numeric value as `Some(f64)`, or `None` when absent or not numeric.
    /// "Not provided" and "zero" stay distinguishable.
    pub fn f64_opt(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }
}

// ---------------------------------------------------------------------------
// MetadataPatch
// ---------------------------------------------------------------------------

/// Builder that overlays edited keys on top of a record's original metadata.
///
/// Construct with [`MetadataPatch::over`], chain the typed setters, then
/// [`finish`](MetadataPatch::finish). Setters encode the unset sentinels:
///
/// - `str`: an empty string is omitted (the original value, if any, stands).
/// - `f64`: `None` is omitted; an empty numeric input never becomes `0`.
/// - `bool` / `string_list`: `false` / `[]` are written only when the key
///   already exists in the original, so an untouched default does not
///   materialize a key the record never had.
#[derive(Debug)]
pub struct MetadataPatch {
    map: Map<String, Value>,
    had_key: Metadata,
}

impl MetadataPatch {
    /// Start an overlay from the record's current metadata.
    pub fn over(base: &Metadata) -> Self {
        Self {
            map: base.0.clone(),
            had_key: base.clone(),
        }
    }

    /// Start from an empty bag (a brand-new record).
    pub fn empty() -> Self {
        Self {
            map: Map::new(),
            had_key: Metadata::new(),
        }
    }

    pub fn str(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.map.insert(key.to_string(), Value::String(value.to_string()));
        }
        self
    }

    pub fn bool(mut self, key: &str, value: bool) -> Self {
        if value || self.had_key.contains_key(key) {
            self.map.insert(key.to_string(), Value::Bool(value));
        }
        self
    }

    pub fn f64(mut self, key: &str, value: Option<f64>) -> Self {
        if let Some(n) = value {
            if let Some(num) = serde_json::Number::from_f64(n) {
                self.map.insert(key.to_string(), Value::Number(num));
            }
        }
        self
    }

    pub fn string_list(mut self, key: &str, values: &[String]) -> Self {
        if !values.is_empty() || self.had_key.contains_key(key) {
            let items = values.iter().cloned().map(Value::String).collect();
            self.map.insert(key.to_string(), Value::Array(items));
        }
        self
    }

    /// Raw JSON overlay for fields with no typed setter (opaque blobs such
    /// as rich-text HTML live behind `str`; this is for structured values).
    pub fn value(mut self, key: &str, value: Value) -> Self {
        self.map.insert(key.to_string(), value);
        self
    }

    pub fn finish(self) -> Metadata {
        Metadata(self.map)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
