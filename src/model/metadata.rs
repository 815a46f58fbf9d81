//! Document metadata map.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// Ordered metadata attached to a [`Document`](super::Document).
///
/// Keys iterate and serialize in sorted order, not insertion order: a
/// consumer sees `element_type` before `source`. Two loads of the same file
/// serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    entries: BTreeMap<String, MetadataValue>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries.get(key)
    }

    /// Get a string value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(MetadataValue::as_str)
    }

    /// Get an integer value by key.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.entries.get(key).and_then(MetadataValue::as_int)
    }

    /// Remove a value by key.
    pub fn remove(&mut self, key: &str) -> Option<MetadataValue> {
        self.entries.remove(key)
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Apply `other` on top of this map; `other` wins on collision.
    pub fn extend(&mut self, other: &Metadata) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, MetadataValue> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = (&'a String, &'a MetadataValue);
    type IntoIter = btree_map::Iter<'a, String, MetadataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<MetadataValue>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

/// A scalar metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Boolean flag
    Bool(bool),
    /// Integer (counts, indices)
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Text
    String(String),
}

impl MetadataValue {
    /// Get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            MetadataValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Bool(b) => write!(f, "{}", b),
            MetadataValue::Integer(n) => write!(f, "{}", n),
            MetadataValue::Float(x) => write!(f, "{}", x),
            MetadataValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<&String> for MetadataValue {
    fn from(value: &String) -> Self {
        MetadataValue::String(value.clone())
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Integer(value)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        MetadataValue::Integer(value.into())
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        MetadataValue::Integer(value.into())
    }
}

impl From<usize> for MetadataValue {
    fn from(value: usize) -> Self {
        MetadataValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_overrides_existing_keys() {
        let mut base: Metadata = [("source", "a.hwp"), ("loader", "x")].into_iter().collect();
        let mut overlay = Metadata::new();
        overlay.insert("loader", "custom");
        overlay.insert("team", "search");

        base.extend(&overlay);
        assert_eq!(base.get_str("loader"), Some("custom"));
        assert_eq!(base.get_str("team"), Some("search"));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn test_serializes_in_key_order() {
        let mut metadata = Metadata::new();
        metadata.insert("b", 2);
        metadata.insert("a", "x");
        metadata.insert("c", true);

        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, r#"{"a":"x","b":2,"c":true}"#);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_usize_saturates_at_i64_max() {
        assert_eq!(MetadataValue::from(7usize), MetadataValue::Integer(7));
        assert_eq!(
            MetadataValue::from(usize::MAX),
            MetadataValue::Integer(i64::MAX)
        );
    }

    #[test]
    fn test_deserialize_untagged_values() {
        let metadata: Metadata =
            serde_json::from_str(r#"{"n":3,"f":1.5,"s":"t","b":false}"#).unwrap();
        assert_eq!(metadata.get_int("n"), Some(3));
        assert_eq!(metadata.get("f"), Some(&MetadataValue::Float(1.5)));
        assert_eq!(metadata.get_str("s"), Some("t"));
        assert_eq!(metadata.get("b"), Some(&MetadataValue::Bool(false)));
    }
}
