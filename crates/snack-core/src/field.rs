//! Field maps — the flat key/value form records take in the document store.
//!
//! Decoding never fails. Each typed reader returns `None` when the key is
//! missing or holds a value of another type, and the record decoders pick the
//! zero value for that field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single stored value.
///
/// Serialised untagged, so a field map round-trips through plain JSON:
/// integral numbers become [`FieldValue::Integer`], anything with a fraction
/// or exponent becomes [`FieldValue::Double`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
  Null,
  Bool(bool),
  Integer(i64),
  Double(f64),
  String(String),
}

impl From<&str> for FieldValue {
  fn from(s: &str) -> Self { Self::String(s.to_owned()) }
}

impl From<String> for FieldValue {
  fn from(s: String) -> Self { Self::String(s) }
}

impl From<i64> for FieldValue {
  fn from(n: i64) -> Self { Self::Integer(n) }
}

impl From<f64> for FieldValue {
  fn from(n: f64) -> Self { Self::Double(n) }
}

impl From<bool> for FieldValue {
  fn from(b: bool) -> Self { Self::Bool(b) }
}

/// Field name → value. Ordered so serialised documents are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, FieldValue>);

impl FieldMap {
  pub fn new() -> Self { Self::default() }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
    self.0.insert(key.into(), value.into());
  }

  /// Builder-style [`FieldMap::insert`].
  pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
    self.insert(key, value);
    self
  }

  pub fn get(&self, key: &str) -> Option<&FieldValue> { self.0.get(key) }

  pub fn remove(&mut self, key: &str) -> Option<FieldValue> { self.0.remove(key) }

  pub fn contains_key(&self, key: &str) -> bool { self.0.contains_key(key) }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn keys(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }

  pub fn string(&self, key: &str) -> Option<&str> {
    match self.get(key)? {
      FieldValue::String(s) => Some(s),
      _ => None,
    }
  }

  /// Reads a float. Integers widen; nothing else converts.
  pub fn double(&self, key: &str) -> Option<f64> {
    match self.get(key)? {
      FieldValue::Double(n) => Some(*n),
      FieldValue::Integer(n) => Some(*n as f64),
      _ => None,
    }
  }

  /// Reads an integer. Floats are a type mismatch, even integral ones.
  pub fn integer(&self, key: &str) -> Option<i64> {
    match self.get(key)? {
      FieldValue::Integer(n) => Some(*n),
      _ => None,
    }
  }
}

impl FromIterator<(String, FieldValue)> for FieldMap {
  fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl IntoIterator for FieldMap {
  type Item = (String, FieldValue);
  type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;

  fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn readers_reject_mismatched_types() {
    let map = FieldMap::new()
      .with("name", 42_i64)
      .with("rating", 4.0)
      .with("flag", true);

    assert_eq!(map.string("name"), None);
    assert_eq!(map.integer("rating"), None);
    assert_eq!(map.double("flag"), None);
    assert_eq!(map.string("missing"), None);
  }

  #[test]
  fn double_reader_widens_integers() {
    let map = FieldMap::new().with("latitude", 10_i64);
    assert_eq!(map.double("latitude"), Some(10.0));
  }

  #[test]
  fn json_keeps_integer_and_double_apart() {
    let map = FieldMap::new()
      .with("numberOfReviews", 3_i64)
      .with("averageRating", 0.0)
      .with("name", "Cafe A");

    let json = serde_json::to_string(&map).unwrap();
    let back: FieldMap = serde_json::from_str(&json).unwrap();

    assert_eq!(back, map);
    assert_eq!(back.integer("numberOfReviews"), Some(3));
    assert_eq!(back.get("averageRating"), Some(&FieldValue::Double(0.0)));
  }

  #[test]
  fn json_null_decodes_to_null() {
    let back: FieldMap = serde_json::from_str(r#"{"name":null}"#).unwrap();
    assert_eq!(back.get("name"), Some(&FieldValue::Null));
    assert_eq!(back.string("name"), None);
  }
}
