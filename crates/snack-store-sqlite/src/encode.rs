//! Encoding and decoding between field maps and the text stored in SQLite.
//!
//! Field maps are stored as compact JSON objects, so NaN and infinite doubles
//! are refused rather than silently stored as `null`. Timestamps are RFC 3339
//! strings.

use chrono::{DateTime, Utc};
use snack_core::{
  document::Document,
  field::{FieldMap, FieldValue},
};
use uuid::Uuid;

use crate::{Error, Result};

pub fn encode_fields(fields: &FieldMap) -> Result<String> {
  if let Some((key, _)) = fields
    .iter()
    .find(|(_, v)| matches!(v, FieldValue::Double(n) if !n.is_finite()))
  {
    return Err(Error::NonFiniteField(key.to_owned()));
  }
  Ok(serde_json::to_string(fields)?)
}

pub fn decode_fields(s: &str) -> Result<FieldMap> { Ok(serde_json::from_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

/// A fresh document id: 32 lowercase hex digits.
pub fn new_document_id() -> String { Uuid::new_v4().simple().to_string() }

/// Raw strings read directly from a `documents` row.
pub struct RawDocument {
  pub document_id: String,
  pub fields_json: String,
}

impl RawDocument {
  pub fn into_document(self) -> Result<Document> {
    Ok(Document {
      id:     self.document_id,
      fields: decode_fields(&self.fields_json)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn document_ids_are_unique_hex() {
    let a = new_document_id();
    let b = new_document_id();
    assert_eq!(a.len(), 32);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, b);
  }

  #[test]
  fn fields_keep_their_types() {
    let fields = FieldMap::new()
      .with("latitude", 10.0)
      .with("numberOfReviews", 0_i64)
      .with("name", "Cafe A");

    let back = decode_fields(&encode_fields(&fields).unwrap()).unwrap();

    assert_eq!(back.get("latitude"), Some(&FieldValue::Double(10.0)));
    assert_eq!(back.get("numberOfReviews"), Some(&FieldValue::Integer(0)));
  }

  #[test]
  fn non_finite_doubles_are_refused() {
    for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
      let fields = FieldMap::new().with("name", "Cafe A").with("averageRating", n);
      let err = encode_fields(&fields).unwrap_err();
      assert!(matches!(err, Error::NonFiniteField(ref key) if key == "averageRating"));
    }
  }
}
