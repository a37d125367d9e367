//! Spot — a food venue record.

use serde::{Deserialize, Serialize};

use crate::field::FieldMap;

// ─── Field names ─────────────────────────────────────────────────────────────

pub const NAME: &str = "name";
pub const ADDRESS: &str = "address";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const AVERAGE_RATING: &str = "averageRating";
pub const NUMBER_OF_REVIEWS: &str = "numberOfReviews";
pub const POSTING_USER_ID: &str = "postingUserID";
pub const DOCUMENT_ID: &str = "documentID";

// ─── Coordinate ──────────────────────────────────────────────────────────────

/// A WGS-84 position in degrees. The default `(0, 0)` stands for "unknown".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
  pub latitude:  f64,
  pub longitude: f64,
}

impl Coordinate {
  pub fn new(latitude: f64, longitude: f64) -> Self { Self { latitude, longitude } }
}

/// How [`Spot::from_field_map_with`] treats the stored latitude/longitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateDecode {
  /// Rebuild the coordinate from the stored latitude and longitude.
  #[default]
  Restore,
  /// Leave the coordinate at its default, as older clients did; the position
  /// is expected to come from a live location fix instead.
  Discard,
}

// ─── Spot ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spot {
  pub name:              String,
  pub address:           String,
  pub coordinate:        Coordinate,
  /// Declared aggregate over the spot's reviews; nothing here recomputes it.
  pub average_rating:    f64,
  pub number_of_reviews: i64,
  /// Owner; overwritten from the session on every save.
  pub posting_user_id:   String,
  /// Store-assigned id. Empty until the first successful create.
  pub document_id:       String,
}

impl Spot {
  pub fn new(name: impl Into<String>, address: impl Into<String>, coordinate: Coordinate) -> Self {
    Self {
      name: name.into(),
      address: address.into(),
      coordinate,
      ..Self::default()
    }
  }

  pub fn is_persisted(&self) -> bool { !self.document_id.is_empty() }

  pub fn latitude(&self) -> f64 { self.coordinate.latitude }

  pub fn longitude(&self) -> f64 { self.coordinate.longitude }

  pub fn to_field_map(&self) -> FieldMap {
    FieldMap::new()
      .with(NAME, self.name.as_str())
      .with(ADDRESS, self.address.as_str())
      .with(LATITUDE, self.latitude())
      .with(LONGITUDE, self.longitude())
      .with(AVERAGE_RATING, self.average_rating)
      .with(NUMBER_OF_REVIEWS, self.number_of_reviews)
      .with(POSTING_USER_ID, self.posting_user_id.as_str())
      .with(DOCUMENT_ID, self.document_id.as_str())
  }

  /// Decode with the default [`CoordinateDecode::Restore`] policy.
  pub fn from_field_map(map: &FieldMap) -> Self {
    Self::from_field_map_with(map, CoordinateDecode::default())
  }

  /// Rebuild a spot from a stored field map. Never fails: every missing or
  /// mistyped field falls back to its zero value.
  ///
  /// `documentID` is not read back; loaders set it from the store-assigned
  /// id instead.
  pub fn from_field_map_with(map: &FieldMap, coordinates: CoordinateDecode) -> Self {
    let coordinate = match coordinates {
      CoordinateDecode::Restore => Coordinate::new(
        map.double(LATITUDE).unwrap_or_default(),
        map.double(LONGITUDE).unwrap_or_default(),
      ),
      CoordinateDecode::Discard => Coordinate::default(),
    };

    Self {
      name: map.string(NAME).unwrap_or_default().to_owned(),
      address: map.string(ADDRESS).unwrap_or_default().to_owned(),
      coordinate,
      average_rating: map.double(AVERAGE_RATING).unwrap_or_default(),
      number_of_reviews: map.integer(NUMBER_OF_REVIEWS).unwrap_or_default(),
      posting_user_id: map.string(POSTING_USER_ID).unwrap_or_default().to_owned(),
      document_id: String::new(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::field::FieldValue;

  fn stored() -> FieldMap {
    FieldMap::new()
      .with(NAME, "Cafe A")
      .with(ADDRESS, "1 Main St")
      .with(LATITUDE, 10.0)
      .with(LONGITUDE, 20.0)
      .with(AVERAGE_RATING, 4.5)
      .with(NUMBER_OF_REVIEWS, 2_i64)
      .with(POSTING_USER_ID, "user-1")
      .with(DOCUMENT_ID, "s1")
  }

  #[test]
  fn empty_map_gives_zero_values() {
    let spot = Spot::from_field_map(&FieldMap::new());
    assert_eq!(spot, Spot::default());
    assert!(!spot.is_persisted());
  }

  #[test]
  fn mistyped_fields_default() {
    let map = FieldMap::new()
      .with(NAME, 7_i64)
      .with(LATITUDE, "north")
      .with(NUMBER_OF_REVIEWS, 2.0)
      .with(POSTING_USER_ID, FieldValue::Null);

    let spot = Spot::from_field_map(&map);
    assert_eq!(spot.name, "");
    assert_eq!(spot.coordinate.latitude, 0.0);
    assert_eq!(spot.number_of_reviews, 0);
    assert_eq!(spot.posting_user_id, "");
  }

  #[test]
  fn restore_rebuilds_coordinate() {
    let spot = Spot::from_field_map_with(&stored(), CoordinateDecode::Restore);
    assert_eq!(spot.coordinate, Coordinate::new(10.0, 20.0));
  }

  #[test]
  fn discard_keeps_default_coordinate() {
    let spot = Spot::from_field_map_with(&stored(), CoordinateDecode::Discard);
    assert_eq!(spot.coordinate, Coordinate::default());
    assert_eq!(spot.name, "Cafe A");
  }

  #[test]
  fn document_id_is_not_read_back() {
    let spot = Spot::from_field_map(&stored());
    assert_eq!(spot.document_id, "");
  }

  #[test]
  fn round_trip_reproduces_all_but_document_id() {
    let original = stored();
    let mut again = Spot::from_field_map(&original).to_field_map();

    assert_eq!(again.remove(DOCUMENT_ID), Some(FieldValue::from("")));
    let mut expected = original;
    expected.remove(DOCUMENT_ID);
    assert_eq!(again, expected);
  }

  #[test]
  fn round_trip_under_discard_loses_only_position() {
    let mut again =
      Spot::from_field_map_with(&stored(), CoordinateDecode::Discard).to_field_map();

    assert_eq!(again.double(LATITUDE), Some(0.0));
    assert_eq!(again.double(LONGITUDE), Some(0.0));
    assert_eq!(again.string(NAME), Some("Cafe A"));
    assert_eq!(again.double(AVERAGE_RATING), Some(4.5));
    assert_eq!(again.integer(NUMBER_OF_REVIEWS), Some(2));
    assert_eq!(again.remove(POSTING_USER_ID), Some(FieldValue::from("user-1")));
  }

  #[test]
  fn field_map_has_every_key() {
    let map = Spot::new("Cafe A", "1 Main St", Coordinate::new(1.0, 2.0)).to_field_map();
    let keys: Vec<_> = map.keys().collect();
    for key in [
      NAME,
      ADDRESS,
      LATITUDE,
      LONGITUDE,
      AVERAGE_RATING,
      NUMBER_OF_REVIEWS,
      POSTING_USER_ID,
      DOCUMENT_ID,
    ] {
      assert!(keys.contains(&key), "missing {key}");
    }
    assert_eq!(map.len(), 8);
  }
}
