//! Filling a spot in from a places lookup or from the device's location.

use serde::{Deserialize, Serialize};

use crate::spot::{Coordinate, Spot};

pub const UNKNOWN_PLACE: &str = "Unknown Place";
pub const UNKNOWN_ADDRESS: &str = "Unknown Address";
/// Name given to a location fix the geocoder could not name.
pub const NAME_UNKNOWN: &str = "Name Unknown";

/// A selection returned by a places-autocomplete lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
  pub name:              Option<String>,
  pub formatted_address: Option<String>,
  pub coordinate:        Coordinate,
}

impl Spot {
  /// Overwrite name, address and coordinate with a picked place. Missing
  /// names and addresses become [`UNKNOWN_PLACE`] and [`UNKNOWN_ADDRESS`].
  pub fn apply_place(&mut self, place: Place) {
    self.name = place.name.unwrap_or_else(|| UNKNOWN_PLACE.to_owned());
    self.address = place
      .formatted_address
      .unwrap_or_else(|| UNKNOWN_ADDRESS.to_owned());
    self.coordinate = place.coordinate;
  }

  /// Seed a blank spot from a reverse-geocoded location fix. Leaves the spot
  /// alone if the user already entered a name or address. A missing name
  /// becomes [`NAME_UNKNOWN`]; a missing address stays empty.
  ///
  /// Returns whether anything was changed.
  pub fn apply_current_location(
    &mut self,
    name: Option<String>,
    address: Option<String>,
    coordinate: Coordinate,
  ) -> bool {
    if !self.name.is_empty() || !self.address.is_empty() {
      return false;
    }
    self.name = name.unwrap_or_else(|| NAME_UNKNOWN.to_owned());
    self.address = address.unwrap_or_default();
    self.coordinate = coordinate;
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn apply_place_uses_fallbacks() {
    let mut spot = Spot::default();
    spot.apply_place(Place {
      name:              None,
      formatted_address: None,
      coordinate:        Coordinate::new(42.33, -71.17),
    });

    assert_eq!(spot.name, UNKNOWN_PLACE);
    assert_eq!(spot.address, UNKNOWN_ADDRESS);
    assert_eq!(spot.coordinate, Coordinate::new(42.33, -71.17));
  }

  #[test]
  fn apply_place_overwrites_existing_fields() {
    let mut spot = Spot::new("Old", "Old St", Coordinate::default());
    spot.apply_place(Place {
      name:              Some("Cafe A".into()),
      formatted_address: Some("1 Main St".into()),
      coordinate:        Coordinate::new(10.0, 20.0),
    });
    assert_eq!(spot.name, "Cafe A");
    assert_eq!(spot.address, "1 Main St");
  }

  #[test]
  fn current_location_only_fills_blank_spots() {
    let here = || (Some("Here".to_owned()), Some("2 Side St".to_owned()));

    let mut blank = Spot::default();
    let (name, address) = here();
    assert!(blank.apply_current_location(name, address, Coordinate::new(1.0, 1.0)));
    assert_eq!(blank.name, "Here");
    assert_eq!(blank.address, "2 Side St");

    let mut named = Spot::new("Mine", "", Coordinate::default());
    let (name, address) = here();
    assert!(!named.apply_current_location(name, address, Coordinate::new(1.0, 1.0)));
    assert_eq!(named.name, "Mine");
    assert_eq!(named.coordinate, Coordinate::default());
  }

  #[test]
  fn current_location_without_a_name_is_name_unknown() {
    let mut blank = Spot::default();
    assert!(blank.apply_current_location(None, None, Coordinate::new(42.33, -71.17)));

    assert_eq!(blank.name, NAME_UNKNOWN);
    assert_eq!(blank.address, "");
    assert_eq!(blank.coordinate, Coordinate::new(42.33, -71.17));
  }
}
