//! Review — a user's rating and comment on one spot.
//!
//! A review does not name its spot in its own fields; it belongs to whichever
//! spot's `reviews` sub-collection it is stored in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, field::FieldMap, session::Session};

pub const TITLE: &str = "title";
pub const TEXT: &str = "text";
pub const RATING: &str = "rating";
pub const REVIEW_USER_ID: &str = "reviewUserID";
pub const DATE: &str = "date";

/// Accepted ratings, inclusive.
pub const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
  pub title:          String,
  pub text:           String,
  pub rating:         i64,
  pub review_user_id: String,
  pub date:           DateTime<Utc>,
  /// Id within the parent spot's review collection; empty until created.
  pub document_id:    String,
}

impl Review {
  /// A blank review authored by the session's user (or by nobody, if the
  /// session has no identity), dated now.
  pub fn new<S: Session + ?Sized>(session: &S) -> Self {
    Self {
      title:          String::new(),
      text:           String::new(),
      rating:         0,
      review_user_id: session.current_user_id().unwrap_or_default().to_owned(),
      date:           Utc::now(),
      document_id:    String::new(),
    }
  }

  pub fn is_persisted(&self) -> bool { !self.document_id.is_empty() }

  /// Fails with [`Error::InvalidRating`] unless the rating is within
  /// [`RATING_RANGE`].
  pub fn validate(&self) -> Result<()> {
    if RATING_RANGE.contains(&self.rating) {
      Ok(())
    } else {
      Err(Error::InvalidRating(self.rating))
    }
  }

  pub fn to_field_map(&self) -> FieldMap {
    FieldMap::new()
      .with(TITLE, self.title.as_str())
      .with(TEXT, self.text.as_str())
      .with(RATING, self.rating)
      .with(REVIEW_USER_ID, self.review_user_id.as_str())
      .with(DATE, encode_date(self.date))
  }

  /// Rebuild a review from a stored field map. Never fails; a missing or
  /// unusable `date` decodes to the Unix epoch.
  pub fn from_field_map(map: &FieldMap) -> Self {
    Self {
      title:          map.string(TITLE).unwrap_or_default().to_owned(),
      text:           map.string(TEXT).unwrap_or_default().to_owned(),
      rating:         map.integer(RATING).unwrap_or_default(),
      review_user_id: map.string(REVIEW_USER_ID).unwrap_or_default().to_owned(),
      date:           map.double(DATE).and_then(decode_date).unwrap_or_default(),
      document_id:    String::new(),
    }
  }
}

// ─── Dates ───────────────────────────────────────────────────────────────────

/// Seconds since the Unix epoch, fractional part included.
pub fn encode_date(date: DateTime<Utc>) -> f64 {
  date.timestamp() as f64 + f64::from(date.timestamp_subsec_nanos()) / 1e9
}

/// Inverse of [`encode_date`]; `None` for NaN, infinities and values chrono
/// cannot represent.
pub fn decode_date(seconds: f64) -> Option<DateTime<Utc>> {
  if !seconds.is_finite() {
    return None;
  }
  let whole = seconds.floor();
  if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
    return None;
  }
  let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
  DateTime::from_timestamp(whole as i64, nanos)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::session::StaticSession;

  #[test]
  fn new_captures_session_user() {
    let review = Review::new(&StaticSession::signed_in("user-9"));
    assert_eq!(review.review_user_id, "user-9");
    assert_eq!(review.rating, 0);
    assert!(!review.is_persisted());

    let anonymous = Review::new(&StaticSession::anonymous());
    assert_eq!(anonymous.review_user_id, "");
  }

  #[test]
  fn empty_map_gives_zero_values() {
    let review = Review::from_field_map(&FieldMap::new());
    assert_eq!(review.title, "");
    assert_eq!(review.text, "");
    assert_eq!(review.rating, 0);
    assert_eq!(review.review_user_id, "");
    assert_eq!(review.date, DateTime::<Utc>::UNIX_EPOCH);
    assert_eq!(review.document_id, "");
  }

  #[test]
  fn date_is_stored_as_epoch_seconds() {
    let date = Utc.with_ymd_and_hms(2022, 4, 11, 12, 30, 0).unwrap();
    let review = Review {
      title: "Great".into(),
      text: "Loved it".into(),
      rating: 5,
      review_user_id: "u1".into(),
      date,
      document_id: String::new(),
    };

    let map = review.to_field_map();
    assert_eq!(map.double(DATE), Some(date.timestamp() as f64));
    assert_eq!(Review::from_field_map(&map), review);
  }

  #[test]
  fn unusable_dates_decode_to_epoch() {
    for map in [
      FieldMap::new().with(DATE, "yesterday"),
      FieldMap::new().with(DATE, f64::NAN),
      FieldMap::new().with(DATE, 1e300),
    ] {
      assert_eq!(Review::from_field_map(&map).date, DateTime::<Utc>::UNIX_EPOCH);
    }
  }

  #[test]
  fn integer_dates_are_accepted() {
    let map = FieldMap::new().with(DATE, 86_400_i64);
    let date = Review::from_field_map(&map).date;
    assert_eq!(date, Utc.with_ymd_and_hms(1970, 1, 2, 0, 0, 0).unwrap());
  }

  #[test]
  fn fractional_seconds_survive() {
    let date = decode_date(1.5).unwrap();
    assert_eq!(date.timestamp_subsec_millis(), 500);
    assert_eq!(encode_date(date), 1.5);
  }

  #[test]
  fn out_of_range_ratings_decode_but_do_not_validate() {
    let review = Review::from_field_map(&FieldMap::new().with(RATING, 9_i64));
    assert_eq!(review.rating, 9);
    assert!(matches!(review.validate(), Err(Error::InvalidRating(9))));

    let mut ok = review;
    ok.rating = 1;
    assert!(ok.validate().is_ok());
  }
}
