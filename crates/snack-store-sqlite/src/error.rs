//! Error type for `snack-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// JSON has no NaN or infinity; storing one would read back as `null`.
  #[error("field {0:?} holds a non-finite number")]
  NonFiniteField(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
