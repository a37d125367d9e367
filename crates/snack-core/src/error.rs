//! Error types for `snack-core`.

use std::time::Duration;

use thiserror::Error;

/// A boxed error coming out of a storage backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  /// The document store failed or did not answer in time.
  #[error("transport error: {0}")]
  Transport(#[source] BoxError),

  /// No user identity was available when saving a spot.
  #[error("no authenticated user; cannot save")]
  Unauthenticated,

  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("rating {0} is outside 1..=5")]
  InvalidRating(i64),

  #[error("invalid document path: {0:?}")]
  InvalidPath(String),
}

impl Error {
  pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Transport(Box::new(err))
  }

  pub fn is_transport(&self) -> bool { matches!(self, Self::Transport(_)) }
}

/// A store call exceeded its deadline. Always reported inside
/// [`Error::Transport`].
#[derive(Debug, Error)]
#[error("store operation timed out after {0:?}")]
pub struct Timeout(pub Duration);

pub type Result<T, E = Error> = std::result::Result<T, E>;
