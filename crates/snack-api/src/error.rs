//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error(transparent)]
  Core(#[from] snack_core::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    use snack_core::Error as Core;

    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Core(Core::Unauthenticated) => StatusCode::UNAUTHORIZED,
      ApiError::Core(
        Core::InvalidArgument(_) | Core::InvalidRating(_) | Core::InvalidPath(_),
      ) => StatusCode::BAD_REQUEST,
      ApiError::Core(Core::Transport(_)) => StatusCode::BAD_GATEWAY,
    };
    if status.is_server_error() {
      tracing::warn!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
