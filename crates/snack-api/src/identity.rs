//! Caller identity, taken from the `x-user-id` request header.
//!
//! The header is trusted as-is. A missing or blank header is an anonymous
//! caller; whether that is acceptable is up to the operation.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use snack_core::session::StaticSession;

pub const USER_HEADER: &str = "x-user-id";

/// The request's session.
#[derive(Debug, Clone)]
pub struct Identity(pub StaticSession);

impl<S: Send + Sync> FromRequestParts<S> for Identity {
  type Rejection = Infallible;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let user_id = parts
      .headers
      .get(USER_HEADER)
      .and_then(|v| v.to_str().ok())
      .map(str::trim)
      .filter(|v| !v.is_empty())
      .map(str::to_owned);
    Ok(Self(StaticSession::from(user_id)))
  }
}
