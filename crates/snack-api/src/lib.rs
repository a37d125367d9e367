//! JSON REST API for Snacktacular.
//!
//! Exposes an axum [`Router`] over [`SpotStore`] and [`ReviewStore`] for any
//! [`DocumentStore`]. The caller's identity arrives in the `x-user-id`
//! header (see [`identity`]); TLS and real authentication are the embedding
//! server's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", snack_api::api_router(state))
//! ```

pub mod error;
pub mod identity;
pub mod reviews;
pub mod spots;

use axum::{
  Router,
  routing::{get, put},
};
use snack_core::{
  document::DocumentStore,
  store::{ReviewStore, SpotStore},
};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<D> {
  pub spots:   SpotStore<D>,
  pub reviews: ReviewStore<D>,
}

impl<D> Clone for ApiState<D> {
  fn clone(&self) -> Self {
    Self {
      spots:   self.spots.clone(),
      reviews: self.reviews.clone(),
    }
  }
}

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<D>(state: ApiState<D>) -> Router<()>
where
  D: DocumentStore + 'static,
{
  Router::new()
    // Spots
    .route("/spots", get(spots::list::<D>).post(spots::create::<D>))
    .route("/spots/{id}", get(spots::get_one::<D>).put(spots::update::<D>))
    // Reviews
    .route(
      "/spots/{id}/reviews",
      get(reviews::list::<D>).post(reviews::create::<D>),
    )
    .route("/spots/{id}/reviews/{review_id}", put(reviews::update::<D>))
    .with_state(state)
}
