//! Handlers for `/spots/:id/reviews` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/spots/:id/reviews` | 404 if the spot does not exist |
//! | `POST` | `/spots/:id/reviews` | Body: [`ReviewBody`]; author from `x-user-id`; returns 201 |
//! | `PUT`  | `/spots/:id/reviews/:review_id` | Body: [`ReviewBody`]; re-dates the review |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use snack_core::{document::DocumentStore, review::Review};

use crate::{ApiState, error::ApiError, identity::Identity, spots::require_spot};

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
  #[serde(default)]
  pub title:  String,
  #[serde(default)]
  pub text:   String,
  pub rating: i64,
}

impl ReviewBody {
  fn apply_to(self, review: &mut Review) {
    review.title = self.title;
    review.text = self.text;
    review.rating = self.rating;
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /spots/:id/reviews`
pub async fn list<D: DocumentStore>(
  State(state): State<ApiState<D>>,
  Path(id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
  let spot = require_spot(&state, &id).await?;
  Ok(Json(state.reviews.load_all(&spot).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /spots/:id/reviews`
pub async fn create<D: DocumentStore>(
  State(state): State<ApiState<D>>,
  Identity(session): Identity,
  Path(id): Path<String>,
  Json(body): Json<ReviewBody>,
) -> Result<impl IntoResponse, ApiError> {
  let spot = require_spot(&state, &id).await?;
  let mut review = Review::new(&session);
  body.apply_to(&mut review);
  let saved = state.reviews.save(&review, &spot).await?;
  Ok((StatusCode::CREATED, Json(saved)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /spots/:id/reviews/:review_id`
pub async fn update<D: DocumentStore>(
  State(state): State<ApiState<D>>,
  Path((id, review_id)): Path<(String, String)>,
  Json(body): Json<ReviewBody>,
) -> Result<Json<Review>, ApiError> {
  let spot = require_spot(&state, &id).await?;
  let mut review = state
    .reviews
    .load(&spot, &review_id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("review {review_id} not found")))?;
  body.apply_to(&mut review);
  review.date = Utc::now();
  Ok(Json(state.reviews.save(&review, &spot).await?))
}
