//! Handlers for `/spots` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/spots` | Every spot |
//! | `POST` | `/spots` | Body: [`SpotBody`]; needs `x-user-id`; returns 201 + saved spot |
//! | `GET`  | `/spots/:id` | 404 if not found |
//! | `PUT`  | `/spots/:id` | Body: [`SpotPatch`]; needs `x-user-id`; 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use snack_core::{
  document::DocumentStore,
  spot::{Coordinate, Spot},
};

use crate::{ApiState, error::ApiError, identity::Identity};

/// The user-editable part of a spot. Aggregates, owner and id are never
/// taken from the client.
#[derive(Debug, Deserialize)]
pub struct SpotBody {
  #[serde(default)]
  pub name:      String,
  #[serde(default)]
  pub address:   String,
  #[serde(default)]
  pub latitude:  f64,
  #[serde(default)]
  pub longitude: f64,
}

impl SpotBody {
  fn apply_to(self, spot: &mut Spot) {
    spot.name = self.name;
    spot.address = self.address;
    spot.coordinate = Coordinate::new(self.latitude, self.longitude);
  }
}

/// A partial edit: only the fields present in the body change.
#[derive(Debug, Default, Deserialize)]
pub struct SpotPatch {
  pub name:      Option<String>,
  pub address:   Option<String>,
  pub latitude:  Option<f64>,
  pub longitude: Option<f64>,
}

impl SpotPatch {
  fn apply_to(self, spot: &mut Spot) {
    if let Some(name) = self.name {
      spot.name = name;
    }
    if let Some(address) = self.address {
      spot.address = address;
    }
    if let Some(latitude) = self.latitude {
      spot.coordinate.latitude = latitude;
    }
    if let Some(longitude) = self.longitude {
      spot.coordinate.longitude = longitude;
    }
  }
}

/// Load a spot or fail with 404.
pub(crate) async fn require_spot<D: DocumentStore>(
  state: &ApiState<D>,
  id: &str,
) -> Result<Spot, ApiError> {
  state
    .spots
    .load(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("spot {id} not found")))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /spots`
pub async fn list<D: DocumentStore>(
  State(state): State<ApiState<D>>,
) -> Result<Json<Vec<Spot>>, ApiError> {
  Ok(Json(state.spots.load_all().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /spots`
pub async fn create<D: DocumentStore>(
  State(state): State<ApiState<D>>,
  Identity(session): Identity,
  Json(body): Json<SpotBody>,
) -> Result<impl IntoResponse, ApiError> {
  let mut spot = Spot::default();
  body.apply_to(&mut spot);
  let saved = state.spots.save(&session, &spot).await?;
  Ok((StatusCode::CREATED, Json(saved)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /spots/:id`
pub async fn get_one<D: DocumentStore>(
  State(state): State<ApiState<D>>,
  Path(id): Path<String>,
) -> Result<Json<Spot>, ApiError> {
  Ok(Json(require_spot(&state, &id).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /spots/:id`
pub async fn update<D: DocumentStore>(
  State(state): State<ApiState<D>>,
  Identity(session): Identity,
  Path(id): Path<String>,
  Json(patch): Json<SpotPatch>,
) -> Result<Json<Spot>, ApiError> {
  let mut spot = require_spot(&state, &id).await?;
  patch.apply_to(&mut spot);
  Ok(Json(state.spots.save(&session, &spot).await?))
}
