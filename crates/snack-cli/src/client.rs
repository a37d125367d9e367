//! Async HTTP client wrapping the Snacktacular JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use snack_core::{review::Review, spot::Spot};

/// Connection settings for the API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  /// Sent as `x-user-id`; empty means anonymous.
  pub user_id:  String,
}

/// Editable spot fields, as the API accepts them.
#[derive(Debug, Clone, Serialize)]
pub struct SpotBody {
  pub name:      String,
  pub address:   String,
  pub latitude:  f64,
  pub longitude: f64,
}

impl From<&Spot> for SpotBody {
  fn from(spot: &Spot) -> Self {
    Self {
      name:      spot.name.clone(),
      address:   spot.address.clone(),
      latitude:  spot.coordinate.latitude,
      longitude: spot.coordinate.longitude,
    }
  }
}

/// Editable review fields, as the API accepts them.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewBody {
  pub title:  String,
  pub text:   String,
  pub rating: i64,
}

/// Async HTTP client for the JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn identify(&self, req: RequestBuilder) -> RequestBuilder {
    if self.config.user_id.is_empty() {
      req
    } else {
      req.header("x-user-id", &self.config.user_id)
    }
  }

  async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<T> {
    let resp = self
      .identify(req)
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    tracing::debug!(status = %resp.status(), "{what}");
    decode(resp, what).await
  }

  // ── Spots ─────────────────────────────────────────────────────────────────

  /// `GET /api/spots`
  pub async fn list_spots(&self) -> Result<Vec<Spot>> {
    self
      .send(self.client.get(self.url("/spots")), "GET /spots")
      .await
  }

  /// `GET /api/spots/:id`
  pub async fn get_spot(&self, id: &str) -> Result<Spot> {
    self
      .send(self.client.get(self.url(&format!("/spots/{id}"))), "GET /spots/:id")
      .await
  }

  /// `POST /api/spots`
  pub async fn create_spot(&self, body: &SpotBody) -> Result<Spot> {
    self
      .send(self.client.post(self.url("/spots")).json(body), "POST /spots")
      .await
  }

  /// `PUT /api/spots/:id`
  pub async fn update_spot(&self, id: &str, body: &SpotBody) -> Result<Spot> {
    self
      .send(
        self.client.put(self.url(&format!("/spots/{id}"))).json(body),
        "PUT /spots/:id",
      )
      .await
  }

  // ── Reviews ───────────────────────────────────────────────────────────────

  /// `GET /api/spots/:id/reviews`
  pub async fn list_reviews(&self, spot_id: &str) -> Result<Vec<Review>> {
    self
      .send(
        self.client.get(self.url(&format!("/spots/{spot_id}/reviews"))),
        "GET /spots/:id/reviews",
      )
      .await
  }

  /// `POST /api/spots/:id/reviews`
  pub async fn create_review(&self, spot_id: &str, body: &ReviewBody) -> Result<Review> {
    self
      .send(
        self
          .client
          .post(self.url(&format!("/spots/{spot_id}/reviews")))
          .json(body),
        "POST /spots/:id/reviews",
      )
      .await
  }

  /// `PUT /api/spots/:id/reviews/:review_id`
  pub async fn update_review(
    &self,
    spot_id: &str,
    review_id: &str,
    body: &ReviewBody,
  ) -> Result<Review> {
    self
      .send(
        self
          .client
          .put(self.url(&format!("/spots/{spot_id}/reviews/{review_id}")))
          .json(body),
        "PUT /spots/:id/reviews/:review_id",
      )
      .await
  }
}

/// Turn a response into `T`, or into an error carrying the server's
/// `{"error": ...}` message.
async fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
  let status = resp.status();
  if status.is_success() {
    return resp
      .json()
      .await
      .with_context(|| format!("deserialising {what} response"));
  }

  let message = resp
    .json::<Value>()
    .await
    .ok()
    .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
    .unwrap_or_default();
  Err(anyhow!("{what} → {status} {message}"))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn client(base_url: &str) -> ApiClient {
    ApiClient::new(ApiConfig {
      base_url: base_url.into(),
      user_id:  String::new(),
    })
    .unwrap()
  }

  #[test]
  fn url_joins_without_double_slash() {
    assert_eq!(
      client("http://localhost:5240/").url("/spots"),
      "http://localhost:5240/api/spots"
    );
    assert_eq!(
      client("http://localhost:5240").url("/spots/s1/reviews"),
      "http://localhost:5240/api/spots/s1/reviews"
    );
  }
}
