//! [`SpotStore`] and [`ReviewStore`] — the record-level persistence contract.
//!
//! Both stores decide between create and update purely from the in-memory
//! record: an empty `document_id` means create, anything else is a full
//! overwrite at that id. No server-side existence check is made.
//!
//! Saves never mutate the caller's record. On success they return a copy
//! carrying whatever the save assigned (`document_id`, `posting_user_id`); on
//! failure the caller's record is exactly as it was.
//!
//! Every store call is bounded by a timeout that surfaces as
//! [`Error::Transport`]. Nothing is retried and nothing is cached.

use std::{future::Future, sync::Arc, time::Duration};

use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  document::{CollectionPath, Document, DocumentStore},
  error::Timeout,
  review::Review,
  session::Session,
  spot::{CoordinateDecode, Spot},
};

/// Top-level collection holding every spot.
pub const SPOTS: &str = "spots";
/// Per-spot sub-collection holding that spot's reviews.
pub const REVIEWS: &str = "reviews";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Await one store call under `timeout`, folding both failure modes into
/// [`Error::Transport`].
async fn round_trip<T, E>(
  timeout: Duration,
  call: impl Future<Output = Result<T, E>>,
) -> Result<T>
where
  E: std::error::Error + Send + Sync + 'static,
{
  match tokio::time::timeout(timeout, call).await {
    Ok(Ok(value)) => Ok(value),
    Ok(Err(e)) => Err(Error::transport(e)),
    Err(_) => Err(Error::transport(Timeout(timeout))),
  }
}

fn spots() -> Result<CollectionPath> { CollectionPath::root(SPOTS) }

/// The review collection of a saved spot.
fn reviews_of(spot: &Spot) -> Result<CollectionPath> {
  if !spot.is_persisted() {
    return Err(Error::InvalidArgument(
      "spot must be saved before it can be reviewed".into(),
    ));
  }
  spots()?.doc(&spot.document_id)?.collection(REVIEWS)
}

// ─── Spots ───────────────────────────────────────────────────────────────────

/// Saves and loads [`Spot`]s in the top-level `spots` collection.
pub struct SpotStore<D> {
  store:       Arc<D>,
  timeout:     Duration,
  coordinates: CoordinateDecode,
}

impl<D> Clone for SpotStore<D> {
  fn clone(&self) -> Self {
    Self {
      store:       Arc::clone(&self.store),
      timeout:     self.timeout,
      coordinates: self.coordinates,
    }
  }
}

impl<D: DocumentStore> SpotStore<D> {
  pub fn new(store: Arc<D>) -> Self {
    Self {
      store,
      timeout: DEFAULT_TIMEOUT,
      coordinates: CoordinateDecode::default(),
    }
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// How loaded spots rebuild their coordinate.
  pub fn with_coordinate_decode(mut self, coordinates: CoordinateDecode) -> Self {
    self.coordinates = coordinates;
    self
  }

  /// Create or overwrite `spot`, owned by the session's user.
  ///
  /// Fails with [`Error::Unauthenticated`] before touching the store when the
  /// session has no identity.
  pub async fn save<S>(&self, session: &S, spot: &Spot) -> Result<Spot>
  where
    S: Session + ?Sized,
  {
    let Some(user_id) = session.current_user_id() else {
      warn!("refusing to save spot without a signed-in user");
      return Err(Error::Unauthenticated);
    };

    let mut saved = spot.clone();
    saved.posting_user_id = user_id.to_owned();
    let fields = saved.to_field_map();

    if saved.is_persisted() {
      let path = spots()?.doc(&saved.document_id)?;
      debug!(document = %path, "overwriting spot");
      round_trip(self.timeout, self.store.set(path.clone(), fields))
        .await
        .inspect_err(|e| warn!(document = %path, error = %e, "spot update failed"))?;
      info!(document = %path, "updated spot");
    } else {
      let collection = spots()?;
      debug!(collection = %collection, "creating spot");
      saved.document_id = round_trip(self.timeout, self.store.create(collection, fields))
        .await
        .inspect_err(|e| warn!(error = %e, "spot create failed"))?;
      info!(document_id = %saved.document_id, "added spot");
    }

    Ok(saved)
  }

  /// Load one spot by id. Returns `None` if it does not exist.
  pub async fn load(&self, document_id: &str) -> Result<Option<Spot>> {
    let path = spots()?.doc(document_id)?;
    let doc = round_trip(self.timeout, self.store.get(path)).await?;
    Ok(doc.map(|doc| self.decode(doc)))
  }

  /// Every spot, in the store's order.
  pub async fn load_all(&self) -> Result<Vec<Spot>> {
    let docs = round_trip(self.timeout, self.store.get_all(spots()?)).await?;
    debug!(count = docs.len(), "loaded spots");
    Ok(docs.into_iter().map(|doc| self.decode(doc)).collect())
  }

  fn decode(&self, doc: Document) -> Spot {
    let mut spot = Spot::from_field_map_with(&doc.fields, self.coordinates);
    spot.document_id = doc.id;
    spot
  }
}

// ─── Reviews ─────────────────────────────────────────────────────────────────

/// Saves and loads [`Review`]s in the `reviews` sub-collection of a spot.
pub struct ReviewStore<D> {
  store:   Arc<D>,
  timeout: Duration,
}

impl<D> Clone for ReviewStore<D> {
  fn clone(&self) -> Self {
    Self {
      store:   Arc::clone(&self.store),
      timeout: self.timeout,
    }
  }
}

impl<D: DocumentStore> ReviewStore<D> {
  pub fn new(store: Arc<D>) -> Self {
    Self { store, timeout: DEFAULT_TIMEOUT }
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Create or overwrite `review` under `spot`.
  ///
  /// Fails without any store call if `spot` has not been saved
  /// ([`Error::InvalidArgument`]) or the rating is out of range
  /// ([`Error::InvalidRating`]).
  pub async fn save(&self, review: &Review, spot: &Spot) -> Result<Review> {
    let collection = reviews_of(spot)?;
    review.validate()?;

    let mut saved = review.clone();
    let fields = saved.to_field_map();

    if saved.is_persisted() {
      let path = collection.doc(&saved.document_id)?;
      debug!(document = %path, "overwriting review");
      round_trip(self.timeout, self.store.set(path.clone(), fields))
        .await
        .inspect_err(|e| warn!(document = %path, error = %e, "review update failed"))?;
      info!(document = %path, "updated review");
    } else {
      debug!(collection = %collection, "creating review");
      saved.document_id = round_trip(self.timeout, self.store.create(collection, fields))
        .await
        .inspect_err(|e| warn!(spot = %spot.document_id, error = %e, "review create failed"))?;
      info!(spot = %spot.document_id, document_id = %saved.document_id, "added review");
    }

    Ok(saved)
  }

  /// Load one review of `spot`. Returns `None` if it does not exist.
  pub async fn load(&self, spot: &Spot, document_id: &str) -> Result<Option<Review>> {
    let path = reviews_of(spot)?.doc(document_id)?;
    let doc = round_trip(self.timeout, self.store.get(path)).await?;
    Ok(doc.map(decode_review))
  }

  /// Every review of `spot`, in the store's order. Always a fresh fetch.
  pub async fn load_all(&self, spot: &Spot) -> Result<Vec<Review>> {
    let collection = reviews_of(spot)?;
    let docs = round_trip(self.timeout, self.store.get_all(collection)).await?;
    debug!(spot = %spot.document_id, count = docs.len(), "loaded reviews");
    Ok(docs.into_iter().map(decode_review).collect())
  }
}

/// The stored fields never carry the id, so it comes from the store.
fn decode_review(doc: Document) -> Review {
  let mut review = Review::from_field_map(&doc.fields);
  review.document_id = doc.id;
  review
}
