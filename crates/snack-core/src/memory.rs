//! [`MemoryStore`] — an in-process [`DocumentStore`].
//!
//! Used by tests and by anything that wants the persistence contract without
//! a database. Ids are short and predictable: the first letter of the
//! collection name followed by a per-collection counter (`s1`, `s2`, and
//! `r1`, `r2` inside each `reviews` collection).

use std::{
  collections::HashMap,
  sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
  },
  time::Duration,
};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
  document::{CollectionPath, Document, DocumentPath, DocumentStore},
  field::FieldMap,
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("memory store is offline")]
  Offline,
}

#[derive(Default)]
struct State {
  /// Documents per collection, in insertion order.
  collections: HashMap<CollectionPath, Vec<Document>>,
  counters:    HashMap<CollectionPath, u64>,
}

#[derive(Default)]
struct Shared {
  state:   Mutex<State>,
  calls:   AtomicUsize,
  offline: AtomicBool,
}

/// Cloning is cheap; clones share the same documents.
#[derive(Clone, Default)]
pub struct MemoryStore {
  shared:  Arc<Shared>,
  latency: Option<Duration>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Delay every call by `latency` before it touches any data.
  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = Some(latency);
    self
  }

  /// While offline every call fails with [`MemoryError::Offline`].
  pub fn set_offline(&self, offline: bool) {
    self.shared.offline.store(offline, Ordering::SeqCst);
  }

  /// Number of store calls made so far, failed ones included.
  pub fn calls(&self) -> usize { self.shared.calls.load(Ordering::SeqCst) }

  /// Number of documents directly inside `collection`.
  pub async fn count(&self, collection: &CollectionPath) -> usize {
    let state = self.shared.state.lock().await;
    state.collections.get(collection).map_or(0, Vec::len)
  }

  async fn begin(&self) -> Result<(), MemoryError> {
    self.shared.calls.fetch_add(1, Ordering::SeqCst);
    if let Some(latency) = self.latency {
      tokio::time::sleep(latency).await;
    }
    if self.shared.offline.load(Ordering::SeqCst) {
      return Err(MemoryError::Offline);
    }
    Ok(())
  }
}

impl DocumentStore for MemoryStore {
  type Error = MemoryError;

  async fn create(
    &self,
    collection: CollectionPath,
    fields: FieldMap,
  ) -> Result<String, MemoryError> {
    self.begin().await?;
    let mut state = self.shared.state.lock().await;
    let State { collections, counters } = &mut *state;

    let prefix = collection.name().chars().next().unwrap_or('d');
    let counter = counters.entry(collection.clone()).or_default();
    let docs = collections.entry(collection).or_default();

    // Skip ids a caller already claimed through `set`.
    let id = loop {
      *counter += 1;
      let candidate = format!("{prefix}{counter}");
      if !docs.iter().any(|d| d.id == candidate) {
        break candidate;
      }
    };

    docs.push(Document { id: id.clone(), fields });
    Ok(id)
  }

  async fn set(&self, document: DocumentPath, fields: FieldMap) -> Result<(), MemoryError> {
    self.begin().await?;
    let mut state = self.shared.state.lock().await;
    let docs = state.collections.entry(document.parent()).or_default();

    match docs.iter_mut().find(|d| d.id == document.id()) {
      Some(existing) => existing.fields = fields,
      None => docs.push(Document { id: document.id().to_owned(), fields }),
    }
    Ok(())
  }

  async fn get(&self, document: DocumentPath) -> Result<Option<Document>, MemoryError> {
    self.begin().await?;
    let state = self.shared.state.lock().await;
    Ok(
      state
        .collections
        .get(&document.parent())
        .and_then(|docs| docs.iter().find(|d| d.id == document.id()))
        .cloned(),
    )
  }

  async fn get_all(&self, collection: CollectionPath) -> Result<Vec<Document>, MemoryError> {
    self.begin().await?;
    let state = self.shared.state.lock().await;
    Ok(state.collections.get(&collection).cloned().unwrap_or_default())
  }
}
