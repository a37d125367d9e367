//! The `DocumentStore` trait and the paths it is addressed with.
//!
//! A document store is a tree of named collections. Each collection holds
//! field maps keyed by an id; each document may own sub-collections. Spots
//! live in `spots`, and a spot's reviews in `spots/{spot_id}/reviews`.
//!
//! Backends (`snack-store-sqlite`, [`crate::memory::MemoryStore`]) implement
//! the trait; [`crate::store`] builds the record-level contract on top of it.

use std::{fmt, future::Future};

use crate::{Error, Result, field::FieldMap};

// ─── Paths ───────────────────────────────────────────────────────────────────

fn check_segment(segment: &str) -> Result<()> {
  if segment.is_empty() || segment.contains('/') {
    return Err(Error::InvalidPath(segment.to_owned()));
  }
  Ok(())
}

/// Path to a collection: an odd number of segments, e.g. `spots` or
/// `spots/s1/reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath {
  segments: Vec<String>,
}

impl CollectionPath {
  /// A top-level collection.
  pub fn root(name: &str) -> Result<Self> {
    check_segment(name)?;
    Ok(Self { segments: vec![name.to_owned()] })
  }

  /// The document `id` inside this collection.
  pub fn doc(&self, id: &str) -> Result<DocumentPath> {
    check_segment(id)?;
    let mut segments = self.segments.clone();
    segments.push(id.to_owned());
    Ok(DocumentPath { segments })
  }

  /// Last segment, e.g. `reviews`.
  pub fn name(&self) -> &str {
    self.segments.last().map(String::as_str).unwrap_or_default()
  }
}

impl fmt::Display for CollectionPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.segments.join("/"))
  }
}

/// Path to a single document: an even number of segments, e.g. `spots/s1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
  segments: Vec<String>,
}

impl DocumentPath {
  /// The collection this document lives in.
  pub fn parent(&self) -> CollectionPath {
    CollectionPath {
      segments: self.segments[..self.segments.len() - 1].to_vec(),
    }
  }

  /// The document's own id.
  pub fn id(&self) -> &str {
    self.segments.last().map(String::as_str).unwrap_or_default()
  }

  /// A sub-collection owned by this document.
  pub fn collection(&self, name: &str) -> Result<CollectionPath> {
    check_segment(name)?;
    let mut segments = self.segments.clone();
    segments.push(name.to_owned());
    Ok(CollectionPath { segments })
  }
}

impl fmt::Display for DocumentPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.segments.join("/"))
  }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// A stored field map together with the id the store knows it by.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
  pub id:     String,
  pub fields: FieldMap,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a remote document store.
///
/// Every call is one round trip that completes exactly once. There are no
/// transactions: two calls are never atomic with each other.
///
/// All methods return `Send` futures so stores can be shared across a
/// multi-threaded tokio runtime (e.g. behind axum).
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Add a new document to `collection` and return the id the store issued.
  fn create(
    &self,
    collection: CollectionPath,
    fields: FieldMap,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;

  /// Replace the whole document at `document`, creating it if absent.
  fn set(
    &self,
    document: DocumentPath,
    fields: FieldMap,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Fetch one document. Returns `None` if it does not exist.
  fn get(
    &self,
    document: DocumentPath,
  ) -> impl Future<Output = Result<Option<Document>, Self::Error>> + Send + '_;

  /// Fetch every document directly inside `collection`, in the store's
  /// order.
  fn get_all(
    &self,
    collection: CollectionPath,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + '_;
}
