//! [`SqliteDocumentStore`] — the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use snack_core::{
  document::{CollectionPath, Document, DocumentPath, DocumentStore},
  field::FieldMap,
};
use tracing::debug;

use crate::{
  Result,
  encode::{RawDocument, encode_dt, encode_fields, new_document_id},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A document store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteDocumentStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteDocumentStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteDocumentStore {
  type Error = crate::Error;

  async fn create(&self, collection: CollectionPath, fields: FieldMap) -> Result<String> {
    let id             = new_document_id();
    let id_str         = id.clone();
    let collection_str = collection.to_string();
    let fields_json    = encode_fields(&fields)?;
    let now            = encode_dt(Utc::now());

    debug!(collection = %collection, document_id = %id, "insert document");
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (collection, document_id, fields_json, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?4)",
          rusqlite::params![collection_str, id_str, fields_json, now],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  async fn set(&self, document: DocumentPath, fields: FieldMap) -> Result<()> {
    let collection_str = document.parent().to_string();
    let id_str         = document.id().to_owned();
    let fields_json    = encode_fields(&fields)?;
    let now            = encode_dt(Utc::now());

    debug!(document = %document, "upsert document");
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (collection, document_id, fields_json, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?4)
           ON CONFLICT (collection, document_id)
           DO UPDATE SET fields_json = excluded.fields_json,
                         updated_at  = excluded.updated_at",
          rusqlite::params![collection_str, id_str, fields_json, now],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get(&self, document: DocumentPath) -> Result<Option<Document>> {
    let collection_str = document.parent().to_string();
    let id_str         = document.id().to_owned();

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT document_id, fields_json FROM documents
             WHERE collection = ?1 AND document_id = ?2",
            rusqlite::params![collection_str, id_str],
            |row| {
              Ok(RawDocument {
                document_id: row.get(0)?,
                fields_json: row.get(1)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawDocument::into_document).transpose()
  }

  async fn get_all(&self, collection: CollectionPath) -> Result<Vec<Document>> {
    let collection_str = collection.to_string();

    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT document_id, fields_json FROM documents
           WHERE collection = ?1
           ORDER BY seq",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![collection_str], |row| {
            Ok(RawDocument {
              document_id: row.get(0)?,
              fields_json: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    debug!(collection = %collection, count = raws.len(), "listed documents");
    raws.into_iter().map(RawDocument::into_document).collect()
  }
}
