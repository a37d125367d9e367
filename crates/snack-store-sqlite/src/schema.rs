//! SQL schema for the SQLite document store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Every document of every collection. `collection` is the slash-joined
-- collection path (e.g. 'spots' or 'spots/<id>/reviews'); `seq` preserves
-- insertion order for listings.
CREATE TABLE IF NOT EXISTS documents (
    seq          INTEGER PRIMARY KEY AUTOINCREMENT,
    collection   TEXT NOT NULL,
    document_id  TEXT NOT NULL,
    fields_json  TEXT NOT NULL,   -- FieldMap as a JSON object
    created_at   TEXT NOT NULL,   -- ISO 8601 UTC
    updated_at   TEXT NOT NULL,   -- ISO 8601 UTC
    UNIQUE (collection, document_id)
);

CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents(collection);

PRAGMA user_version = 1;
";
