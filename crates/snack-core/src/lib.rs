//! Core types and trait definitions for Snacktacular.
//!
//! Spots and their reviews are plain records that marshal to and from flat
//! field maps. They are persisted through the [`document::DocumentStore`]
//! trait, which storage backends implement. This crate has no HTTP or
//! database dependencies.

// Backends implement `DocumentStore` with plain `async fn`; the `Send` bounds
// live on the trait's signatures.
#![allow(async_fn_in_trait)]

pub mod document;
pub mod error;
pub mod field;
pub mod memory;
pub mod place;
pub mod review;
pub mod session;
pub mod spot;
pub mod store;

pub use error::{Error, Result};
