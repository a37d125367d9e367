//! Integration tests for `SqliteDocumentStore` against an in-memory database.

use std::sync::Arc;

use snack_core::{
  document::{CollectionPath, DocumentStore},
  field::FieldMap,
  review::Review,
  session::StaticSession,
  spot::{Coordinate, Spot},
  store::{ReviewStore, SpotStore},
};

use crate::{Error, SqliteDocumentStore};

async fn store() -> SqliteDocumentStore {
  SqliteDocumentStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn spots() -> CollectionPath { CollectionPath::root("spots").unwrap() }

// ─── Raw documents ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get() {
  let s = store().await;
  let fields = FieldMap::new().with("name", "Cafe A").with("latitude", 10.0);

  let id = s.create(spots(), fields.clone()).await.unwrap();
  let doc = s.get(spots().doc(&id).unwrap()).await.unwrap().unwrap();

  assert_eq!(doc.id, id);
  assert_eq!(doc.fields, fields);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  let result = s.get(spots().doc("missing").unwrap()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn set_overwrites_whole_document() {
  let s = store().await;
  let id = s
    .create(spots(), FieldMap::new().with("name", "a").with("address", "x"))
    .await
    .unwrap();

  s.set(spots().doc(&id).unwrap(), FieldMap::new().with("name", "b"))
    .await
    .unwrap();

  let doc = s.get(spots().doc(&id).unwrap()).await.unwrap().unwrap();
  assert_eq!(doc.fields.string("name"), Some("b"));
  assert!(!doc.fields.contains_key("address"));
}

#[tokio::test]
async fn set_on_unknown_id_creates_it() {
  let s = store().await;
  s.set(spots().doc("chosen").unwrap(), FieldMap::new())
    .await
    .unwrap();

  let all = s.get_all(spots()).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].id, "chosen");
}

#[tokio::test]
async fn get_all_keeps_insertion_order_across_updates() {
  let s = store().await;
  let first = s.create(spots(), FieldMap::new()).await.unwrap();
  let second = s.create(spots(), FieldMap::new()).await.unwrap();
  s.set(spots().doc(&first).unwrap(), FieldMap::new().with("name", "edited"))
    .await
    .unwrap();

  let ids: Vec<_> = s
    .get_all(spots())
    .await
    .unwrap()
    .into_iter()
    .map(|d| d.id)
    .collect();
  assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn collections_do_not_leak_into_each_other() {
  let s = store().await;
  let spot_id = s.create(spots(), FieldMap::new()).await.unwrap();
  let reviews = spots().doc(&spot_id).unwrap().collection("reviews").unwrap();
  s.create(reviews.clone(), FieldMap::new().with("title", "Great"))
    .await
    .unwrap();

  assert_eq!(s.get_all(spots()).await.unwrap().len(), 1);
  assert_eq!(s.get_all(reviews).await.unwrap().len(), 1);
}

#[tokio::test]
async fn non_finite_field_is_rejected_and_nothing_is_written() {
  let s = store().await;
  let fields = FieldMap::new().with("averageRating", f64::NAN);

  let err = s.create(spots(), fields.clone()).await.unwrap_err();
  assert!(matches!(err, Error::NonFiniteField(ref key) if key == "averageRating"));

  let err = s.set(spots().doc("s1").unwrap(), fields).await.unwrap_err();
  assert!(matches!(err, Error::NonFiniteField(_)));

  assert!(s.get_all(spots()).await.unwrap().is_empty());
}

#[tokio::test]
async fn spot_with_nan_rating_fails_to_save() {
  let spots = SpotStore::new(Arc::new(store().await));
  let mut spot = Spot::new("Cafe A", "1 Main St", Coordinate::new(10.0, 20.0));
  spot.average_rating = f64::NAN;

  let err = spots
    .save(&StaticSession::signed_in("user-1"), &spot)
    .await
    .unwrap_err();

  assert!(err.is_transport());
  assert!(spots.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn reopening_a_file_keeps_documents() {
  let path = std::env::temp_dir().join(format!(
    "snack-store-{}.sqlite",
    uuid::Uuid::new_v4().simple()
  ));

  let id = {
    let s = SqliteDocumentStore::open(&path).await.unwrap();
    s.create(spots(), FieldMap::new().with("name", "Cafe A"))
      .await
      .unwrap()
  };

  let s = SqliteDocumentStore::open(&path).await.unwrap();
  let doc = s.get(spots().doc(&id).unwrap()).await.unwrap().unwrap();
  assert_eq!(doc.fields.string("name"), Some("Cafe A"));

  drop(s);
  let _ = std::fs::remove_file(&path);
}

// ─── Record stores on SQLite ─────────────────────────────────────────────────

#[tokio::test]
async fn spot_and_review_round_trip() {
  let shared = Arc::new(store().await);
  let spots = SpotStore::new(shared.clone());
  let reviews = ReviewStore::new(shared);
  let session = StaticSession::signed_in("user-1");

  let spot = spots
    .save(
      &session,
      &Spot::new("Cafe A", "1 Main St", Coordinate::new(10.0, 20.0)),
    )
    .await
    .unwrap();
  assert!(spot.is_persisted());

  let mut review = Review::new(&session);
  review.title = "Great".into();
  review.text = "Loved it".into();
  review.rating = 5;
  let saved = reviews.save(&review, &spot).await.unwrap();

  let listed = reviews.load_all(&spot).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].document_id, saved.document_id);
  assert_eq!(listed[0].title, "Great");
  assert_eq!(listed[0].rating, 5);

  let loaded = spots.load(&spot.document_id).await.unwrap().unwrap();
  assert_eq!(loaded, spot);
  assert_eq!(spots.load_all().await.unwrap().len(), 1);
}
