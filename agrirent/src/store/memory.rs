// agrirent/src/store/memory.rs

//! In-process adapters. Used when no `DATABASE_URL`/`STORAGE_DIR` is configured
//! and by the test-suite.

use super::{
  check_object_path, new_document_id, object_url, Document, DocumentStore, Fields, ObjectStorage, StoreError,
  StoreResult, StoredObject,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{event, Level};

/// Collections are insertion-ordered vectors, which gives `fetch_all` the
/// same oldest-first order as the Postgres adapter.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
  collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn count(&self, collection: &str) -> usize {
    self.collections.read().get(collection).map_or(0, Vec::len)
  }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
  async fn fetch_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
    Ok(self.collections.read().get(collection).cloned().unwrap_or_default())
  }

  async fn fetch_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
    Ok(
      self
        .collections
        .read()
        .get(collection)
        .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()),
    )
  }

  async fn fetch_where_eq(&self, collection: &str, field: &str, value: &Value) -> StoreResult<Vec<Document>> {
    Ok(
      self
        .collections
        .read()
        .get(collection)
        .map(|docs| {
          docs
            .iter()
            .filter(|d| d.fields.get(field) == Some(value))
            .cloned()
            .collect()
        })
        .unwrap_or_default(),
    )
  }

  async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String> {
    let id = new_document_id();
    self
      .collections
      .write()
      .entry(collection.to_string())
      .or_default()
      .push(Document { id: id.clone(), fields });
    event!(Level::DEBUG, collection, id = %id, "Document created in memory store.");
    Ok(id)
  }

  async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
    let mut collections = self.collections.write();
    let doc = collections
      .get_mut(collection)
      .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
      .ok_or_else(|| StoreError::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
      })?;
    doc.fields.extend(fields);
    Ok(())
  }

  async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
    if let Some(docs) = self.collections.write().get_mut(collection) {
      docs.retain(|d| d.id != id);
    }
    Ok(())
  }
}

#[derive(Debug)]
pub struct MemoryObjectStorage {
  base_url: String,
  objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryObjectStorage {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      objects: RwLock::new(HashMap::new()),
    }
  }

  pub fn paths(&self) -> Vec<String> {
    let mut paths: Vec<String> = self.objects.read().keys().cloned().collect();
    paths.sort();
    paths
  }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
  async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<()> {
    check_object_path(path)?;
    self.objects.write().insert(
      path.to_string(),
      StoredObject {
        bytes,
        content_type: content_type.to_string(),
      },
    );
    Ok(())
  }

  async fn download_url(&self, path: &str) -> StoreResult<String> {
    check_object_path(path)?;
    if !self.objects.read().contains_key(path) {
      return Err(StoreError::NotFound {
        collection: "objects".to_string(),
        id: path.to_string(),
      });
    }
    Ok(object_url(&self.base_url, path))
  }

  async fn fetch(&self, path: &str) -> StoreResult<Option<StoredObject>> {
    check_object_path(path)?;
    Ok(self.objects.read().get(path).cloned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn fields(pairs: &[(&str, Value)]) -> Fields {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
  }

  #[tokio::test]
  async fn created_documents_are_fetched_in_insertion_order() {
    let store = MemoryDocumentStore::new();
    let a = store.create("equipment", fields(&[("name", json!("Tractor A"))])).await.unwrap();
    let b = store.create("equipment", fields(&[("name", json!("Baler B"))])).await.unwrap();

    let ids: Vec<String> = store.fetch_all("equipment").await.unwrap().into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![a, b]);
    assert!(store.fetch_all("labourers").await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn equality_filter_matches_exact_values() {
    let store = MemoryDocumentStore::new();
    store.create("equipment", fields(&[("userId", json!("U1"))])).await.unwrap();
    store.create("equipment", fields(&[("userId", json!("U2"))])).await.unwrap();

    let mine = store.fetch_where_eq("equipment", "userId", &json!("U1")).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].fields["userId"], json!("U1"));
  }

  #[tokio::test]
  async fn update_merges_and_rejects_missing_documents() {
    let store = MemoryDocumentStore::new();
    let id = store
      .create("equipment", fields(&[("name", json!("Plow")), ("price", json!("40"))]))
      .await
      .unwrap();
    store.update("equipment", &id, fields(&[("price", json!("45"))])).await.unwrap();

    let doc = store.fetch_by_id("equipment", &id).await.unwrap().unwrap();
    assert_eq!(doc.fields["name"], json!("Plow"));
    assert_eq!(doc.fields["price"], json!("45"));

    let missing = store.update("equipment", "nope", Fields::new()).await;
    assert!(matches!(missing, Err(StoreError::NotFound { .. })));
  }

  #[tokio::test]
  async fn delete_is_idempotent() {
    let store = MemoryDocumentStore::new();
    let id = store.create("equipment", Fields::new()).await.unwrap();
    store.delete("equipment", &id).await.unwrap();
    store.delete("equipment", &id).await.unwrap();
    assert_eq!(store.count("equipment"), 0);
  }

  #[tokio::test]
  async fn objects_get_urls_only_after_upload() {
    let storage = MemoryObjectStorage::new("http://localhost:8080");
    assert!(storage.download_url("equipment/a.jpg").await.is_err());

    storage.upload("equipment/a.jpg", vec![1, 2, 3], "image/jpeg").await.unwrap();
    assert_eq!(
      storage.download_url("equipment/a.jpg").await.unwrap(),
      "http://localhost:8080/files/equipment/a.jpg"
    );
    let object = storage.fetch("equipment/a.jpg").await.unwrap().unwrap();
    assert_eq!(object.bytes, vec![1, 2, 3]);
    assert!(storage.upload("../escape.jpg", vec![], "image/jpeg").await.is_err());
  }
}
