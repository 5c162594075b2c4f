// agrirent/src/store/mod.rs

//! Ports to the backend services the marketplace delegates to.
//!
//! `DocumentStore` is a schemaless collection/document database (create,
//! fetch, equality filter, merge-update, delete). `ObjectStorage` holds uploaded
//! images and hands out download URLs. Both have in-memory adapters for tests
//! and local runs; production uses `PgDocumentStore` and `FsObjectStorage`.

pub mod fs;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use fs::FsObjectStorage;
pub use memory::{MemoryDocumentStore, MemoryObjectStorage};
pub use postgres::PgDocumentStore;

pub mod collections {
  pub const EQUIPMENT: &str = "equipment";
  pub const LABOURERS: &str = "labourers";
  pub const USERS: &str = "users";
}

/// Top-level fields of a stored document. The id is kept outside the map.
pub type Fields = serde_json::Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("No document '{id}' in collection '{collection}'")]
  NotFound { collection: String, id: String },

  #[error("{0}")]
  Backend(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Document (de)serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Invalid object path '{0}'")]
  InvalidPath(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
  pub id: String,
  pub fields: Fields,
}

impl Document {
  /// Decodes into a model whose `id` field receives the document id.
  pub fn decode<T: DeserializeOwned>(self) -> StoreResult<T> {
    let mut fields = self.fields;
    fields.insert("id".to_string(), Value::String(self.id));
    Ok(serde_json::from_value(Value::Object(fields))?)
  }
}

/// Serializes a model into document fields, dropping its `id`.
pub fn encode<T: Serialize>(value: &T) -> StoreResult<Fields> {
  match serde_json::to_value(value)? {
    Value::Object(mut fields) => {
      fields.remove("id");
      Ok(fields)
    }
    other => Err(StoreError::Backend(format!(
      "expected a JSON object for a document, got {}",
      other
    ))),
  }
}

pub fn decode_all<T: DeserializeOwned>(docs: Vec<Document>) -> StoreResult<Vec<T>> {
  docs.into_iter().map(Document::decode).collect()
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
  /// Every document in the collection, oldest first.
  async fn fetch_all(&self, collection: &str) -> StoreResult<Vec<Document>>;

  async fn fetch_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

  /// Documents whose top-level `field` equals `value`, oldest first.
  async fn fetch_where_eq(&self, collection: &str, field: &str, value: &Value) -> StoreResult<Vec<Document>>;

  /// Stores a new document under a generated id and returns that id.
  async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String>;

  /// Merges `fields` into an existing document. `NotFound` when it is absent.
  async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()>;

  /// Removes the document. Deleting an absent id succeeds.
  async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
  pub bytes: Vec<u8>,
  pub content_type: String,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
  async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<()>;

  /// Public URL of an uploaded object. `NotFound` when nothing is stored at `path`.
  async fn download_url(&self, path: &str) -> StoreResult<String>;

  async fn fetch(&self, path: &str) -> StoreResult<Option<StoredObject>>;
}

/// Relative, slash-separated, no empty or `..` segments.
pub(crate) fn check_object_path(path: &str) -> StoreResult<()> {
  let valid = !path.is_empty()
    && !path.starts_with('/')
    && !path.contains('\\')
    && path.split('/').all(|seg| !seg.is_empty() && seg != "." && seg != "..");
  if valid {
    Ok(())
  } else {
    Err(StoreError::InvalidPath(path.to_string()))
  }
}

pub(crate) fn object_url(base_url: &str, path: &str) -> String {
  format!("{}/files/{}", base_url.trim_end_matches('/'), path)
}

pub(crate) fn new_document_id() -> String {
  uuid::Uuid::new_v4().simple().to_string()
}
