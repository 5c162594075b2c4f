// agrirent/src/store/postgres.rs

//! `DocumentStore` over a single JSONB table.
//!
//! ```sql
//! documents(collection TEXT, id TEXT, data JSONB, created_at TIMESTAMPTZ, PRIMARY KEY (collection, id))
//! ```
//! Equality filters compare `data -> field` against a JSONB value and updates
//! merge with `data || $patch`, matching the shallow-merge semantics of the
//! in-memory adapter.

use super::{new_document_id, Document, DocumentStore, Fields, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{event, instrument, Level};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS documents (
  collection TEXT NOT NULL,
  id TEXT NOT NULL,
  data JSONB NOT NULL DEFAULT '{}'::jsonb,
  created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
  PRIMARY KEY (collection, id)
)";

const CREATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS documents_collection_created_idx ON documents (collection, created_at)";

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
  pool: PgPool,
}

type DocumentRow = (String, Json<Fields>);

fn into_document((id, Json(fields)): DocumentRow) -> Document {
  Document { id, fields }
}

impl PgDocumentStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
    let pool = PgPool::connect(database_url).await?;
    event!(Level::INFO, "Connected to Postgres document store.");
    Ok(Self::new(pool))
  }

  /// Creates the `documents` table and its index when missing.
  #[instrument(name = "PgDocumentStore::ensure_schema", skip(self), err(Display))]
  pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
    sqlx::query(CREATE_INDEX).execute(&self.pool).await?;
    Ok(())
  }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
  #[instrument(name = "PgDocumentStore::fetch_all", skip(self), err(Display))]
  async fn fetch_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
    let rows: Vec<DocumentRow> =
      sqlx::query_as("SELECT id, data FROM documents WHERE collection = $1 ORDER BY created_at, id")
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;
    Ok(rows.into_iter().map(into_document).collect())
  }

  #[instrument(name = "PgDocumentStore::fetch_by_id", skip(self), err(Display))]
  async fn fetch_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
    let row: Option<DocumentRow> = sqlx::query_as("SELECT id, data FROM documents WHERE collection = $1 AND id = $2")
      .bind(collection)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(row.map(into_document))
  }

  #[instrument(name = "PgDocumentStore::fetch_where_eq", skip(self, value), err(Display))]
  async fn fetch_where_eq(&self, collection: &str, field: &str, value: &Value) -> StoreResult<Vec<Document>> {
    let rows: Vec<DocumentRow> = sqlx::query_as(
      "SELECT id, data FROM documents WHERE collection = $1 AND data -> $2 = $3 ORDER BY created_at, id",
    )
    .bind(collection)
    .bind(field)
    .bind(Json(value))
    .fetch_all(&self.pool)
    .await?;
    Ok(rows.into_iter().map(into_document).collect())
  }

  #[instrument(name = "PgDocumentStore::create", skip(self, fields), err(Display))]
  async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String> {
    let id = new_document_id();
    sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
      .bind(collection)
      .bind(&id)
      .bind(Json(&fields))
      .execute(&self.pool)
      .await?;
    Ok(id)
  }

  #[instrument(name = "PgDocumentStore::update", skip(self, fields), err(Display))]
  async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
    let result = sqlx::query("UPDATE documents SET data = data || $3 WHERE collection = $1 AND id = $2")
      .bind(collection)
      .bind(id)
      .bind(Json(&fields))
      .execute(&self.pool)
      .await?;
    if result.rows_affected() == 0 {
      return Err(StoreError::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
      });
    }
    Ok(())
  }

  #[instrument(name = "PgDocumentStore::delete", skip(self), err(Display))]
  async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
    sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
      .bind(collection)
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn fields(value: Value) -> Fields {
    match value {
      Value::Object(map) => map,
      _ => Fields::new(),
    }
  }

  /// Requires a reachable Postgres in `DATABASE_URL`:
  /// `DATABASE_URL=postgres://... cargo test -p agrirent -- --ignored`
  #[tokio::test]
  #[ignore]
  async fn jsonb_equality_filter_and_merge_update() {
    let Ok(url) = std::env::var("DATABASE_URL") else {
      eprintln!("DATABASE_URL not set; skipping.");
      return;
    };
    let store = PgDocumentStore::connect(&url).await.unwrap();
    store.ensure_schema().await.unwrap();
    let collection = format!("test_{}", new_document_id());

    let a = store
      .create(&collection, fields(json!({ "name": "Tractor A", "userId": "U1", "price": "100" })))
      .await
      .unwrap();
    store
      .create(&collection, fields(json!({ "name": "Baler B", "userId": "U2" })))
      .await
      .unwrap();

    let mine = store.fetch_where_eq(&collection, "userId", &json!("U1")).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, a);
    assert!(store.fetch_where_eq(&collection, "userId", &json!("U3")).await.unwrap().is_empty());

    store
      .update(&collection, &a, fields(json!({ "price": "120", "imageUrl": "x" })))
      .await
      .unwrap();
    let updated = store.fetch_by_id(&collection, &a).await.unwrap().unwrap();
    assert_eq!(updated.fields["name"], "Tractor A");
    assert_eq!(updated.fields["price"], "120");
    assert_eq!(updated.fields["imageUrl"], "x");

    let missing = store.update(&collection, "nope", fields(json!({ "price": "1" }))).await;
    assert!(matches!(missing, Err(StoreError::NotFound { .. })));

    for doc in store.fetch_all(&collection).await.unwrap() {
      store.delete(&collection, &doc.id).await.unwrap();
    }
    assert!(store.fetch_all(&collection).await.unwrap().is_empty());
  }
}
