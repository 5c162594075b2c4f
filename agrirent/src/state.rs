// agrirent/src/state.rs

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::flows;
use crate::sessions::SessionStore;
use crate::store::{DocumentStore, FsObjectStorage, MemoryDocumentStore, MemoryObjectStorage, ObjectStorage, PgDocumentStore};
use agrirent_flow::FlowRegistry;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
  pub documents: Arc<dyn DocumentStore>,
  pub objects: Arc<dyn ObjectStorage>,
  pub sessions: Arc<SessionStore>,
  pub flows: Arc<FlowRegistry<AppError>>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Wires the given backends and registers every form flow.
  pub fn new(config: AppConfig, documents: Arc<dyn DocumentStore>, objects: Arc<dyn ObjectStorage>) -> Self {
    let registry = FlowRegistry::<AppError>::new();
    flows::register_all_flows(&registry);
    Self {
      documents,
      objects,
      sessions: Arc::new(SessionStore::new()),
      flows: Arc::new(registry),
      config: Arc::new(config),
    }
  }

  pub fn in_memory(config: AppConfig) -> Self {
    let objects = Arc::new(MemoryObjectStorage::new(config.app_base_url.clone()));
    Self::new(config, Arc::new(MemoryDocumentStore::new()), objects)
  }

  /// Picks Postgres and/or filesystem storage when configured, memory otherwise.
  pub async fn from_config(config: AppConfig) -> Result<Self> {
    let documents: Arc<dyn DocumentStore> = match &config.database_url {
      Some(url) => {
        let store = PgDocumentStore::connect(url).await?;
        store.ensure_schema().await?;
        Arc::new(store)
      }
      None => {
        info!("DATABASE_URL not set; using the in-memory document store.");
        Arc::new(MemoryDocumentStore::new())
      }
    };
    let objects: Arc<dyn ObjectStorage> = match &config.storage_dir {
      Some(dir) => Arc::new(FsObjectStorage::new(dir.clone(), config.app_base_url.clone())),
      None => {
        info!("STORAGE_DIR not set; using in-memory object storage.");
        Arc::new(MemoryObjectStorage::new(config.app_base_url.clone()))
      }
    };
    Ok(Self::new(config, documents, objects))
  }
}
