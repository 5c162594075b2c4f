// agrirent/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// `None` selects the in-memory document store.
  pub database_url: Option<String>,
  /// `None` selects in-memory object storage.
  pub storage_dir: Option<PathBuf>,
  /// Prefix for download URLs handed out by object storage.
  pub app_base_url: String,
  pub password_min_length: usize,
  /// Largest accepted JSON body. Images travel base64-encoded inside forms.
  pub max_upload_bytes: usize,
  pub seed_db: bool,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: None,
      storage_dir: None,
      app_base_url: "http://127.0.0.1:8080".to_string(),
      password_min_length: 6,
      max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
      seed_db: false,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    let config = Self::from_lookup(|name| env::var(name).ok())?;
    tracing::info!(
      host = %config.server_host,
      port = config.server_port,
      postgres = config.database_url.is_some(),
      storage_dir = ?config.storage_dir,
      "Application configuration loaded."
    );
    Ok(config)
  }

  /// Builds the configuration from any variable source; `from_env` passes the
  /// process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let server_host = get("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get("SERVER_PORT")
      .unwrap_or_else(|| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get("DATABASE_URL");
    let storage_dir = get("STORAGE_DIR").map(PathBuf::from);
    let app_base_url = get("APP_BASE_URL")
      .unwrap_or_else(|| format!("http://{}:{}", server_host, server_port))
      .trim_end_matches('/')
      .to_string();

    let password_min_length = get("PASSWORD_MIN_LENGTH")
      .unwrap_or_else(|| "6".to_string())
      .parse::<usize>()
      .map_err(|e| AppError::Config(format!("Invalid PASSWORD_MIN_LENGTH: {}", e)))?;
    if password_min_length == 0 {
      return Err(AppError::Config("PASSWORD_MIN_LENGTH must be at least 1".to_string()));
    }

    let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
      Some(raw) => raw
        .parse::<usize>()
        .map_err(|e| AppError::Config(format!("Invalid MAX_UPLOAD_BYTES: {}", e)))?,
      None => DEFAULT_MAX_UPLOAD_BYTES,
    };
    if max_upload_bytes == 0 {
      return Err(AppError::Config("MAX_UPLOAD_BYTES must be at least 1".to_string()));
    }

    let seed_db = get("SEED_DB")
      .unwrap_or_else(|| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    Ok(Self {
      server_host,
      server_port,
      database_url,
      storage_dir,
      app_base_url,
      password_min_length,
      max_upload_bytes,
      seed_db,
    })
  }
}
