// agrirent/src/store/fs.rs

use super::{check_object_path, object_url, ObjectStorage, StoreError, StoreResult, StoredObject};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{event, instrument, Level};

/// Object storage rooted at a local directory. The content type is derived
/// from the file extension when serving.
#[derive(Debug, Clone)]
pub struct FsObjectStorage {
  root: PathBuf,
  base_url: String,
}

impl FsObjectStorage {
  pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
    Self {
      root: root.into(),
      base_url: base_url.into(),
    }
  }

  fn resolve(&self, path: &str) -> StoreResult<PathBuf> {
    check_object_path(path)?;
    Ok(path.split('/').fold(self.root.clone(), |acc, seg| acc.join(seg)))
  }
}

pub fn content_type_for(path: &str) -> &'static str {
  match path.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
    Some("jpg") | Some("jpeg") => "image/jpeg",
    Some("png") => "image/png",
    Some("webp") => "image/webp",
    _ => "application/octet-stream",
  }
}

#[async_trait]
impl ObjectStorage for FsObjectStorage {
  #[instrument(name = "FsObjectStorage::upload", skip(self, bytes), fields(size = bytes.len()), err(Display))]
  async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<()> {
    let target = self.resolve(path)?;
    if let Some(parent) = target.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&target, bytes).await?;
    event!(Level::DEBUG, target = %target.display(), "Object written.");
    Ok(())
  }

  async fn download_url(&self, path: &str) -> StoreResult<String> {
    let target = self.resolve(path)?;
    if !tokio::fs::try_exists(&target).await? {
      return Err(StoreError::NotFound {
        collection: "objects".to_string(),
        id: path.to_string(),
      });
    }
    Ok(object_url(&self.base_url, path))
  }

  async fn fetch(&self, path: &str) -> StoreResult<Option<StoredObject>> {
    let target = self.resolve(path)?;
    match tokio::fs::read(&target).await {
      Ok(bytes) => Ok(Some(StoredObject {
        bytes,
        content_type: content_type_for(path).to_string(),
      })),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn upload_then_fetch_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FsObjectStorage::new(dir.path(), "http://files.test");

    storage
      .upload("equipment/1-abcd1234.png", vec![9, 8, 7], "image/png")
      .await
      .unwrap();
    assert!(dir.path().join("equipment").join("1-abcd1234.png").exists());

    let url = storage.download_url("equipment/1-abcd1234.png").await.unwrap();
    assert_eq!(url, "http://files.test/files/equipment/1-abcd1234.png");

    let object = storage.fetch("equipment/1-abcd1234.png").await.unwrap().unwrap();
    assert_eq!(object.bytes, vec![9, 8, 7]);
    assert_eq!(object.content_type, "image/png");
    assert!(storage.fetch("equipment/missing.jpg").await.unwrap().is_none());
  }

  #[tokio::test]
  async fn traversal_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FsObjectStorage::new(dir.path(), "http://files.test");
    let err = storage.upload("../outside.jpg", vec![1], "image/jpeg").await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidPath(_)));
  }

  #[test]
  fn content_types_follow_extension() {
    assert_eq!(content_type_for("a/b.JPG"), "image/jpeg");
    assert_eq!(content_type_for("a/b.webp"), "image/webp");
    assert_eq!(content_type_for("a/b"), "application/octet-stream");
  }
}
