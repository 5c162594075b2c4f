// agrirent/src/services/media.rs

//! Listing images: decoding the base64 payload from a form and storing it
//! under `equipment/<millis>-<suffix>.<ext>`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::store::ObjectStorage;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageUpload {
  pub file_name: Option<String>,
  pub content_type: Option<String>,
  /// Base64 of the file contents. A `data:` URL prefix is accepted.
  pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
  pub bytes: Vec<u8>,
  pub content_type: &'static str,
  pub extension: &'static str,
}

impl ImageUpload {
  pub fn decode(&self) -> Result<DecodedImage> {
    let data = self.data.trim();
    let (declared_type, payload) = match data.strip_prefix("data:").and_then(|rest| rest.split_once(";base64,")) {
      Some((mime, payload)) => (Some(mime), payload),
      None => (self.content_type.as_deref(), data),
    };
    let bytes = STANDARD
      .decode(payload)
      .map_err(|e| AppError::invalid_field("image", format!("Image data is not valid base64: {}", e)))?;
    if bytes.is_empty() {
      return Err(AppError::invalid_field("image", "Image data is empty."));
    }
    let (content_type, extension) = image_kind(declared_type, self.file_name.as_deref());
    Ok(DecodedImage {
      bytes,
      content_type,
      extension,
    })
  }
}

/// PNG and WebP are kept as such; everything else is stored as JPEG.
fn image_kind(content_type: Option<&str>, file_name: Option<&str>) -> (&'static str, &'static str) {
  let from_name = file_name
    .and_then(|n| n.rsplit_once('.'))
    .map(|(_, ext)| ext.to_ascii_lowercase());
  match (content_type.map(str::to_ascii_lowercase).as_deref(), from_name.as_deref()) {
    (Some("image/png"), _) | (None, Some("png")) => ("image/png", "png"),
    (Some("image/webp"), _) | (None, Some("webp")) => ("image/webp", "webp"),
    _ => ("image/jpeg", "jpg"),
  }
}

pub fn object_path(now: DateTime<Utc>, extension: &str) -> String {
  let suffix = Uuid::new_v4().simple().to_string();
  format!("equipment/{}-{}.{}", now.timestamp_millis(), &suffix[..8], extension)
}

/// Uploads the image and returns its download URL.
#[instrument(name = "media::store_image", skip(storage, upload), err(Display))]
pub async fn store_image(storage: &dyn ObjectStorage, upload: &ImageUpload) -> Result<String> {
  let image = upload.decode()?;
  let path = object_path(Utc::now(), image.extension);
  storage
    .upload(&path, image.bytes, image.content_type)
    .await
    .map_err(|e| AppError::Storage(e.to_string()))?;
  let url = storage
    .download_url(&path)
    .await
    .map_err(|e| AppError::Storage(e.to_string()))?;
  info!(%path, "Image stored.");
  Ok(url)
}
