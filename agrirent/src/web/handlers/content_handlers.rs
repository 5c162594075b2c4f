// agrirent/src/web/handlers/content_handlers.rs

//! Read-only routes: health, navigation metadata, legal text and uploaded files.

use actix_web::{http::header, web, HttpResponse};
use serde_json::json;
use tracing::{debug, instrument};

use crate::content::{PRIVACY_POLICY, TERMS_OF_SERVICE};
use crate::errors::{AppError, Result};
use crate::navigation::{manifest, NavigationIntent};
use crate::state::AppState;
use crate::store::StoreError;
use crate::web::extractors::AuthenticatedUser;

pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn navigation_handler() -> HttpResponse {
  HttpResponse::Ok().json(manifest())
}

/// Where the splash screen goes once it finishes.
pub async fn splash_handler(user: Option<AuthenticatedUser>) -> HttpResponse {
  HttpResponse::Ok().json(json!({ "next": NavigationIntent::after_splash(user.is_some()) }))
}

pub async fn privacy_policy_handler() -> HttpResponse {
  HttpResponse::Ok().json(&PRIVACY_POLICY)
}

pub async fn terms_handler() -> HttpResponse {
  HttpResponse::Ok().json(&TERMS_OF_SERVICE)
}

#[instrument(name = "handler::file", skip(app_state))]
pub async fn file_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let object_path = path.into_inner();
  let fetched = match app_state.objects.fetch(&object_path).await {
    Err(StoreError::InvalidPath(_)) => None,
    other => other?,
  };
  match fetched {
    Some(object) => Ok(
      HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, object.content_type))
        .insert_header((header::CACHE_CONTROL, "public, max-age=86400"))
        .body(object.bytes),
    ),
    None => {
      debug!(path = %object_path, "Requested object does not exist.");
      Err(AppError::NotFound("File not found.".to_string()))
    }
  }
}
