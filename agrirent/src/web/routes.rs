// agrirent/src/web/routes.rs

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpRequest};
use tracing::warn;

use crate::errors::AppError;
use crate::web::handlers::{
  account_handlers, auth_handlers, content_handlers, equipment_handlers, labourer_handlers,
};

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
  warn!(path = %req.path(), error = %err, "Rejected JSON body.");
  let app_err = match err {
    JsonPayloadError::OverflowKnownLength { length, limit } => AppError::PayloadTooLarge(format!(
      "Request body is {} bytes; the limit is {} bytes.",
      length, limit
    )),
    JsonPayloadError::Overflow { limit } => {
      AppError::PayloadTooLarge(format!("Request body exceeds the limit of {} bytes.", limit))
    }
    JsonPayloadError::ContentType => AppError::malformed_request("Request body must be JSON."),
    JsonPayloadError::Deserialize(e) => AppError::malformed_request(format!("Invalid request body: {}", e)),
    other => AppError::malformed_request(other.to_string()),
  };
  app_err.into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::malformed_request(format!("Invalid query string: {}", err)).into()
}

/// Body and query extractor settings plus the full route table. Production
/// and tests mount the app through this.
pub fn configure_app(max_upload_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
  move |cfg| {
    cfg
      .app_data(web::JsonConfig::default().limit(max_upload_bytes).error_handler(json_error))
      .app_data(web::QueryConfig::default().error_handler(query_error));
    configure_app_routes(cfg);
  }
}

/// Mounts the JSON API under `/api/v1` and uploaded files under `/files`.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .service(
      web::scope("/api/v1")
        .route("/health", web::get().to(content_handlers::health_handler))
        .route("/navigation", web::get().to(content_handlers::navigation_handler))
        .route("/splash", web::get().to(content_handlers::splash_handler))
        .service(
          web::scope("/auth")
            .route("/signup", web::post().to(auth_handlers::signup_handler))
            .route("/signin", web::post().to(auth_handlers::signin_handler))
            .route("/signout", web::post().to(auth_handlers::signout_handler))
            .route("/me", web::get().to(auth_handlers::me_handler)),
        )
        .service(
          web::scope("/account")
            .route("/profile", web::put().to(account_handlers::edit_profile_handler))
            .route("/password", web::put().to(account_handlers::change_password_handler))
            .route("", web::delete().to(account_handlers::delete_account_handler)),
        )
        .service(
          web::scope("/equipment")
            .route("", web::get().to(equipment_handlers::list_equipment_handler))
            .route("", web::post().to(equipment_handlers::post_equipment_handler))
            // Before `/{id}` so "categories" is not taken for an id.
            .route("/categories", web::get().to(equipment_handlers::categories_handler))
            .route("/{id}", web::get().to(equipment_handlers::equipment_details_handler))
            .route("/{id}", web::put().to(equipment_handlers::edit_equipment_handler))
            .route("/{id}", web::delete().to(equipment_handlers::delete_equipment_handler))
            .route("/{id}/order", web::get().to(equipment_handlers::order_details_handler)),
        )
        .route("/my/equipment", web::get().to(equipment_handlers::my_equipment_handler))
        .service(
          web::scope("/labourers")
            .route("", web::get().to(labourer_handlers::list_labourers_handler))
            .route("", web::post().to(labourer_handlers::post_labourer_handler)),
        )
        .service(
          web::scope("/content")
            .route("/privacy", web::get().to(content_handlers::privacy_policy_handler))
            .route("/terms", web::get().to(content_handlers::terms_handler)),
        ),
    )
    .route("/files/{path:.*}", web::get().to(content_handlers::file_handler));
}
