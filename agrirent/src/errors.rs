// agrirent/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use agrirent_flow::FlowError;
use serde_json::json;
use thiserror::Error;

use crate::forms::FieldError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
  /// A form failed its rule table. Raised before any backend call.
  #[error("Validation Error: {message}")]
  Validation { message: String, fields: Vec<FieldError> },

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Payload Too Large: {0}")]
  PayloadTooLarge(String),

  #[error("Document Store Error: {0}")]
  Store(StoreError),

  #[error("Object Storage Error: {0}")]
  Storage(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Flow Engine Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),

  #[error("The request was halted before its flow finished.")]
  FlowHalted,
}

impl AppError {
  pub fn validation(fields: Vec<FieldError>) -> Self {
    let message = match fields.as_slice() {
      [only] => only.message.clone(),
      _ => format!("{} fields need attention", fields.len()),
    };
    AppError::Validation { message, fields }
  }

  /// A request body or query string that could not be decoded. No field is
  /// attributed.
  pub fn malformed_request(message: impl Into<String>) -> Self {
    AppError::Validation {
      message: message.into(),
      fields: Vec::new(),
    }
  }

  /// Single-field validation failure.
  pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
    Self::validation(vec![FieldError::new(field, message)])
  }

  fn kind(&self) -> &'static str {
    match self {
      AppError::Validation { .. } => "validation",
      AppError::Auth(_) => "auth",
      AppError::Forbidden(_) => "forbidden",
      AppError::NotFound(_) => "not_found",
      AppError::PayloadTooLarge(_) => "payload_too_large",
      AppError::Store(_) => "store",
      AppError::Storage(_) => "storage",
      AppError::Config(_) => "config",
      AppError::Sqlx(_) => "database",
      AppError::Workflow { .. } => "workflow",
      AppError::Internal(_) => "internal",
      AppError::FlowHalted => "halted",
    }
  }
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::NotFound { collection, id } => AppError::NotFound(format!("No document '{}' in '{}'.", id, collection)),
      other => AppError::Store(other),
    }
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<StoreError>() {
      Ok(store_err) => AppError::from(store_err),
      Err(other) => AppError::Internal(format!("{:#}", other)),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation { .. } => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
      AppError::FlowHalted => StatusCode::CONFLICT,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    let message = match self {
      AppError::Validation { message, .. } => message.clone(),
      AppError::Auth(m) | AppError::Forbidden(m) | AppError::NotFound(m) | AppError::PayloadTooLarge(m) => m.clone(),
      AppError::Store(e) => e.to_string(),
      AppError::Storage(m) | AppError::Config(m) | AppError::Internal(m) => m.clone(),
      AppError::Sqlx(e) => e.to_string(),
      AppError::Workflow { source } => {
        tracing::error!(flow_error_source = ?source, "Workflow error details");
        source.to_string()
      }
      AppError::FlowHalted => self.to_string(),
    };

    let mut body = json!({ "error": self.kind(), "message": message });
    if let AppError::Validation { fields, .. } = self {
      body["fields"] = json!(fields);
    }
    HttpResponse::build(self.status_code()).json(body)
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn store_not_found_maps_to_404() {
    let err = AppError::from(StoreError::NotFound {
      collection: "equipment".to_string(),
      id: "gone".to_string(),
    });
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
  }

  #[test]
  fn backend_messages_are_kept_raw() {
    let err = AppError::from(StoreError::Backend("permission-denied".to_string()));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.to_string().contains("permission-denied"));
  }

  #[test]
  fn validation_message_names_single_field() {
    let err = AppError::invalid_field("price", "Price must be a number.");
    match &err {
      AppError::Validation { message, fields } => {
        assert_eq!(message, "Price must be a number.");
        assert_eq!(fields.len(), 1);
      }
      other => panic!("unexpected {:?}", other),
    }
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn anyhow_wrapping_a_store_error_is_unwrapped() {
    let wrapped = anyhow::Error::new(StoreError::NotFound {
      collection: "users".to_string(),
      id: "U9".to_string(),
    });
    assert!(matches!(AppError::from(wrapped), AppError::NotFound(_)));
  }
}
