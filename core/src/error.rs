// agrirent-flow/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Stage not found: {stage_name}")]
  StageNotFound { stage_name: String },

  #[error("Handler missing for non-optional stage: {stage_name}")]
  HandlerMissing { stage_name: String },

  #[error("Type mismatch while dispatching flow context (expected {expected_type}, stage: '{stage_name}')")]
  TypeMismatch {
    stage_name: String,
    expected_type: String,
  },

  #[error("Error in stage handler or backend call. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Configuration error for stage '{stage_name}': {message}")]
  ConfigurationError { stage_name: String, message: String },

  #[error("Internal flow error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for FlowError {
  fn from(err: AnyhowError) -> Self {
    FlowError::HandlerError { source: err }
  }
}

pub type FlowResult<T, E = FlowError> = std::result::Result<T, E>;
