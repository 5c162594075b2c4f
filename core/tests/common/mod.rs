// tests/common/mod.rs
#![allow(dead_code)]

use agrirent_flow::{FlowContext, FlowError, Handler, StageControl};
use once_cell::sync::Lazy;
use tracing::Level;

/// Stand-in for a form submission: records which stages ran.
#[derive(Clone, Debug, Default)]
pub struct FormCtx {
  pub counter: i32,
  pub trail: String,
  pub stages_run: Vec<String>,
  pub halt_at: Option<String>,
  pub has_image: bool,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Flow engine error: {0}")]
  Flow(String),

  #[error("Stage failed: {0}")]
  Stage(String),
}

impl From<FlowError> for TestError {
  fn from(fe: FlowError) -> Self {
    TestError::Flow(format!("{:?}", fe))
  }
}

pub fn recording_handler(stage_name: &'static str, marker: &'static str) -> Handler<FormCtx, TestError> {
  Box::new(move |ctx: FlowContext<FormCtx>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.trail.push_str(marker);
      guard.stages_run.push(stage_name.to_string());
      tracing::debug!(target: "test_handlers", stage = stage_name, "ran, trail: '{}'", guard.trail);
      if guard.halt_at.as_deref() == Some(stage_name) {
        return Ok(StageControl::Halt);
      }
      Ok(StageControl::Continue)
    })
  })
}

pub fn failing_handler(stage_name: &'static str, message: &'static str) -> Handler<FormCtx, TestError> {
  Box::new(move |ctx: FlowContext<FormCtx>| {
    Box::pin(async move {
      ctx.write().stages_run.push(stage_name.to_string());
      tracing::warn!(target: "test_handlers", stage = stage_name, "failing with '{}'", message);
      Err(TestError::Stage(message.to_string()))
    })
  })
}

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
