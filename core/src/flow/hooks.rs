// agrirent-flow/src/flow/hooks.rs

//! Registration of `before`, `on` and `after` handlers.
//!
//! Handlers may return any error type that converts into the flow's `Err`, so a
//! stage can call a service returning `StoreError` and use `?` freely.

use crate::core::context::Handler;
use crate::core::context_data::FlowContext;
use crate::core::control::StageControl;
use crate::error::FlowError;
use crate::flow::definition::Flow;
use std::collections::HashMap;
use std::future::Future;

#[derive(Clone, Copy)]
enum Phase {
  Before,
  On,
  After,
}

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn phase_mut(&mut self, phase: Phase) -> &mut HashMap<String, Vec<Handler<TData, Err>>> {
    match phase {
      Phase::Before => &mut self.before,
      Phase::On => &mut self.on,
      Phase::After => &mut self.after,
    }
  }

  fn register<F, UserErr>(
    &mut self,
    phase: Phase,
    stage_name: &str,
    handler_fn: impl Fn(FlowContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<StageControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_stage_exists(stage_name);
    let handler: Handler<TData, Err> = Box::new(move |ctx| {
      let user_fut = handler_fn(ctx);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self
      .phase_mut(phase)
      .entry(stage_name.to_string())
      .or_default()
      .push(handler);
  }

  /// Runs before the stage's `on` handlers. Typically a precondition check.
  pub fn before_stage<F, UserErr>(
    &mut self,
    stage_name: &str,
    handler_fn: impl Fn(FlowContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<StageControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.register(Phase::Before, stage_name, handler_fn);
  }

  pub fn on_stage<F, UserErr>(
    &mut self,
    stage_name: &str,
    handler_fn: impl Fn(FlowContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<StageControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.register(Phase::On, stage_name, handler_fn);
  }

  pub fn after_stage<F, UserErr>(
    &mut self,
    stage_name: &str,
    handler_fn: impl Fn(FlowContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<StageControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.register(Phase::After, stage_name, handler_fn);
  }
}
