// agrirent-flow/src/flow/definition.rs

//! The `Flow<TData, Err>` struct and its structural edits.

use crate::core::context::Handler;
use crate::core::step::{SkipCondition, StageDef};
use crate::error::{FlowError, FlowResult};
use std::collections::HashMap;

/// An ordered set of stages run against a shared `FlowContext<TData>`.
///
/// `Err` is the error type handlers return; it must be constructible from
/// `FlowError` so engine-level failures (e.g. a missing handler) surface through
/// the same type.
pub struct Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) stages: Vec<StageDef<TData>>,

  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Builds a flow from `(name, optional, skip_if)` triples, in run order.
  pub fn new(stage_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let stages = stage_defs
      .iter()
      .map(|(name, optional, skip_if)| StageDef::new(*name, *optional, skip_if.clone()))
      .collect();

    Self {
      stages,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn stage_names(&self) -> Vec<&str> {
    self.stages.iter().map(|s| s.name.as_str()).collect()
  }

  pub fn has_stage(&self, stage_name: &str) -> bool {
    self.stages.iter().any(|s| s.name == stage_name)
  }

  /// Panics when the stage is unknown. Registering a hook on a misspelled
  /// stage is a setup bug, not a runtime condition.
  pub(crate) fn ensure_stage_exists(&self, stage_name: &str) {
    if !self.has_stage(stage_name) {
      panic!("Flow setup error: stage '{}' not found in flow definition.", stage_name);
    }
  }

  fn position_of(&self, stage_name: &str) -> FlowResult<usize> {
    self
      .stages
      .iter()
      .position(|s| s.name == stage_name)
      .ok_or_else(|| FlowError::StageNotFound {
        stage_name: stage_name.to_string(),
      })
  }

  fn check_new_name(&self, stage_name: &str) -> FlowResult<()> {
    if self.has_stage(stage_name) {
      return Err(FlowError::ConfigurationError {
        stage_name: stage_name.to_string(),
        message: "a stage with this name already exists".to_string(),
      });
    }
    Ok(())
  }

  pub fn insert_before_stage<S: Into<String>>(
    &mut self,
    existing_stage: &str,
    new_stage: S,
    optional: bool,
    skip_if: Option<SkipCondition<TData>>,
  ) -> FlowResult<()> {
    let idx = self.position_of(existing_stage)?;
    let name: String = new_stage.into();
    self.check_new_name(&name)?;
    self.stages.insert(idx, StageDef::new(name, optional, skip_if));
    Ok(())
  }

  pub fn insert_after_stage<S: Into<String>>(
    &mut self,
    existing_stage: &str,
    new_stage: S,
    optional: bool,
    skip_if: Option<SkipCondition<TData>>,
  ) -> FlowResult<()> {
    let idx = self.position_of(existing_stage)?;
    let name: String = new_stage.into();
    self.check_new_name(&name)?;
    self.stages.insert(idx + 1, StageDef::new(name, optional, skip_if));
    Ok(())
  }

  /// Removes the stage and every hook registered on it. Unknown names are a no-op.
  pub fn remove_stage(&mut self, stage_name: &str) {
    if let Ok(idx) = self.position_of(stage_name) {
      self.stages.remove(idx);
      self.before.remove(stage_name);
      self.on.remove(stage_name);
      self.after.remove(stage_name);
    }
  }

  pub fn set_optional(&mut self, stage_name: &str, optional: bool) -> FlowResult<()> {
    let idx = self.position_of(stage_name)?;
    self.stages[idx].optional = optional;
    Ok(())
  }

  pub fn set_skip_condition(&mut self, stage_name: &str, skip_if: Option<SkipCondition<TData>>) -> FlowResult<()> {
    let idx = self.position_of(stage_name)?;
    self.stages[idx].skip_if = skip_if;
    Ok(())
  }
}
