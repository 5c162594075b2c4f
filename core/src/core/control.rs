// agrirent-flow/src/core/control.rs

//! Signals for controlling flow execution and the outcome of a run.

/// Returned by each handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageControl {
  /// Keep going: remaining handlers of this stage, then the next stage.
  Continue,
  /// Stop the whole flow now. Nothing further runs.
  Halt,
}

/// Outcome of a full flow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  /// Every stage that was not skipped ran to completion.
  Completed,
  /// A handler returned `StageControl::Halt`.
  Halted,
  /// The view that owned the run was dismissed before the flow finished;
  /// stages after that point were not executed.
  Dismissed,
}

impl FlowOutcome {
  pub fn is_completed(self) -> bool {
    matches!(self, FlowOutcome::Completed)
  }
}
