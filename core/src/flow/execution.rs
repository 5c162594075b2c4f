// agrirent-flow/src/flow/execution.rs

//! `Flow::run` and `Flow::run_within`.

use crate::core::context::Handler;
use crate::core::context_data::FlowContext;
use crate::core::control::{FlowOutcome, StageControl};
use crate::core::lifetime::ViewLifetime;
use crate::error::FlowError;
use crate::flow::definition::Flow;
use tracing::{event, instrument, span, Instrument, Level};

/// What a phase asked the runner to do next.
enum PhaseResult {
  Continue,
  Halted,
  Dismissed,
}

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every stage in order with no owning view.
  pub async fn run(&self, ctx: FlowContext<TData>) -> Result<FlowOutcome, Err> {
    self.run_within(ctx, &ViewLifetime::detached()).await
  }

  /// Runs every stage in order, checking `lifetime` before each stage and each
  /// handler. Once the lifetime is dismissed the run ends with
  /// `FlowOutcome::Dismissed` and no further handler is invoked.
  #[instrument(
        name = "Flow::run",
        skip_all,
        fields(
            flow_context_type = %std::any::type_name::<TData>(),
            num_stages = self.stages.len(),
        ),
        err(Display)
    )]
  pub async fn run_within(&self, ctx: FlowContext<TData>, lifetime: &ViewLifetime) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, "Flow run starting.");

    for (stage_idx, stage_def) in self.stages.iter().enumerate() {
      let stage_name = stage_def.name.as_str();

      if !lifetime.is_active() {
        event!(Level::INFO, stage_name, "Owning view dismissed; abandoning flow before stage.");
        return Ok(FlowOutcome::Dismissed);
      }

      if let Some(skip_if) = &stage_def.skip_if {
        if skip_if(ctx.clone()) {
          event!(Level::DEBUG, stage_name, "Stage skipped by its skip condition.");
          continue;
        }
      }

      let has_handlers = [&self.before, &self.on, &self.after]
        .iter()
        .any(|phase| phase.get(stage_name).is_some_and(|v| !v.is_empty()));

      if !has_handlers {
        if stage_def.optional {
          event!(Level::DEBUG, stage_name, "Optional stage has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, stage_name, "Non-optional stage has no handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          stage_name: stage_def.name.clone(),
        }));
      }

      for (phase_name, phase) in [("before", &self.before), ("on", &self.on), ("after", &self.after)] {
        let Some(handlers) = phase.get(stage_name) else {
          continue;
        };
        let stage_span = span!(
          Level::INFO,
          "flow_stage",
          stage_name = stage_name,
          stage_index = stage_idx,
          phase = phase_name,
          optional = stage_def.optional
        );
        match run_phase(phase_name, handlers, &ctx, lifetime).instrument(stage_span).await? {
          PhaseResult::Continue => {}
          PhaseResult::Halted => return Ok(FlowOutcome::Halted),
          PhaseResult::Dismissed => return Ok(FlowOutcome::Dismissed),
        }
      }
      event!(Level::DEBUG, stage_name, "Stage finished.");
    }

    event!(Level::DEBUG, "Flow run completed.");
    Ok(FlowOutcome::Completed)
  }
}

async fn run_phase<TData, Err>(
  phase_name: &'static str,
  handlers: &[Handler<TData, Err>],
  ctx: &FlowContext<TData>,
  lifetime: &ViewLifetime,
) -> Result<PhaseResult, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
{
  for (handler_idx, handler) in handlers.iter().enumerate() {
    if !lifetime.is_active() {
      event!(Level::INFO, phase = phase_name, "Owning view dismissed; skipping remaining handlers.");
      return Ok(PhaseResult::Dismissed);
    }
    let handler_span = span!(Level::DEBUG, "stage_handler", handler_index = handler_idx);
    match handler(ctx.clone()).instrument(handler_span).await {
      Ok(StageControl::Continue) => {}
      Ok(StageControl::Halt) => {
        event!(Level::INFO, phase = phase_name, "Flow halted by handler.");
        return Ok(PhaseResult::Halted);
      }
      Err(e) => {
        event!(Level::ERROR, phase = phase_name, error = %e, "Handler failed.");
        return Err(e);
      }
    }
  }
  Ok(PhaseResult::Continue)
}
