// agrirent/src/web/responses.rs

use agrirent_flow::{FlowContext, FlowOutcome, ViewLifetime};
use serde::Serialize;
use tracing::warn;

use crate::errors::{AppError, Result};
use crate::state::AppState;

/// Title and message of the confirmation dialog shown after a submit.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
  pub title: &'static str,
  pub message: &'static str,
}

pub const fn alert(title: &'static str, message: &'static str) -> Alert {
  Alert { title, message }
}

/// Runs the registered flow for `T` scoped to this request.
///
/// The lifetime guard is owned by the handler future. If actix drops that
/// future (the client went away) the run is cancelled with it; the lifetime
/// check only decides the outcome when a caller dismisses it explicitly, see
/// [`run_flow_within`].
pub async fn run_flow<T>(state: &AppState, ctx: FlowContext<T>) -> Result<()>
where
  T: Send + Sync + 'static,
{
  let (lifetime, _guard) = ViewLifetime::open();
  run_flow_within(state, ctx, &lifetime).await
}

/// Runs the registered flow for `T` under a caller-owned lifetime. A halted
/// or dismissed run is reported as `AppError::FlowHalted`.
pub async fn run_flow_within<T>(state: &AppState, ctx: FlowContext<T>, lifetime: &ViewLifetime) -> Result<()>
where
  T: Send + Sync + 'static,
{
  match state.flows.run_within(ctx, lifetime).await? {
    FlowOutcome::Completed => Ok(()),
    FlowOutcome::Halted => {
      warn!(flow = std::any::type_name::<T>(), "Flow halted by a stage.");
      Err(AppError::FlowHalted)
    }
    FlowOutcome::Dismissed => {
      warn!(flow = std::any::type_name::<T>(), "Flow dismissed before completion.");
      Err(AppError::FlowHalted)
    }
  }
}
