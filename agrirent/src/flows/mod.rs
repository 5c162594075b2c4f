// agrirent/src/flows/mod.rs

//! Every form submission is a `Flow` registered here by its context type.
//! Each starts with a `validate_input` stage so a failing rule table stops
//! the run before any backend call.

use agrirent_flow::{FlowRegistry, StageControl};
use tracing::info;

use crate::errors::{AppError, Result};
use crate::forms::{self, FieldRule, FormFields};

pub mod account_flows;
pub mod auth_flows;
pub mod contexts;
pub mod equipment_flows;
pub mod labourer_flow;

pub fn register_all_flows(registry: &FlowRegistry<AppError>) {
  auth_flows::register_signup_flow(registry);
  auth_flows::register_signin_flow(registry);
  equipment_flows::register_post_equipment_flow(registry);
  equipment_flows::register_edit_equipment_flow(registry);
  equipment_flows::register_delete_equipment_flow(registry);
  labourer_flow::register_post_labourer_flow(registry);
  account_flows::register_change_password_flow(registry);
  account_flows::register_edit_profile_flow(registry);
  account_flows::register_delete_account_flow(registry);
  info!(flows = registry.len(), "Form flows registered.");
}

/// Body of every `validate_input` stage.
pub(crate) fn check_form<F: FormFields>(form: &F, rules: &[FieldRule]) -> Result<StageControl> {
  forms::validate(form, rules).map_err(AppError::validation)?;
  Ok(StageControl::Continue)
}
