// agrirent/src/flows/account_flows.rs

//! Settings forms: change password, edit profile, delete account. Password
//! change and account deletion re-authenticate with the current password.

use agrirent_flow::{Flow, FlowContext, FlowRegistry, SkipCondition, StageControl};
use std::sync::Arc;
use tracing::{info, warn};

use crate::errors::{AppError, Result};
use crate::flows::check_form;
use crate::flows::contexts::{ChangePasswordCtx, DeleteAccountCtx, EditProfileCtx};
use crate::forms::{password_change_rules, DELETE_ACCOUNT_RULES, PROFILE_RULES};
use crate::models::UserProfile;
use crate::services::{auth_service, identity};
use crate::state::AppState;

async fn reauthenticate(app_state: &AppState, uid: &str, password: &str, field: &str) -> Result<()> {
  let account = identity::load_account(app_state.documents.as_ref(), uid).await?;
  if !auth_service::verify_password(&account.password_hash, password)? {
    warn!(%uid, "Re-authentication failed.");
    return Err(AppError::Auth(format!("The {} you entered is incorrect.", field)));
  }
  Ok(())
}

// --- Change password ---

pub fn register_change_password_flow(registry: &FlowRegistry<AppError>) {
  let mut flow = Flow::<ChangePasswordCtx, AppError>::new(&[
    ("validate_input", false, None),
    ("reauthenticate", false, None),
    ("update_password", false, None),
  ]);

  flow.on_stage("validate_input", |ctx: FlowContext<ChangePasswordCtx>| async move {
    let guard = ctx.read();
    check_form(&guard.form, &password_change_rules(guard.app_state.config.password_min_length))?;
    if guard.form.new_password != guard.form.confirm_password {
      return Err(AppError::invalid_field("confirmPassword", "New passwords do not match."));
    }
    Ok(StageControl::Continue)
  });

  flow.on_stage("reauthenticate", |ctx: FlowContext<ChangePasswordCtx>| async move {
    let (app_state, uid, current) = {
      let guard = ctx.read();
      (guard.app_state.clone(), guard.uid.clone(), guard.form.current_password.clone())
    };
    reauthenticate(&app_state, &uid, &current, "current password").await?;
    Ok::<_, AppError>(StageControl::Continue)
  });

  flow.on_stage("update_password", |ctx: FlowContext<ChangePasswordCtx>| async move {
    let (store, uid, new_password) = {
      let guard = ctx.read();
      (
        guard.app_state.documents.clone(),
        guard.uid.clone(),
        guard.form.new_password.clone(),
      )
    };
    let hash = auth_service::hash_password(&new_password)?;
    identity::update_password_hash(store.as_ref(), &uid, hash).await?;
    info!(%uid, "Password changed.");
    Ok::<_, AppError>(StageControl::Continue)
  });

  registry.register_flow(flow);
  info!("Change-password flow registered.");
}

// --- Edit profile ---

pub fn register_edit_profile_flow(registry: &FlowRegistry<AppError>) {
  let email_unchanged: SkipCondition<EditProfileCtx> = Arc::new(|ctx: FlowContext<EditProfileCtx>| {
    let guard = ctx.read();
    let requested = identity::normalize_email(&guard.form.email);
    guard.account.as_ref().is_some_and(|a| a.email == requested)
  });
  let mut flow = Flow::<EditProfileCtx, AppError>::new(&[
    ("validate_input", false, None),
    ("load_account", false, None),
    ("check_email_available", false, Some(email_unchanged)),
    ("write_profile", false, None),
  ]);

  flow.on_stage("validate_input", |ctx: FlowContext<EditProfileCtx>| async move {
    let guard = ctx.read();
    check_form(&guard.form, PROFILE_RULES)
  });

  flow.on_stage("load_account", |ctx: FlowContext<EditProfileCtx>| async move {
    let (store, uid) = {
      let guard = ctx.read();
      (guard.app_state.documents.clone(), guard.uid.clone())
    };
    let account = identity::load_account(store.as_ref(), &uid).await?;
    ctx.write().account = Some(account);
    Ok::<_, AppError>(StageControl::Continue)
  });

  flow.on_stage("check_email_available", |ctx: FlowContext<EditProfileCtx>| async move {
    let (store, email) = {
      let guard = ctx.read();
      (guard.app_state.documents.clone(), guard.form.email.clone())
    };
    if identity::find_by_email(store.as_ref(), &email).await?.is_some() {
      return Err(AppError::invalid_field("email", "Another account already uses this email."));
    }
    Ok(StageControl::Continue)
  });

  flow.on_stage("write_profile", write_profile);

  registry.register_flow(flow);
  info!("Edit-profile flow registered.");
}

async fn write_profile(ctx: FlowContext<EditProfileCtx>) -> Result<StageControl> {
  let (store, uid, mut account, form) = {
    let guard = ctx.read();
    let account = guard
      .account
      .clone()
      .ok_or_else(|| AppError::Internal("Profile write without a loaded account.".to_string()))?;
    (guard.app_state.documents.clone(), guard.uid.clone(), account, guard.form.clone())
  };
  identity::update_profile(store.as_ref(), &uid, &form.display_name, &form.email, &form.photo_url).await?;

  account.display_name = form.display_name.trim().to_string();
  account.email = identity::normalize_email(&form.email);
  account.photo_url = form.photo_url.trim().to_string();
  info!(%uid, "Profile updated.");
  ctx.write().profile = Some(UserProfile::from(&account));
  Ok(StageControl::Continue)
}

// --- Delete account ---

pub fn register_delete_account_flow(registry: &FlowRegistry<AppError>) {
  let mut flow = Flow::<DeleteAccountCtx, AppError>::new(&[
    ("validate_input", false, None),
    ("reauthenticate", false, None),
    ("delete_account", false, None),
    ("revoke_sessions", false, None),
  ]);

  flow.on_stage("validate_input", |ctx: FlowContext<DeleteAccountCtx>| async move {
    let guard = ctx.read();
    check_form(&guard.form, DELETE_ACCOUNT_RULES)
  });

  flow.on_stage("reauthenticate", |ctx: FlowContext<DeleteAccountCtx>| async move {
    let (app_state, uid, password) = {
      let guard = ctx.read();
      (guard.app_state.clone(), guard.uid.clone(), guard.form.password.clone())
    };
    reauthenticate(&app_state, &uid, &password, "password").await?;
    Ok::<_, AppError>(StageControl::Continue)
  });

  flow.on_stage("delete_account", |ctx: FlowContext<DeleteAccountCtx>| async move {
    let (store, uid) = {
      let guard = ctx.read();
      (guard.app_state.documents.clone(), guard.uid.clone())
    };
    identity::delete_account(store.as_ref(), &uid).await?;
    Ok::<_, AppError>(StageControl::Continue)
  });

  flow.on_stage("revoke_sessions", |ctx: FlowContext<DeleteAccountCtx>| async move {
    let mut guard = ctx.write();
    let revoked = guard.app_state.sessions.revoke_all_for(&guard.uid);
    guard.sessions_revoked = revoked;
    Ok::<_, AppError>(StageControl::Continue)
  });

  registry.register_flow(flow);
  info!("Delete-account flow registered.");
}
