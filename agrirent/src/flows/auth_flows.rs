// agrirent/src/flows/auth_flows.rs

use agrirent_flow::{Flow, FlowContext, FlowRegistry, StageControl};
use tracing::{event, info, warn, Level};

use crate::errors::{AppError, Result};
use crate::flows::check_form;
use crate::flows::contexts::{SigninCtx, SignupCtx};
use crate::forms::{signup_rules, SIGNIN_RULES};
use crate::services::{auth_service, identity};

const BAD_CREDENTIALS: &str = "Invalid email or password.";

pub fn register_signup_flow(registry: &FlowRegistry<AppError>) {
  let mut flow = Flow::<SignupCtx, AppError>::new(&[
    ("validate_input", false, None),
    ("check_existing", false, None),
    ("create_account", false, None),
    ("open_session", false, None),
  ]);

  flow.on_stage("validate_input", |ctx: FlowContext<SignupCtx>| async move {
    let guard = ctx.read();
    check_form(&guard.form, &signup_rules(guard.app_state.config.password_min_length))
  });

  flow.on_stage("check_existing", |ctx: FlowContext<SignupCtx>| async move {
    let (store, email) = {
      let guard = ctx.read();
      (guard.app_state.documents.clone(), guard.form.email.clone())
    };
    if identity::find_by_email(store.as_ref(), &email).await?.is_some() {
      warn!("Sign-up attempted with an email that is already registered.");
      return Err(AppError::invalid_field("email", "An account with this email already exists."));
    }
    Ok(StageControl::Continue)
  });

  flow.on_stage("create_account", |ctx: FlowContext<SignupCtx>| async move {
    let (store, email, password, display_name) = {
      let guard = ctx.read();
      let display_name = match guard.form.display_name.trim() {
        "" => guard.form.email.split('@').next().unwrap_or_default().to_string(),
        name => name.to_string(),
      };
      (
        guard.app_state.documents.clone(),
        guard.form.email.clone(),
        guard.form.password.clone(),
        display_name,
      )
    };
    let hash = auth_service::hash_password(&password)?;
    let account = identity::create_account(store.as_ref(), &email, &display_name, hash).await?;
    ctx.write().account = Some(account);
    Ok::<_, AppError>(StageControl::Continue)
  });

  flow.on_stage("open_session", open_signup_session);

  registry.register_flow(flow);
  info!("Sign-up flow registered.");
}

async fn open_signup_session(ctx: FlowContext<SignupCtx>) -> Result<StageControl> {
  let mut guard = ctx.write();
  let uid = guard
    .account
    .as_ref()
    .map(|a| a.id.clone())
    .ok_or_else(|| AppError::Internal("Sign-up reached open_session without an account.".to_string()))?;
  let token = guard.app_state.sessions.open(&uid);
  guard.token = Some(token);
  event!(Level::INFO, uid = %uid, "Signed up and signed in.");
  Ok(StageControl::Continue)
}

pub fn register_signin_flow(registry: &FlowRegistry<AppError>) {
  let mut flow = Flow::<SigninCtx, AppError>::new(&[
    ("validate_input", false, None),
    ("load_account", false, None),
    ("verify_password", false, None),
    ("open_session", false, None),
  ]);

  flow.on_stage("validate_input", |ctx: FlowContext<SigninCtx>| async move {
    let guard = ctx.read();
    check_form(&guard.form, SIGNIN_RULES)
  });

  flow.on_stage("load_account", |ctx: FlowContext<SigninCtx>| async move {
    let (store, email) = {
      let guard = ctx.read();
      (guard.app_state.documents.clone(), guard.form.email.clone())
    };
    let account = identity::find_by_email(store.as_ref(), &email)
      .await?
      .ok_or_else(|| AppError::Auth(BAD_CREDENTIALS.to_string()))?;
    ctx.write().account = Some(account);
    Ok::<_, AppError>(StageControl::Continue)
  });

  flow.on_stage("verify_password", |ctx: FlowContext<SigninCtx>| async move {
    let guard = ctx.read();
    let hash = guard.account.as_ref().map(|a| a.password_hash.as_str()).unwrap_or_default();
    if !auth_service::verify_password(hash, &guard.form.password)? {
      warn!("Sign-in rejected: password mismatch.");
      return Err(AppError::Auth(BAD_CREDENTIALS.to_string()));
    }
    Ok(StageControl::Continue)
  });

  flow.on_stage("open_session", |ctx: FlowContext<SigninCtx>| async move {
    let mut guard = ctx.write();
    let uid = guard.account.as_ref().map(|a| a.id.clone()).unwrap_or_default();
    let token = guard.app_state.sessions.open(&uid);
    guard.token = Some(token);
    info!(%uid, "Signed in.");
    Ok::<_, AppError>(StageControl::Continue)
  });

  registry.register_flow(flow);
  info!("Sign-in flow registered.");
}
