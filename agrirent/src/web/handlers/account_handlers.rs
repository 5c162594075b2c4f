// agrirent/src/web/handlers/account_handlers.rs

use actix_web::{web, HttpResponse};
use agrirent_flow::FlowContext;
use serde_json::json;
use tracing::instrument;

use crate::errors::{AppError, Result};
use crate::flows::contexts::{ChangePasswordCtx, DeleteAccountCtx, EditProfileCtx};
use crate::forms::{DeleteAccountForm, PasswordForm, ProfileForm};
use crate::navigation::{NavigationIntent, Screen};
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;
use crate::web::responses::{alert, run_flow};

#[instrument(name = "handler::edit_profile", skip(app_state, user, form), fields(uid = %user.uid))]
pub async fn edit_profile_handler(
  app_state: web::Data<AppState>,
  user: AuthenticatedUser,
  form: web::Json<ProfileForm>,
) -> Result<HttpResponse> {
  let ctx = FlowContext::new(EditProfileCtx {
    app_state: app_state.get_ref().clone(),
    uid: user.uid,
    form: form.into_inner(),
    account: None,
    profile: None,
  });
  run_flow(&app_state, ctx.clone()).await?;

  let profile = ctx
    .read()
    .profile
    .clone()
    .ok_or_else(|| AppError::Internal("Profile flow completed without a profile.".to_string()))?;
  Ok(HttpResponse::Ok().json(json!({
    "alert": alert("Success", "Profile updated successfully"),
    "user": profile,
    "next": NavigationIntent::back(),
  })))
}

#[instrument(name = "handler::change_password", skip(app_state, user, form), fields(uid = %user.uid))]
pub async fn change_password_handler(
  app_state: web::Data<AppState>,
  user: AuthenticatedUser,
  form: web::Json<PasswordForm>,
) -> Result<HttpResponse> {
  let ctx = FlowContext::new(ChangePasswordCtx {
    app_state: app_state.get_ref().clone(),
    uid: user.uid,
    form: form.into_inner(),
  });
  run_flow(&app_state, ctx).await?;

  Ok(HttpResponse::Ok().json(json!({
    "alert": alert("Success", "Password changed successfully."),
    "next": NavigationIntent::back(),
  })))
}

#[instrument(name = "handler::delete_account", skip(app_state, user, form), fields(uid = %user.uid))]
pub async fn delete_account_handler(
  app_state: web::Data<AppState>,
  user: AuthenticatedUser,
  form: web::Json<DeleteAccountForm>,
) -> Result<HttpResponse> {
  let ctx = FlowContext::new(DeleteAccountCtx {
    app_state: app_state.get_ref().clone(),
    uid: user.uid,
    form: form.into_inner(),
    sessions_revoked: 0,
  });
  run_flow(&app_state, ctx.clone()).await?;
  let sessions_revoked = ctx.read().sessions_revoked;

  Ok(HttpResponse::Ok().json(json!({
    "alert": alert("Account deleted", "Your account has been deleted."),
    "sessionsRevoked": sessions_revoked,
    "next": NavigationIntent::reset(Screen::Login),
  })))
}
