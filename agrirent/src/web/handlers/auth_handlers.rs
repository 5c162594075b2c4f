// agrirent/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use agrirent_flow::FlowContext;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::flows::contexts::{SigninCtx, SignupCtx};
use crate::forms::{SigninForm, SignupForm};
use crate::models::UserProfile;
use crate::navigation::{NavigationIntent, Screen};
use crate::services::identity;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;
use crate::web::responses::{alert, run_flow};

#[instrument(name = "handler::signup", skip(app_state, form))]
pub async fn signup_handler(app_state: web::Data<AppState>, form: web::Json<SignupForm>) -> Result<HttpResponse> {
  let ctx = FlowContext::new(SignupCtx {
    app_state: app_state.get_ref().clone(),
    form: form.into_inner(),
    account: None,
    token: None,
  });
  run_flow(&app_state, ctx.clone()).await?;

  let guard = ctx.read();
  let (account, token) = guard
    .account
    .as_ref()
    .zip(guard.token.clone())
    .ok_or_else(|| AppError::Internal("Sign-up completed without a session.".to_string()))?;
  info!(uid = %account.id, "Sign-up complete.");

  Ok(HttpResponse::Created().json(json!({
    "alert": alert("Welcome", "Your account has been created."),
    "token": token,
    "user": UserProfile::from(account),
    "next": NavigationIntent::reset(Screen::AppNavigator),
  })))
}

#[instrument(name = "handler::signin", skip(app_state, form))]
pub async fn signin_handler(app_state: web::Data<AppState>, form: web::Json<SigninForm>) -> Result<HttpResponse> {
  let ctx = FlowContext::new(SigninCtx {
    app_state: app_state.get_ref().clone(),
    form: form.into_inner(),
    account: None,
    token: None,
  });
  run_flow(&app_state, ctx.clone()).await?;

  let guard = ctx.read();
  let (account, token) = guard
    .account
    .as_ref()
    .zip(guard.token.clone())
    .ok_or_else(|| AppError::Auth("Sign-in completed without a session.".to_string()))?;

  Ok(HttpResponse::Ok().json(json!({
    "token": token,
    "user": UserProfile::from(account),
    "next": NavigationIntent::reset(Screen::AppNavigator),
  })))
}

#[instrument(name = "handler::signout", skip(app_state, user), fields(uid = %user.uid))]
pub async fn signout_handler(app_state: web::Data<AppState>, user: AuthenticatedUser) -> Result<HttpResponse> {
  app_state.sessions.revoke(&user.token);
  Ok(HttpResponse::Ok().json(json!({
    "alert": alert("Logged out", "You have been logged out."),
    "next": NavigationIntent::reset(Screen::Splash),
  })))
}

#[instrument(name = "handler::me", skip(app_state, user), fields(uid = %user.uid))]
pub async fn me_handler(app_state: web::Data<AppState>, user: AuthenticatedUser) -> Result<HttpResponse> {
  let account = identity::load_account(app_state.documents.as_ref(), &user.uid).await?;
  Ok(HttpResponse::Ok().json(json!({ "user": UserProfile::from(&account) })))
}
