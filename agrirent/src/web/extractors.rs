// agrirent/src/web/extractors.rs

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// The signed-in user behind `Authorization: Bearer <token>`.
///
/// Handlers that take this extractor reject anonymous requests with 401.
/// Use `Option<AuthenticatedUser>` where a session is optional.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub uid: String,
  pub token: String,
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
  req
    .headers()
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|t| !t.is_empty())
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
      return ready(Err(AppError::Internal("Application state is not configured.".to_string())));
    };
    let Some(token) = bearer_token(req) else {
      return ready(Err(AppError::Auth("Sign in to continue.".to_string())));
    };
    match state.sessions.resolve(token) {
      Some(session) => ready(Ok(AuthenticatedUser {
        uid: session.uid,
        token: token.to_string(),
      })),
      None => {
        warn!("Bearer token did not match a live session.");
        ready(Err(AppError::Auth("Your session has expired. Sign in again.".to_string())))
      }
    }
  }
}
