// agrirent/src/web/handlers/labourer_handlers.rs

use actix_web::{web, HttpResponse};
use agrirent_flow::FlowContext;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::errors::{AppError, Result};
use crate::flows::contexts::PostLabourerCtx;
use crate::forms::LabourerForm;
use crate::models::Labourer;
use crate::navigation::NavigationIntent;
use crate::screens::BrowseState;
use crate::state::AppState;
use crate::store::{collections::LABOURERS, decode_all};
use crate::web::extractors::AuthenticatedUser;
use crate::web::responses::{alert, run_flow};

#[derive(Debug, Default, Deserialize)]
pub struct LabourerQuery {
  pub search: Option<String>,
}

#[instrument(name = "handler::list_labourers", skip(app_state))]
pub async fn list_labourers_handler(
  app_state: web::Data<AppState>,
  query: web::Query<LabourerQuery>,
) -> Result<HttpResponse> {
  let docs = app_state.documents.fetch_all(LABOURERS).await?;
  let mut state = BrowseState::<Labourer>::new(decode_all(docs)?);
  state.set_search(query.into_inner().search.unwrap_or_default());

  let visible = state.visible();
  debug!(visible = visible.len(), "Labourers listed.");
  Ok(HttpResponse::Ok().json(json!({
    "labourers": visible,
    "search": state.search(),
  })))
}

#[instrument(name = "handler::post_labourer", skip(app_state, user, form), fields(uid = %user.uid))]
pub async fn post_labourer_handler(
  app_state: web::Data<AppState>,
  user: AuthenticatedUser,
  form: web::Json<LabourerForm>,
) -> Result<HttpResponse> {
  let ctx = FlowContext::new(PostLabourerCtx {
    app_state: app_state.get_ref().clone(),
    form: form.into_inner(),
    created: None,
  });
  run_flow(&app_state, ctx.clone()).await?;

  let created = ctx
    .read()
    .created
    .clone()
    .ok_or_else(|| AppError::Internal("Labourer flow completed without a record.".to_string()))?;
  Ok(HttpResponse::Created().json(json!({
    "alert": alert("Success", "Labourer added successfully!"),
    "labourer": created,
    "next": NavigationIntent::back(),
  })))
}
