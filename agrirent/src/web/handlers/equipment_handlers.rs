// agrirent/src/web/handlers/equipment_handlers.rs

use actix_web::{web, HttpResponse};
use agrirent_flow::FlowContext;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::flows::contexts::{DeleteEquipmentCtx, EditEquipmentCtx, PostEquipmentCtx};
use crate::forms::EquipmentForm;
use crate::models::{Equipment, OrderQuote, EQUIPMENT_CATEGORIES};
use crate::navigation::{book_intent, NavigationIntent, Screen};
use crate::screens::BrowseState;
use crate::state::AppState;
use crate::store::{collections::EQUIPMENT, decode_all};
use crate::web::extractors::AuthenticatedUser;
use crate::web::responses::{alert, run_flow};

#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
  pub search: Option<String>,
  /// Currently selected category chip.
  pub category: Option<String>,
  /// Category chip just tapped; toggles against `category`.
  pub toggle: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
  pub days: Option<u32>,
}

async fn fetch_listings(app_state: &AppState) -> Result<Vec<Equipment>> {
  let docs = app_state.documents.fetch_all(EQUIPMENT).await?;
  Ok(decode_all(docs)?)
}

async fn fetch_owned(app_state: &AppState, uid: &str) -> Result<Vec<Equipment>> {
  let docs = app_state
    .documents
    .fetch_where_eq(EQUIPMENT, "userId", &Value::String(uid.to_string()))
    .await?;
  Ok(decode_all(docs)?)
}

async fn fetch_one(app_state: &AppState, id: &str) -> Result<Equipment> {
  match app_state.documents.fetch_by_id(EQUIPMENT, id).await? {
    Some(doc) => Ok(doc.decode()?),
    None => Err(AppError::NotFound("No equipment found with that ID.".to_string())),
  }
}

#[instrument(name = "handler::list_equipment", skip(app_state))]
pub async fn list_equipment_handler(
  app_state: web::Data<AppState>,
  query: web::Query<BrowseQuery>,
) -> Result<HttpResponse> {
  let query = query.into_inner();
  let mut state = BrowseState::new(fetch_listings(&app_state).await?);
  state.set_search(query.search.unwrap_or_default());
  state.select_category(query.category);
  if let Some(tapped) = query.toggle.as_deref() {
    state.toggle_category(tapped);
  }

  let visible = state.visible();
  info!(total = state.items().len(), visible = visible.len(), "Equipment listed.");
  Ok(HttpResponse::Ok().json(json!({
    "equipment": visible,
    "search": state.search(),
    "selectedCategory": state.selected_category(),
    "categories": EQUIPMENT_CATEGORIES,
  })))
}

pub async fn categories_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "categories": EQUIPMENT_CATEGORIES }))
}

#[instrument(name = "handler::equipment_details", skip(app_state))]
pub async fn equipment_details_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let equipment = fetch_one(&app_state, &path.into_inner()).await?;
  let book = book_intent(&equipment.id, &equipment.price, &equipment.location);
  Ok(HttpResponse::Ok().json(json!({
    "contact": equipment.contact(),
    "book": book,
    "equipment": equipment,
  })))
}

#[instrument(name = "handler::order_details", skip(app_state))]
pub async fn order_details_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
  let days = query.days.unwrap_or(1);
  if days == 0 {
    return Err(AppError::invalid_field("days", "Days must be at least 1."));
  }
  let equipment = fetch_one(&app_state, &path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "order": OrderQuote::for_equipment(&equipment, days) })))
}

#[instrument(name = "handler::post_equipment", skip(app_state, user, form), fields(uid = %user.uid))]
pub async fn post_equipment_handler(
  app_state: web::Data<AppState>,
  user: AuthenticatedUser,
  form: web::Json<EquipmentForm>,
) -> Result<HttpResponse> {
  let ctx = FlowContext::new(PostEquipmentCtx {
    app_state: app_state.get_ref().clone(),
    uid: user.uid,
    form: form.into_inner(),
    image_url: None,
    created: None,
  });
  run_flow(&app_state, ctx.clone()).await?;

  let created = ctx
    .read()
    .created
    .clone()
    .ok_or_else(|| AppError::Internal("Post flow completed without a listing.".to_string()))?;
  Ok(HttpResponse::Created().json(json!({
    "alert": alert("Success", "Equipment posted successfully!"),
    "equipment": created,
    "next": NavigationIntent::navigate(Screen::Home),
  })))
}

#[instrument(name = "handler::edit_equipment", skip(app_state, user, form), fields(uid = %user.uid))]
pub async fn edit_equipment_handler(
  app_state: web::Data<AppState>,
  user: AuthenticatedUser,
  path: web::Path<String>,
  form: web::Json<EquipmentForm>,
) -> Result<HttpResponse> {
  let ctx = FlowContext::new(EditEquipmentCtx {
    app_state: app_state.get_ref().clone(),
    uid: user.uid,
    equipment_id: path.into_inner(),
    form: form.into_inner(),
    existing: None,
    image_url: None,
    updated: None,
  });
  run_flow(&app_state, ctx.clone()).await?;

  let updated = ctx
    .read()
    .updated
    .clone()
    .ok_or_else(|| AppError::Internal("Edit flow completed without a listing.".to_string()))?;
  Ok(HttpResponse::Ok().json(json!({
    "alert": alert("Success", "Equipment details updated successfully."),
    "equipment": updated,
    "next": NavigationIntent::back(),
  })))
}

/// Deletes one of the caller's listings and returns the rest of them. The
/// list is pruned locally rather than fetched again.
#[instrument(name = "handler::delete_equipment", skip(app_state, user), fields(uid = %user.uid))]
pub async fn delete_equipment_handler(
  app_state: web::Data<AppState>,
  user: AuthenticatedUser,
  path: web::Path<String>,
) -> Result<HttpResponse> {
  let equipment_id = path.into_inner();
  let mut manage = BrowseState::new(fetch_owned(&app_state, &user.uid).await?);

  let ctx = FlowContext::new(DeleteEquipmentCtx {
    app_state: app_state.get_ref().clone(),
    uid: user.uid,
    equipment_id: equipment_id.clone(),
    existing: None,
  });
  run_flow(&app_state, ctx).await?;
  manage.remove(&equipment_id);

  Ok(HttpResponse::Ok().json(json!({
    "alert": alert("Deleted", "Post deleted successfully."),
    "deletedId": equipment_id,
    "equipment": manage.into_items(),
  })))
}

#[instrument(name = "handler::my_equipment", skip(app_state, user), fields(uid = %user.uid))]
pub async fn my_equipment_handler(app_state: web::Data<AppState>, user: AuthenticatedUser) -> Result<HttpResponse> {
  let mine = fetch_owned(&app_state, &user.uid).await?;
  let edit_intents: Vec<NavigationIntent> = mine
    .iter()
    .map(|e| NavigationIntent::navigate(Screen::EditPost).with_params(json!({ "postId": e.id })))
    .collect();
  Ok(HttpResponse::Ok().json(json!({
    "equipment": mine,
    "edit": edit_intents,
  })))
}
