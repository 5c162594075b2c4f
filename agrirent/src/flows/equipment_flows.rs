// agrirent/src/flows/equipment_flows.rs

//! Post, edit and delete of equipment listings.
//!
//! Post and edit upload the optional image before writing the document. If
//! the write then fails the uploaded object is left in storage; this is
//! logged, not rolled back.

use agrirent_flow::{Flow, FlowContext, FlowRegistry, SkipCondition, StageControl};
use std::sync::Arc;
use tracing::{event, info, warn, Level};

use crate::errors::{AppError, Result};
use crate::flows::check_form;
use crate::flows::contexts::{DeleteEquipmentCtx, EditEquipmentCtx, PostEquipmentCtx};
use crate::forms::{EquipmentForm, EQUIPMENT_RULES};
use crate::models::{Equipment, EQUIPMENT_CATEGORIES};
use crate::services::media;
use crate::store::{collections::EQUIPMENT, encode, DocumentStore};

fn validate_equipment_form(form: &EquipmentForm) -> Result<StageControl> {
  check_form(form, EQUIPMENT_RULES)?;
  let category = form.category.trim();
  if !category.is_empty() && !EQUIPMENT_CATEGORIES.contains(&category) {
    return Err(AppError::invalid_field(
      "category",
      format!("Category must be one of: {}.", EQUIPMENT_CATEGORIES.join(", ")),
    ));
  }
  Ok(StageControl::Continue)
}

async fn load_listing(store: &dyn DocumentStore, id: &str) -> Result<Equipment> {
  match store.fetch_by_id(EQUIPMENT, id).await? {
    Some(doc) => Ok(doc.decode()?),
    None => Err(AppError::NotFound("No equipment found with that ID.".to_string())),
  }
}

fn ensure_owner(listing: Option<&Equipment>, uid: &str) -> Result<StageControl> {
  match listing {
    Some(l) if l.is_owned_by(uid) => Ok(StageControl::Continue),
    Some(l) => {
      warn!(equipment_id = %l.id, %uid, "Refusing to modify a listing owned by someone else.");
      Err(AppError::Forbidden("You can only change your own listings.".to_string()))
    }
    None => Err(AppError::Internal("Ownership check ran before the listing was loaded.".to_string())),
  }
}

// --- Post ---

pub fn register_post_equipment_flow(registry: &FlowRegistry<AppError>) {
  let no_image: SkipCondition<PostEquipmentCtx> = Arc::new(|ctx: FlowContext<PostEquipmentCtx>| ctx.read().form.image.is_none());
  let mut flow = Flow::<PostEquipmentCtx, AppError>::new(&[
    ("validate_input", false, None),
    ("upload_image", false, Some(no_image)),
    ("write_document", false, None),
  ]);

  flow.on_stage("validate_input", |ctx: FlowContext<PostEquipmentCtx>| async move {
    let guard = ctx.read();
    validate_equipment_form(&guard.form)
  });

  flow.on_stage("upload_image", |ctx: FlowContext<PostEquipmentCtx>| async move {
    let (objects, upload) = {
      let guard = ctx.read();
      (guard.app_state.objects.clone(), guard.form.image.clone().unwrap_or_default())
    };
    let url = media::store_image(objects.as_ref(), &upload).await?;
    ctx.write().image_url = Some(url);
    Ok::<_, AppError>(StageControl::Continue)
  });

  flow.on_stage("write_document", write_new_listing);

  registry.register_flow(flow);
  info!("Post-equipment flow registered.");
}

async fn write_new_listing(ctx: FlowContext<PostEquipmentCtx>) -> Result<StageControl> {
  let (store, mut listing) = {
    let guard = ctx.read();
    (
      guard.app_state.documents.clone(),
      Equipment::from_form(&guard.form, &guard.uid, guard.image_url.clone()),
    )
  };
  match store.create(EQUIPMENT, encode(&listing)?).await {
    Ok(id) => {
      listing.id = id;
      event!(Level::INFO, equipment_id = %listing.id, owner = %listing.user_id, "Equipment posted.");
      ctx.write().created = Some(listing);
      Ok(StageControl::Continue)
    }
    Err(e) => {
      if !listing.image_url.is_empty() {
        warn!(image_url = %listing.image_url, "Listing write failed after upload; image left orphaned.");
      }
      Err(e.into())
    }
  }
}

// --- Edit ---

pub fn register_edit_equipment_flow(registry: &FlowRegistry<AppError>) {
  let no_image: SkipCondition<EditEquipmentCtx> = Arc::new(|ctx: FlowContext<EditEquipmentCtx>| ctx.read().form.image.is_none());
  let mut flow = Flow::<EditEquipmentCtx, AppError>::new(&[
    ("validate_input", false, None),
    ("load_existing", false, None),
    ("upload_image", false, Some(no_image)),
    ("write_document", false, None),
  ]);

  flow.on_stage("validate_input", |ctx: FlowContext<EditEquipmentCtx>| async move {
    let guard = ctx.read();
    validate_equipment_form(&guard.form)
  });

  flow.on_stage("load_existing", |ctx: FlowContext<EditEquipmentCtx>| async move {
    let (store, id) = {
      let guard = ctx.read();
      (guard.app_state.documents.clone(), guard.equipment_id.clone())
    };
    let listing = load_listing(store.as_ref(), &id).await?;
    ctx.write().existing = Some(listing);
    Ok::<_, AppError>(StageControl::Continue)
  });

  // Ownership is checked before anything is uploaded.
  flow.after_stage("load_existing", |ctx: FlowContext<EditEquipmentCtx>| async move {
    let guard = ctx.read();
    ensure_owner(guard.existing.as_ref(), &guard.uid)
  });

  flow.on_stage("upload_image", |ctx: FlowContext<EditEquipmentCtx>| async move {
    let (objects, upload) = {
      let guard = ctx.read();
      (guard.app_state.objects.clone(), guard.form.image.clone().unwrap_or_default())
    };
    let url = media::store_image(objects.as_ref(), &upload).await?;
    ctx.write().image_url = Some(url);
    Ok::<_, AppError>(StageControl::Continue)
  });

  flow.on_stage("write_document", write_edited_listing);

  registry.register_flow(flow);
  info!("Edit-equipment flow registered.");
}

async fn write_edited_listing(ctx: FlowContext<EditEquipmentCtx>) -> Result<StageControl> {
  let (store, listing) = {
    let guard = ctx.read();
    let mut listing = guard
      .existing
      .clone()
      .ok_or_else(|| AppError::Internal("Edit reached write_document without a loaded listing.".to_string()))?;
    listing.apply_form(&guard.form);
    if let Some(url) = &guard.image_url {
      listing.image_url = url.clone();
    }
    (guard.app_state.documents.clone(), listing)
  };
  if let Err(e) = store.update(EQUIPMENT, &listing.id, encode(&listing)?).await {
    if ctx.read().image_url.is_some() {
      warn!(equipment_id = %listing.id, "Listing update failed after upload; image left orphaned.");
    }
    return Err(e.into());
  }
  event!(Level::INFO, equipment_id = %listing.id, "Equipment updated.");
  ctx.write().updated = Some(listing);
  Ok(StageControl::Continue)
}

// --- Delete ---

pub fn register_delete_equipment_flow(registry: &FlowRegistry<AppError>) {
  let mut flow = Flow::<DeleteEquipmentCtx, AppError>::new(&[
    ("load_existing", false, None),
    ("check_owner", false, None),
    ("delete_document", false, None),
  ]);

  flow.on_stage("load_existing", |ctx: FlowContext<DeleteEquipmentCtx>| async move {
    let (store, id) = {
      let guard = ctx.read();
      (guard.app_state.documents.clone(), guard.equipment_id.clone())
    };
    let listing = load_listing(store.as_ref(), &id).await?;
    ctx.write().existing = Some(listing);
    Ok::<_, AppError>(StageControl::Continue)
  });

  flow.on_stage("check_owner", |ctx: FlowContext<DeleteEquipmentCtx>| async move {
    let guard = ctx.read();
    ensure_owner(guard.existing.as_ref(), &guard.uid)
  });

  flow.on_stage("delete_document", |ctx: FlowContext<DeleteEquipmentCtx>| async move {
    let (store, id) = {
      let guard = ctx.read();
      (guard.app_state.documents.clone(), guard.equipment_id.clone())
    };
    store.delete(EQUIPMENT, &id).await?;
    info!(equipment_id = %id, "Equipment deleted.");
    Ok::<_, AppError>(StageControl::Continue)
  });

  registry.register_flow(flow);
  info!("Delete-equipment flow registered.");
}
