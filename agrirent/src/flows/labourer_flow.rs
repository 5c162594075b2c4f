// agrirent/src/flows/labourer_flow.rs

use agrirent_flow::{Flow, FlowContext, FlowRegistry, StageControl};
use tracing::info;

use crate::errors::AppError;
use crate::flows::check_form;
use crate::flows::contexts::PostLabourerCtx;
use crate::forms::LABOURER_RULES;
use crate::models::Labourer;
use crate::store::{collections::LABOURERS, encode};

pub fn register_post_labourer_flow(registry: &FlowRegistry<AppError>) {
  let mut flow = Flow::<PostLabourerCtx, AppError>::new(&[("validate_input", false, None), ("write_document", false, None)]);

  flow.on_stage("validate_input", |ctx: FlowContext<PostLabourerCtx>| async move {
    let guard = ctx.read();
    check_form(&guard.form, LABOURER_RULES)
  });

  flow.on_stage("write_document", |ctx: FlowContext<PostLabourerCtx>| async move {
    let (store, mut labourer) = {
      let guard = ctx.read();
      (guard.app_state.documents.clone(), Labourer::from_form(&guard.form))
    };
    labourer.id = store.create(LABOURERS, encode(&labourer)?).await?;
    info!(labourer_id = %labourer.id, "Labourer listed.");
    ctx.write().created = Some(labourer);
    Ok::<_, AppError>(StageControl::Continue)
  });

  registry.register_flow(flow);
  info!("Post-labourer flow registered.");
}
