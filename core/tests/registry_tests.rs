// tests/registry_tests.rs
mod common;

use agrirent_flow::{Flow, FlowContext, FlowOutcome, FlowRegistry, StageControl, ViewLifetime};
use common::*;

#[derive(Clone, Debug, Default)]
struct ListingCtx {
  title: String,
}

#[derive(Clone, Debug, Default)]
struct PasswordCtx {
  changed: bool,
}

#[tokio::test]
async fn test_registry_dispatches_by_context_type() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();
  assert!(registry.is_empty());

  let mut listing = Flow::<ListingCtx, TestError>::new(&[("write_document", false, None)]);
  listing.on_stage("write_document", |ctx: FlowContext<ListingCtx>| async move {
    ctx.write().title = "Plow X".to_string();
    Ok::<_, TestError>(StageControl::Continue)
  });
  registry.register_flow(listing);

  let mut password = Flow::<PasswordCtx, TestError>::new(&[("update_password", false, None)]);
  password.on_stage("update_password", |ctx: FlowContext<PasswordCtx>| async move {
    ctx.write().changed = true;
    Ok::<_, TestError>(StageControl::Continue)
  });
  registry.register_flow(password);

  assert_eq!(registry.len(), 2);
  assert!(registry.is_registered::<ListingCtx>());

  let listing_ctx = FlowContext::new(ListingCtx::default());
  assert_eq!(registry.run(listing_ctx.clone()).await.unwrap(), FlowOutcome::Completed);
  assert_eq!(listing_ctx.read().title, "Plow X");

  let password_ctx = FlowContext::new(PasswordCtx::default());
  registry.run(password_ctx.clone()).await.unwrap();
  assert!(password_ctx.read().changed);
}

#[tokio::test]
async fn test_registry_reports_unregistered_context() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();

  #[derive(Debug, Default)]
  struct UnregisteredCtx;

  let result = registry.run(FlowContext::new(UnregisteredCtx)).await;
  match result {
    Err(TestError::Flow(s)) => {
      assert!(s.contains("ConfigurationError"));
      assert!(s.contains("No flow registered"));
      assert!(s.contains("UnregisteredCtx"));
    }
    other => panic!("Expected ConfigurationError, got {:?}", other),
  }
}

#[tokio::test]
async fn test_registry_honours_view_lifetime() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();
  let mut flow = Flow::<FormCtx, TestError>::new(&[("load_items", false, None)]);
  flow.on_stage("load_items", recording_handler("load_items", "L"));
  registry.register_flow(flow);

  let (lifetime, guard) = ViewLifetime::open();
  drop(guard);
  let ctx = FlowContext::new(FormCtx::default());
  assert_eq!(
    registry.run_within(ctx.clone(), &lifetime).await.unwrap(),
    FlowOutcome::Dismissed
  );
  assert!(ctx.read().stages_run.is_empty());
}

#[tokio::test]
async fn test_registry_surfaces_stage_errors() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();
  let mut flow = Flow::<FormCtx, TestError>::new(&[("write_document", false, None)]);
  flow.on_stage("write_document", failing_handler("write_document", "permission denied"));
  registry.register_flow(flow);

  let result = registry.run(FlowContext::new(FormCtx::default())).await;
  assert_eq!(result, Err(TestError::Stage("permission denied".to_string())));
}
