// agrirent-flow/src/registry.rs

//! `FlowRegistry<E>`: one flow per context type, dispatched by `TypeId`.
//!
//! The application registers every form flow at startup and each request
//! handler runs "the flow for `PostEquipmentCtx`" without holding a reference
//! to the flow itself.

use crate::core::context_data::FlowContext;
use crate::core::control::FlowOutcome;
use crate::core::lifetime::ViewLifetime;
use crate::error::FlowError;
use crate::flow::Flow;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[async_trait]
trait ErasedFlowRunner<AppErr>: Send + Sync
where
  AppErr: std::error::Error + Send + Sync + 'static,
{
  /// `ctx` must box a `FlowContext<TData>` for the runner's `TData`.
  async fn run_erased(&self, ctx: Box<dyn Any + Send>, lifetime: ViewLifetime) -> Result<FlowOutcome, AppErr>;
}

struct FlowRunner<TData, HandlerErr, AppErr>
where
  TData: 'static + Send + Sync,
  HandlerErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
  AppErr: std::error::Error + From<HandlerErr> + From<FlowError> + Send + Sync + 'static,
{
  flow: Arc<Flow<TData, HandlerErr>>,
  _phantom: PhantomData<fn() -> AppErr>,
}

#[async_trait]
impl<TData, HandlerErr, AppErr> ErasedFlowRunner<AppErr> for FlowRunner<TData, HandlerErr, AppErr>
where
  TData: 'static + Send + Sync,
  HandlerErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
  AppErr: std::error::Error + From<HandlerErr> + From<FlowError> + Send + Sync + 'static,
{
  #[instrument(
        name = "FlowRunner::run_erased",
        skip_all,
        fields(flow_context_type = %std::any::type_name::<TData>()),
        err(Display)
    )]
  async fn run_erased(&self, ctx: Box<dyn Any + Send>, lifetime: ViewLifetime) -> Result<FlowOutcome, AppErr> {
    let typed_ctx = match ctx.downcast::<FlowContext<TData>>() {
      Ok(boxed) => *boxed,
      Err(_) => {
        let expected_type = std::any::type_name::<FlowContext<TData>>();
        event!(Level::ERROR, expected_type, "Flow context type mismatch.");
        return Err(AppErr::from(FlowError::TypeMismatch {
          stage_name: "registry_dispatch".to_string(),
          expected_type: expected_type.to_string(),
        }));
      }
    };
    self.flow.run_within(typed_ctx, &lifetime).await.map_err(AppErr::from)
  }
}

/// Registry of flows keyed by their context type.
pub struct FlowRegistry<AppErr = FlowError>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  flows: RwLock<HashMap<TypeId, Arc<dyn ErasedFlowRunner<AppErr>>>>,
}

impl<AppErr> Default for FlowRegistry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<AppErr> FlowRegistry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      flows: RwLock::new(HashMap::new()),
    }
  }

  /// Registers `flow` for its context type, replacing any earlier registration.
  pub fn register_flow<TData, HandlerErr>(&self, flow: Flow<TData, HandlerErr>)
  where
    TData: 'static + Send + Sync,
    HandlerErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
    AppErr: From<HandlerErr>,
  {
    event!(Level::DEBUG, flow_context_type = %std::any::type_name::<TData>(), "Registering flow.");
    let runner = FlowRunner::<TData, HandlerErr, AppErr> {
      flow: Arc::new(flow),
      _phantom: PhantomData,
    };
    self.flows.write().insert(TypeId::of::<TData>(), Arc::new(runner));
  }

  pub fn is_registered<TData: 'static>(&self) -> bool {
    self.flows.read().contains_key(&TypeId::of::<TData>())
  }

  pub fn len(&self) -> usize {
    self.flows.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.flows.read().is_empty()
  }

  /// Runs the flow registered for `TData` with no owning view.
  pub async fn run<TData>(&self, ctx: FlowContext<TData>) -> Result<FlowOutcome, AppErr>
  where
    TData: 'static + Send + Sync,
  {
    self.run_within(ctx, &ViewLifetime::detached()).await
  }

  /// Runs the flow registered for `TData`, scoped to `lifetime`.
  pub async fn run_within<TData>(&self, ctx: FlowContext<TData>, lifetime: &ViewLifetime) -> Result<FlowOutcome, AppErr>
  where
    TData: 'static + Send + Sync,
  {
    let runner = self.flows.read().get(&TypeId::of::<TData>()).cloned();
    let runner = runner.ok_or_else(|| {
      let type_name = std::any::type_name::<TData>();
      event!(Level::ERROR, "No flow registered for context type {}.", type_name);
      AppErr::from(FlowError::ConfigurationError {
        stage_name: "FlowRegistry::run".to_string(),
        message: format!("No flow registered for context type {}", type_name),
      })
    })?;

    runner.run_erased(Box::new(ctx), lifetime.clone()).await
  }
}
