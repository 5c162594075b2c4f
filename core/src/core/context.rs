// agrirent-flow/src/core/context.rs

//! The `Handler<TData, Err>` type used for every stage hook.

use crate::core::context_data::FlowContext;
use crate::core::control::StageControl;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by a stage handler.
pub type HandlerFuture<Err> = Pin<Box<dyn Future<Output = Result<StageControl, Err>> + Send>>;

/// A stage handler.
///
/// Receives a clone of the flow's shared `FlowContext<TData>` and resolves to a
/// `StageControl` or the flow's error type.
///
/// Handlers must release any read/write guard before their first `.await`:
/// copy what the backend call needs out of the context, await the call, then
/// take a fresh write guard to store the result.
pub type Handler<TData, Err> = Box<dyn Fn(FlowContext<TData>) -> HandlerFuture<Err> + Send + Sync>;
