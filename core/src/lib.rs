// agrirent-flow/src/lib.rs

//! agrirent-flow: the asynchronous form-submission engine behind AgriRent.
//!
//! Every form in the marketplace (posting equipment, editing a post, changing a
//! password, signing up...) is expressed as a `Flow`: an ordered list of named
//! stages such as `validate_input`, `upload_image` and `write_document`.
//!  - Stages carry before/on/after hooks, run in declaration order, and can be
//!    optional or skipped by a predicate on the flow context.
//!  - A handler halts the flow by returning `StageControl::Halt`, or fails it by
//!    returning an error; nothing after that point runs.
//!  - Runs can be scoped to a `ViewLifetime` so that work started for a view
//!    that has since been dismissed stops before applying further results.
//!  - A `FlowRegistry` dispatches to the flow registered for a context type.

pub mod core;
pub mod error;
pub mod flow;
pub mod registry;

pub use crate::core::context::Handler;
pub use crate::core::context_data::FlowContext;
pub use crate::core::control::{FlowOutcome, StageControl};
pub use crate::core::lifetime::{LifetimeGuard, ViewLifetime};
pub use crate::core::step::{SkipCondition, StageDef};

pub use crate::flow::Flow;

pub use crate::error::{FlowError, FlowResult};

pub use crate::registry::FlowRegistry;

/*
    Typical use:
    1. Define a context struct `PostCtx` holding the submitted form and the
       results each stage produces.
    2. Build a `Flow<PostCtx, AppError>` from `(name, optional, skip_if)` triples.
    3. Attach handlers with `.on_stage()`, `.before_stage()`, `.after_stage()`.
    4. Register the flow with a `FlowRegistry<AppError>`.
    5. Per request: `registry.run_within(FlowContext::new(ctx), &lifetime).await`.
*/
