pub mod context;
pub mod context_data;
pub mod control;
pub mod lifetime;
pub mod step;

pub use context::Handler;
pub use context_data::FlowContext;
pub use control::{FlowOutcome, StageControl};
pub use lifetime::{LifetimeGuard, ViewLifetime};
pub use step::StageDef;
