// agrirent-flow/src/flow/mod.rs

//! `Flow<T, E>`: construction, hook registration and execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Flow;
