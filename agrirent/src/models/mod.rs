// agrirent/src/models/mod.rs

//! Documents stored in the `equipment`, `labourers` and `users` collections.
//! Field names are camelCase on the wire and in storage.

pub mod equipment;
pub mod labourer;
pub mod user;

pub use equipment::{Contact, Equipment, OrderQuote, EQUIPMENT_CATEGORIES};
pub use labourer::Labourer;
pub use user::{UserAccount, UserProfile};
