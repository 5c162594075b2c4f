// agrirent/src/web/handlers/mod.rs

pub mod account_handlers;
pub mod auth_handlers;
pub mod content_handlers;
pub mod equipment_handlers;
pub mod labourer_handlers;
