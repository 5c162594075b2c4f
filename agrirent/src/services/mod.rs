// agrirent/src/services/mod.rs

pub mod auth_service;
pub mod identity;
pub mod media;
