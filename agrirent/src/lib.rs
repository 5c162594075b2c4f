// agrirent/src/lib.rs

//! AgriRent: a marketplace backend for renting farm equipment and hiring
//! labourers. Form submissions run as `agrirent_flow` flows over a document
//! store and object storage; the HTTP surface lives in [`web`].

pub mod config;
pub mod content;
pub mod errors;
pub mod flows;
pub mod forms;
pub mod models;
pub mod navigation;
pub mod screens;
pub mod seed;
pub mod services;
pub mod sessions;
pub mod state;
pub mod store;
pub mod web;
