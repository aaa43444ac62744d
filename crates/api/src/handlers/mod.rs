//! HTTP handlers, grouped by resource.

pub mod assets;
pub mod audit;
pub mod auth;
pub mod inventory;
pub mod locations;
pub mod procurement;
pub mod requests;
pub mod users;
pub mod vendors;
pub mod workflow;
pub mod write_offs;
