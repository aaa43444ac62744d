//! Entity models (database rows) and request DTOs.

pub mod asset;
pub mod audit;
pub mod inventory;
pub mod location;
pub mod procurement;
pub mod request;
pub mod user;
pub mod vendor;
pub mod write_off;
