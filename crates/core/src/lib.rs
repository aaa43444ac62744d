//! Domain logic for the wardtrack hospital IT asset platform.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the API layer, and any future CLI tooling. It owns the
//! entity state machines (legal transitions and guards), the error taxonomy,
//! and pure helpers such as request numbering and audit hashing. Nothing in
//! here touches the database.

pub mod asset_status;
pub mod audit;
pub mod error;
pub mod hashing;
pub mod inventory;
pub mod naming;
pub mod procurement_status;
pub mod request_status;
pub mod roles;
pub mod types;
pub mod workflow;
pub mod write_off_status;
