//! Service layer for multi-entity operations.

pub mod workflow;
