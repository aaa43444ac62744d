//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Methods that must compose with
//! other writes inside one transaction take `&mut PgConnection` instead and
//! are called with `&mut *tx`.

pub mod asset_repo;
pub mod audit_log_repo;
pub mod inventory_repo;
pub mod location_repo;
pub mod procurement_repo;
pub mod request_repo;
pub mod user_repo;
pub mod vendor_repo;
pub mod write_off_repo;

pub use asset_repo::AssetRepo;
pub use audit_log_repo::AuditLogRepo;
pub use inventory_repo::InventoryRepo;
pub use location_repo::LocationRepo;
pub use procurement_repo::ProcurementRepo;
pub use request_repo::RequestRepo;
pub use user_repo::UserRepo;
pub use vendor_repo::VendorRepo;
pub use write_off_repo::WriteOffRepo;
