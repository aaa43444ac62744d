//! Well-known role name constants.
//!
//! These must match the seed data in the `users` table migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_IT_SUPPORT: &str = "it_support";
pub const ROLE_ASSET_MANAGER: &str = "asset_manager";
pub const ROLE_DEPARTMENT_HEAD: &str = "department_head";
pub const ROLE_WAREHOUSE_MANAGER: &str = "warehouse_manager";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[
    ROLE_ADMIN,
    ROLE_IT_SUPPORT,
    ROLE_ASSET_MANAGER,
    ROLE_DEPARTMENT_HEAD,
    ROLE_WAREHOUSE_MANAGER,
];

/// Roles allowed to drive repair workflow steps and to reassign a request
/// that is already assigned to another technician.
pub const ELEVATED_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_IT_SUPPORT];

/// Whether `role` may override another technician's request assignment.
pub fn can_override_assignment(role: &str) -> bool {
    ELEVATED_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_it_support_can_override() {
        assert!(can_override_assignment(ROLE_ADMIN));
        assert!(can_override_assignment(ROLE_IT_SUPPORT));
    }

    #[test]
    fn other_roles_cannot_override() {
        assert!(!can_override_assignment(ROLE_ASSET_MANAGER));
        assert!(!can_override_assignment(ROLE_DEPARTMENT_HEAD));
        assert!(!can_override_assignment(ROLE_WAREHOUSE_MANAGER));
        assert!(!can_override_assignment("unknown"));
    }
}
