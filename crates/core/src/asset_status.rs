//! Asset status constants, transition rules, and guards.
//!
//! The asset state machine is owned here; callers never set an asset's
//! status column directly. Repository transition methods validate against
//! these rules and append the matching audit entry (and, for moves, a
//! movement-history row) in the same transaction.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// In stock and assignable.
pub const STATUS_AVAILABLE: &str = "available";
/// Deployed to a user or location.
pub const STATUS_IN_USE: &str = "in_use";
/// A technician is actively repairing the asset.
pub const STATUS_UNDER_MAINTENANCE: &str = "under_maintenance";
/// Flagged for repair; work has not started yet.
pub const STATUS_MAINTENANCE_PENDING: &str = "maintenance_pending";
/// Being moved between locations (including to/from the repair bench).
pub const STATUS_IN_TRANSIT: &str = "in_transit";
/// Held back for a planned deployment.
pub const STATUS_RESERVED: &str = "reserved";
pub const STATUS_LOST: &str = "lost";
pub const STATUS_STOLEN: &str = "stolen";
/// Written off; terminal apart from audit corrections.
pub const STATUS_DECOMMISSIONED: &str = "decommissioned";
/// Newly registered, awaiting acceptance into the inventory.
pub const STATUS_PENDING_APPROVAL: &str = "pending_approval";

/// All valid asset statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_AVAILABLE,
    STATUS_IN_USE,
    STATUS_UNDER_MAINTENANCE,
    STATUS_MAINTENANCE_PENDING,
    STATUS_IN_TRANSIT,
    STATUS_RESERVED,
    STATUS_LOST,
    STATUS_STOLEN,
    STATUS_DECOMMISSIONED,
    STATUS_PENDING_APPROVAL,
];

/// Statuses that mean "this asset is in the repair pipeline".
///
/// Repair completion is only legal from one of these.
pub const MAINTENANCE_STATUSES: &[&str] = &[
    STATUS_UNDER_MAINTENANCE,
    STATUS_MAINTENANCE_PENDING,
    STATUS_IN_TRANSIT,
];

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Returns the set of statuses that `from_status` may transition to.
///
/// `lost` and `stolen` can be walked back to `available` (recovered
/// equipment turns up regularly in practice); `decommissioned` is terminal.
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PENDING_APPROVAL => &[STATUS_AVAILABLE, STATUS_DECOMMISSIONED],
        STATUS_AVAILABLE => &[
            STATUS_IN_USE,
            STATUS_RESERVED,
            STATUS_MAINTENANCE_PENDING,
            STATUS_UNDER_MAINTENANCE,
            STATUS_IN_TRANSIT,
            STATUS_LOST,
            STATUS_STOLEN,
            STATUS_DECOMMISSIONED,
        ],
        STATUS_IN_USE => &[
            STATUS_AVAILABLE,
            STATUS_MAINTENANCE_PENDING,
            STATUS_UNDER_MAINTENANCE,
            STATUS_IN_TRANSIT,
            STATUS_LOST,
            STATUS_STOLEN,
            STATUS_DECOMMISSIONED,
        ],
        STATUS_RESERVED => &[STATUS_AVAILABLE, STATUS_IN_USE, STATUS_IN_TRANSIT],
        STATUS_MAINTENANCE_PENDING => &[
            STATUS_UNDER_MAINTENANCE,
            STATUS_IN_TRANSIT,
            STATUS_AVAILABLE,
            STATUS_DECOMMISSIONED,
        ],
        STATUS_UNDER_MAINTENANCE => &[
            STATUS_AVAILABLE,
            STATUS_IN_USE,
            STATUS_IN_TRANSIT,
            STATUS_MAINTENANCE_PENDING,
            STATUS_DECOMMISSIONED,
        ],
        STATUS_IN_TRANSIT => &[
            STATUS_AVAILABLE,
            STATUS_IN_USE,
            STATUS_UNDER_MAINTENANCE,
            STATUS_MAINTENANCE_PENDING,
            STATUS_LOST,
        ],
        STATUS_LOST => &[STATUS_AVAILABLE, STATUS_STOLEN, STATUS_DECOMMISSIONED],
        STATUS_STOLEN => &[STATUS_AVAILABLE, STATUS_DECOMMISSIONED],
        STATUS_DECOMMISSIONED => &[],
        _ => &[],
    }
}

/// Check whether a transition from `current` to `next` is valid.
pub fn can_transition(current: &str, next: &str) -> bool {
    valid_transitions(current).contains(&next)
}

/// Validate that a status transition from `current` to `next` is allowed.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    let allowed = valid_transitions(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition asset from '{current}' to '{next}'. Allowed transitions: {allowed:?}"
        )))
    }
}

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid asset status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Whether the asset is currently in the repair pipeline.
pub fn is_maintenance_status(status: &str) -> bool {
    MAINTENANCE_STATUSES.contains(&status)
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// Every status change must carry a non-empty reason for the audit trail.
pub fn validate_reason(reason: &str) -> Result<(), CoreError> {
    if reason.trim().is_empty() {
        return Err(CoreError::Validation(
            "A reason is required for asset status changes".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_statuses_are_valid() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok(), "Status '{s}' should be valid");
        }
    }

    #[test]
    fn unknown_status_is_invalid() {
        assert!(validate_status("unknown").is_err());
        assert!(validate_status("").is_err());
    }

    #[test]
    fn available_can_enter_repair_pipeline() {
        assert!(validate_transition(STATUS_AVAILABLE, STATUS_MAINTENANCE_PENDING).is_ok());
        assert!(validate_transition(STATUS_AVAILABLE, STATUS_UNDER_MAINTENANCE).is_ok());
    }

    #[test]
    fn in_use_can_enter_repair_pipeline() {
        assert!(validate_transition(STATUS_IN_USE, STATUS_MAINTENANCE_PENDING).is_ok());
        assert!(validate_transition(STATUS_IN_USE, STATUS_IN_TRANSIT).is_ok());
    }

    #[test]
    fn decommissioned_is_terminal() {
        assert!(valid_transitions(STATUS_DECOMMISSIONED).is_empty());
        assert!(validate_transition(STATUS_DECOMMISSIONED, STATUS_AVAILABLE).is_err());
    }

    #[test]
    fn maintenance_pending_cannot_jump_to_in_use() {
        assert!(validate_transition(STATUS_MAINTENANCE_PENDING, STATUS_IN_USE).is_err());
    }

    #[test]
    fn maintenance_statuses_are_recognised() {
        assert!(is_maintenance_status(STATUS_UNDER_MAINTENANCE));
        assert!(is_maintenance_status(STATUS_MAINTENANCE_PENDING));
        assert!(is_maintenance_status(STATUS_IN_TRANSIT));
        assert!(!is_maintenance_status(STATUS_AVAILABLE));
        assert!(!is_maintenance_status(STATUS_IN_USE));
    }

    #[test]
    fn empty_reason_is_rejected() {
        assert!(validate_reason("").is_err());
        assert!(validate_reason("   ").is_err());
        assert!(validate_reason("screen cracked").is_ok());
    }
}
