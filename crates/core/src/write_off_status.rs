//! Write-off record status constants and transition rules.
//!
//! A write-off record is tied to exactly one asset. Once approved it becomes
//! immutable; the approval also decommissions the asset.

use crate::error::CoreError;

/// Initial status while the record is being drafted.
pub const STATUS_DRAFT: &str = "draft";
/// Submitted and awaiting approval.
pub const STATUS_PENDING_APPROVAL: &str = "pending_approval";
/// Approved. Terminal and immutable.
pub const STATUS_APPROVED: &str = "approved";
/// Rejected. Terminal.
pub const STATUS_REJECTED: &str = "rejected";

/// All valid write-off statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_PENDING_APPROVAL,
    STATUS_APPROVED,
    STATUS_REJECTED,
];

/// Accepted disposal methods.
pub const VALID_METHODS: &[&str] = &["recycle", "donate", "destroy", "return_to_vendor"];

/// Returns the set of statuses that `from_status` may transition to.
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_DRAFT => &[STATUS_PENDING_APPROVAL],
        STATUS_PENDING_APPROVAL => &[STATUS_APPROVED, STATUS_REJECTED, STATUS_DRAFT],
        STATUS_APPROVED | STATUS_REJECTED => &[],
        _ => &[],
    }
}

/// Validate that a status transition from `current` to `next` is allowed.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    let allowed = valid_transitions(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition write-off record from '{current}' to '{next}'. \
             Allowed transitions: {allowed:?}"
        )))
    }
}

/// Approved records can no longer be edited or deleted.
pub fn validate_mutable(status: &str) -> Result<(), CoreError> {
    if status == STATUS_APPROVED {
        Err(CoreError::Validation(
            "An approved write-off record is immutable".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a disposal method string is one of the accepted values.
pub fn validate_method(method: &str) -> Result<(), CoreError> {
    if VALID_METHODS.contains(&method) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid disposal method '{method}'. Must be one of: {VALID_METHODS:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_can_only_be_submitted() {
        assert!(validate_transition(STATUS_DRAFT, STATUS_PENDING_APPROVAL).is_ok());
        assert!(validate_transition(STATUS_DRAFT, STATUS_APPROVED).is_err());
    }

    #[test]
    fn pending_can_be_approved_rejected_or_withdrawn() {
        assert!(validate_transition(STATUS_PENDING_APPROVAL, STATUS_APPROVED).is_ok());
        assert!(validate_transition(STATUS_PENDING_APPROVAL, STATUS_REJECTED).is_ok());
        assert!(validate_transition(STATUS_PENDING_APPROVAL, STATUS_DRAFT).is_ok());
    }

    #[test]
    fn approved_and_rejected_are_terminal() {
        assert!(valid_transitions(STATUS_APPROVED).is_empty());
        assert!(valid_transitions(STATUS_REJECTED).is_empty());
    }

    #[test]
    fn approved_record_is_immutable() {
        assert!(validate_mutable(STATUS_APPROVED).is_err());
        assert!(validate_mutable(STATUS_DRAFT).is_ok());
        assert!(validate_mutable(STATUS_REJECTED).is_ok());
    }

    #[test]
    fn method_validation() {
        for m in VALID_METHODS {
            assert!(validate_method(m).is_ok());
        }
        assert!(validate_method("landfill").is_err());
    }
}
