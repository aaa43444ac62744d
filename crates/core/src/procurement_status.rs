//! Procurement request status constants and transition rules.
//!
//! Procurement advances `draft -> pending_approval -> approved -> ordered ->
//! received`; `cancelled` is reachable from any non-terminal state. The
//! estimated budget is always recomputed from the line items before a
//! status-changing write.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status; line items may still be edited.
pub const STATUS_DRAFT: &str = "draft";
/// Submitted and awaiting an asset manager's decision.
pub const STATUS_PENDING_APPROVAL: &str = "pending_approval";
/// Approved for purchase; contents are frozen.
pub const STATUS_APPROVED: &str = "approved";
/// Purchase order placed with the vendor.
pub const STATUS_ORDERED: &str = "ordered";
/// All items delivered and stocked in. Terminal.
pub const STATUS_RECEIVED: &str = "received";
/// Abandoned. Terminal.
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid procurement statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_PENDING_APPROVAL,
    STATUS_APPROVED,
    STATUS_ORDERED,
    STATUS_RECEIVED,
    STATUS_CANCELLED,
];

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Returns the set of statuses that `from_status` may transition to.
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_DRAFT => &[STATUS_PENDING_APPROVAL, STATUS_CANCELLED],
        STATUS_PENDING_APPROVAL => &[STATUS_APPROVED, STATUS_DRAFT, STATUS_CANCELLED],
        STATUS_APPROVED => &[STATUS_ORDERED, STATUS_CANCELLED],
        STATUS_ORDERED => &[STATUS_RECEIVED, STATUS_CANCELLED],
        STATUS_RECEIVED | STATUS_CANCELLED => &[],
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
            "Cannot transition procurement request from '{current}' to '{next}'. \
             Allowed transitions: {allowed:?}"
        )))
    }
}

/// Whether the status is terminal (no further transitions).
pub fn is_terminal(status: &str) -> bool {
    matches!(status, STATUS_RECEIVED | STATUS_CANCELLED)
}

/// Whether line items and header fields may still be edited.
///
/// Edits are blocked once the request has been approved (or any later
/// state): the approved contents are what the approver signed off on.
pub fn is_editable(status: &str) -> bool {
    matches!(status, STATUS_DRAFT | STATUS_PENDING_APPROVAL)
}

/// Validate that the request is still editable.
pub fn validate_editable(status: &str) -> Result<(), CoreError> {
    if is_editable(status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Procurement request in status '{status}' can no longer be edited"
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
