//! IT request status constants and transition rules.
//!
//! Requests advance `submitted -> in_progress -> {on_hold <-> in_progress}
//! -> {completed, cancelled}`. Completed and cancelled are terminal. Every
//! transition appends exactly one request activity row preserving the full
//! history in insertion order.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a newly created request.
pub const STATUS_SUBMITTED: &str = "submitted";
/// A technician has been assigned and is working the request.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// Work is paused (waiting on parts, user availability, etc.).
pub const STATUS_ON_HOLD: &str = "on_hold";
/// Work finished. Terminal.
pub const STATUS_COMPLETED: &str = "completed";
/// Abandoned. Terminal.
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid request statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_SUBMITTED,
    STATUS_IN_PROGRESS,
    STATUS_ON_HOLD,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

/// Priority values accepted on request creation.
pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high", "critical"];

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Returns the set of statuses that `from_status` may transition to.
///
/// Completion from `on_hold` is allowed (a held request whose blocker
/// resolves off-system does not need a bounce through `in_progress`).
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_SUBMITTED => &[STATUS_IN_PROGRESS, STATUS_CANCELLED],
        STATUS_IN_PROGRESS => &[STATUS_ON_HOLD, STATUS_COMPLETED, STATUS_CANCELLED],
        STATUS_ON_HOLD => &[STATUS_IN_PROGRESS, STATUS_COMPLETED, STATUS_CANCELLED],
        STATUS_COMPLETED | STATUS_CANCELLED => &[],
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
            "Cannot transition request from '{current}' to '{next}'. Allowed transitions: {allowed:?}"
        )))
    }
}

/// Whether the status is terminal (no further transitions).
pub fn is_terminal(status: &str) -> bool {
    matches!(status, STATUS_COMPLETED | STATUS_CANCELLED)
}

/// Validate that a priority string is one of the accepted values.
pub fn validate_priority(priority: &str) -> Result<(), CoreError> {
    if VALID_PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid priority '{priority}'. Must be one of: {VALID_PRIORITIES:?}"
        )))
    }
}

/// Hold, resume, and cancel transitions must carry operator comments.
pub fn validate_comments(comments: &str) -> Result<(), CoreError> {
    if comments.trim().is_empty() {
        return Err(CoreError::Validation(
            "Comments are required for this request transition".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
