//! Pure decision logic for the asset repair workflow.
//!
//! The orchestration service in the API layer drives the database writes;
//! everything that can be decided without I/O lives here so it is unit
//! testable: part cost totals, the requires-procurement flag, and the
//! pending-action derivation used by the read-only status endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::procurement_status;

// ---------------------------------------------------------------------------
// Workflow step labels
// ---------------------------------------------------------------------------

/// Recorded when the repair workflow is initiated.
pub const STEP_STARTED: &str = "Workflow started";
/// Recorded when a temporary replacement asset is deployed.
pub const STEP_REPLACEMENT_DEPLOYED: &str = "Temporary replacement deployed";
/// Recorded when a procurement request is generated for repair parts.
pub const STEP_PROCUREMENT_GENERATED: &str = "Procurement generated";
/// Recorded when all originating procurement has been received.
pub const STEP_PARTS_RECEIVED: &str = "Repair parts received";
/// Recorded when the repair is completed and the asset returned to service.
pub const STEP_COMPLETED: &str = "Repair completed";

// ---------------------------------------------------------------------------
// Pending action labels
// ---------------------------------------------------------------------------

pub const PENDING_PROCUREMENT_APPROVAL: &str = "awaiting procurement approval";
pub const PENDING_PARTS_DELIVERY: &str = "awaiting parts delivery";
pub const PENDING_REPLACEMENT_RETURN: &str = "temporary replacement in the field";
pub const PENDING_COMPLETION: &str = "repair completion pending";

// ---------------------------------------------------------------------------
// Part requests
// ---------------------------------------------------------------------------

/// One repair part requested for procurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartRequest {
    pub part_name: String,
    pub quantity: i64,
    pub estimated_unit_price: Decimal,
    /// Optional link to an existing inventory item restocked by this part.
    pub inventory_item_id: Option<crate::types::DbId>,
}

/// Validate a batch of part requests before procurement generation.
pub fn validate_part_requests(parts: &[PartRequest]) -> Result<(), CoreError> {
    if parts.is_empty() {
        return Err(CoreError::Validation(
            "At least one repair part is required to generate procurement".to_string(),
        ));
    }
    for part in parts {
        if part.part_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Part name must not be empty".to_string(),
            ));
        }
        if part.quantity <= 0 {
            return Err(CoreError::Validation(format!(
                "Part '{}' has non-positive quantity {}",
                part.part_name, part.quantity
            )));
        }
        if part.estimated_unit_price < Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "Part '{}' has a negative unit price",
                part.part_name
            )));
        }
    }
    Ok(())
}

/// Total estimated cost: sum of quantity x unit price over all parts.
pub fn total_estimated_cost(parts: &[PartRequest]) -> Decimal {
    parts
        .iter()
        .map(|p| p.estimated_unit_price * Decimal::from(p.quantity))
        .sum()
}

// ---------------------------------------------------------------------------
// Decision helpers
// ---------------------------------------------------------------------------

/// Whether starting a repair workflow should flag procurement as required.
///
/// Procurement is needed when the request names repair parts, or when it
/// references a required inventory item whose stock cannot cover it.
pub fn requires_procurement(has_part_requests: bool, required_item_stock: Option<i64>) -> bool {
    has_part_requests || matches!(required_item_stock, Some(qty) if qty <= 0)
}

/// Derive the open actions for a request's workflow from current entity
/// state. Read-only; the status endpoint reports these verbatim.
pub fn pending_actions(
    request_terminal: bool,
    procurement_statuses: &[&str],
    has_temporary_replacement: bool,
) -> Vec<String> {
    let mut actions = Vec::new();

    if procurement_statuses
        .iter()
        .any(|s| matches!(*s, procurement_status::STATUS_DRAFT | procurement_status::STATUS_PENDING_APPROVAL))
    {
        actions.push(PENDING_PROCUREMENT_APPROVAL.to_string());
    }
    if procurement_statuses
        .iter()
        .any(|s| matches!(*s, procurement_status::STATUS_APPROVED | procurement_status::STATUS_ORDERED))
    {
        actions.push(PENDING_PARTS_DELIVERY.to_string());
    }
    if has_temporary_replacement {
        actions.push(PENDING_REPLACEMENT_RETURN.to_string());
    }
    if !request_terminal {
        actions.push(PENDING_COMPLETION.to_string());
    }

    actions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn part(name: &str, qty: i64, price: i64) -> PartRequest {
        PartRequest {
            part_name: name.to_string(),
            quantity: qty,
            estimated_unit_price: Decimal::from(price),
            inventory_item_id: None,
        }
    }

    #[test]
    fn total_cost_sums_quantity_times_price() {
        // 2 x $50 + 1 x $100 = $200
        let parts = vec![part("SSD", 2, 50), part("RAM", 1, 100)];
        assert_eq!(total_estimated_cost(&parts), Decimal::from(200));
    }

    #[test]
    fn total_cost_of_empty_list_is_zero() {
        assert_eq!(total_estimated_cost(&[]), Decimal::ZERO);
    }

    #[test]
    fn empty_part_list_fails_validation() {
        assert!(validate_part_requests(&[]).is_err());
    }

    #[test]
    fn blank_name_and_bad_quantity_fail_validation() {
        assert!(validate_part_requests(&[part("  ", 1, 10)]).is_err());
        assert!(validate_part_requests(&[part("SSD", 0, 10)]).is_err());
        assert!(validate_part_requests(&[part("SSD", -2, 10)]).is_err());
    }

    #[test]
    fn negative_price_fails_validation() {
        assert!(validate_part_requests(&[part("SSD", 1, -1)]).is_err());
        assert!(validate_part_requests(&[part("SSD", 1, 0)]).is_ok());
    }

    #[test]
    fn procurement_required_when_parts_named() {
        assert!(requires_procurement(true, None));
        assert!(requires_procurement(true, Some(10)));
    }

    #[test]
    fn procurement_required_when_stock_short() {
        assert!(requires_procurement(false, Some(0)));
        assert!(!requires_procurement(false, Some(3)));
        assert!(!requires_procurement(false, None));
    }

    #[test]
    fn pending_actions_for_open_procurement() {
        let actions = pending_actions(false, &["pending_approval"], false);
        assert!(actions.contains(&PENDING_PROCUREMENT_APPROVAL.to_string()));
        assert!(actions.contains(&PENDING_COMPLETION.to_string()));
        assert!(!actions.contains(&PENDING_PARTS_DELIVERY.to_string()));
    }

    #[test]
    fn pending_actions_for_ordered_parts_and_substitute() {
        let actions = pending_actions(false, &["ordered"], true);
        assert!(actions.contains(&PENDING_PARTS_DELIVERY.to_string()));
        assert!(actions.contains(&PENDING_REPLACEMENT_RETURN.to_string()));
    }

    #[test]
    fn completed_request_has_no_completion_action() {
        let actions = pending_actions(true, &["received"], false);
        assert!(actions.is_empty());
    }
}
