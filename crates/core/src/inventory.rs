//! Inventory stock-movement constants and quantity arithmetic.
//!
//! Every quantity change on an inventory item is paired with a movement
//! ledger row; the arithmetic here is the single place that decides how a
//! movement affects the stock level and enforces that stock never goes
//! negative.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Movement type constants
// ---------------------------------------------------------------------------

/// Goods received into the warehouse.
pub const MOVEMENT_STOCK_IN: &str = "stock_in";
/// Goods issued out of the warehouse.
pub const MOVEMENT_STOCK_OUT: &str = "stock_out";
/// Stock consumed by installing it into an asset.
pub const MOVEMENT_DEPLOY: &str = "deploy";
/// Stock relocated between storage locations; quantity unchanged.
pub const MOVEMENT_TRANSFER: &str = "transfer";

/// All valid movement types.
pub const VALID_MOVEMENT_TYPES: &[&str] = &[
    MOVEMENT_STOCK_IN,
    MOVEMENT_STOCK_OUT,
    MOVEMENT_DEPLOY,
    MOVEMENT_TRANSFER,
];

// ---------------------------------------------------------------------------
// Quantity arithmetic
// ---------------------------------------------------------------------------

/// Compute the stock level after applying a movement of `quantity` units.
///
/// `quantity` must be positive for every movement type; the movement type
/// decides the sign. Transfers leave the level unchanged. Returns
/// `Validation` when the movement would drive the level negative.
pub fn apply_movement(
    current: i64,
    movement_type: &str,
    quantity: i64,
) -> Result<i64, CoreError> {
    if quantity <= 0 {
        return Err(CoreError::Validation(format!(
            "Movement quantity must be positive (got {quantity})"
        )));
    }

    let next = match movement_type {
        MOVEMENT_STOCK_IN => current + quantity,
        MOVEMENT_STOCK_OUT | MOVEMENT_DEPLOY => current - quantity,
        MOVEMENT_TRANSFER => current,
        other => {
            return Err(CoreError::Validation(format!(
                "Invalid movement type '{other}'. Must be one of: {VALID_MOVEMENT_TYPES:?}"
            )))
        }
    };

    if next < 0 {
        return Err(CoreError::Validation(format!(
            "Insufficient stock: {current} on hand, movement of {quantity} would leave {next}"
        )));
    }

    Ok(next)
}

/// Whether the stock level has fallen to or below the reorder threshold.
pub fn is_low_stock(quantity: i64, minimum_level: i64) -> bool {
    quantity <= minimum_level
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_in_adds() {
        assert_eq!(apply_movement(10, MOVEMENT_STOCK_IN, 5).unwrap(), 15);
    }

    #[test]
    fn stock_out_and_deploy_subtract() {
        assert_eq!(apply_movement(10, MOVEMENT_STOCK_OUT, 4).unwrap(), 6);
        assert_eq!(apply_movement(10, MOVEMENT_DEPLOY, 10).unwrap(), 0);
    }

    #[test]
    fn transfer_leaves_quantity_unchanged() {
        assert_eq!(apply_movement(10, MOVEMENT_TRANSFER, 3).unwrap(), 10);
    }

    #[test]
    fn stock_never_goes_negative() {
        let err = apply_movement(3, MOVEMENT_STOCK_OUT, 4).unwrap_err();
        assert!(err.to_string().contains("Insufficient stock"));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        assert!(apply_movement(10, MOVEMENT_STOCK_IN, 0).is_err());
        assert!(apply_movement(10, MOVEMENT_STOCK_IN, -1).is_err());
    }

    #[test]
    fn unknown_movement_type_is_rejected() {
        assert!(apply_movement(10, "adjust", 1).is_err());
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        assert!(is_low_stock(5, 5));
        assert!(is_low_stock(4, 5));
        assert!(!is_low_stock(6, 5));
    }
}
