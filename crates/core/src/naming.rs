//! Human-facing record number formatting.
//!
//! Request and procurement numbers are system-generated, unique, and stable:
//! `REQ-<year>-<seq>` and `PR-<year>-<seq>` with a zero-padded five digit
//! sequence. The sequence is per-year and comes from the database side
//! (count + 1 within a transaction).

/// Prefix for IT request numbers.
pub const REQUEST_PREFIX: &str = "REQ";

/// Prefix for procurement request numbers.
pub const PROCUREMENT_PREFIX: &str = "PR";

/// Width of the zero-padded sequence component.
pub const SEQUENCE_WIDTH: usize = 5;

/// Format an IT request number, e.g. `REQ-2026-00042`.
pub fn format_request_number(year: i32, seq: i64) -> String {
    format!("{REQUEST_PREFIX}-{year}-{seq:0width$}", width = SEQUENCE_WIDTH)
}

/// Format a procurement request number, e.g. `PR-2026-00007`.
pub fn format_procurement_number(year: i32, seq: i64) -> String {
    format!("{PROCUREMENT_PREFIX}-{year}-{seq:0width$}", width = SEQUENCE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_number_is_zero_padded() {
        assert_eq!(format_request_number(2026, 42), "REQ-2026-00042");
        assert_eq!(format_request_number(2026, 1), "REQ-2026-00001");
    }

    #[test]
    fn procurement_number_is_zero_padded() {
        assert_eq!(format_procurement_number(2026, 7), "PR-2026-00007");
    }

    #[test]
    fn large_sequences_are_not_truncated() {
        assert_eq!(format_request_number(2026, 123_456), "REQ-2026-123456");
    }
}
