//! Amount formatting for display tables.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` everywhere; this module only renders them.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with exactly two decimal digits.
///
/// Rounds half away from zero, the way amounts are shown on receipts.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Avoid rendering "-0.00".
    if rounded.is_zero() {
        return "0.00".to_string();
    }
    format!("{rounded:.2}")
}
