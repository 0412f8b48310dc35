//! Money precision helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount that crosses the core boundary is a `rust_decimal::Decimal`
//! carrying [`MINOR_UNIT_DIGITS`] fractional digits.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of minor-unit digits for the ledger currency.
pub const MINOR_UNIT_DIGITS: u32 = 2;

/// One minor unit (0.01). Used as the tolerance for balance and schedule checks.
pub const MINOR_UNIT: Decimal = Decimal::from_parts(1, 0, 0, false, MINOR_UNIT_DIGITS);

/// Rounds an amount to the minor unit using Banker's Rounding.
///
/// Uses `RoundingStrategy::MidpointNearestEven`, so 0.125 → 0.12 and 0.135 → 0.14.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_UNIT_DIGITS, RoundingStrategy::MidpointNearestEven)
}

/// Returns true if two amounts differ by no more than one minor unit.
#[must_use]
pub fn within_minor_unit(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= MINOR_UNIT
}

/// Returns true if the amount carries no more than [`MINOR_UNIT_DIGITS`] digits.
#[must_use]
pub fn is_minor_unit_precise(amount: Decimal) -> bool {
    amount.normalize().scale() <= MINOR_UNIT_DIGITS
}
