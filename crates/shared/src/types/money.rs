//! Money rounding primitives.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All monetary amounts are `rust_decimal::Decimal`, and every derived value
//! passes through `round_money` so artifacts computed along different paths
//! agree to the cent.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Number of decimal places for monetary amounts.
pub const MONEY_DP: u32 = 2;

/// Rounds a monetary amount to 2 decimal places using Banker's Rounding.
///
/// Uses `RoundingStrategy::MidpointNearestEven` which:
/// - Rounds 2.125 → 2.12 (to nearest even)
/// - Rounds 2.135 → 2.14 (to nearest even)
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use sidegig_shared::types::money::round_money;
///
/// assert_eq!(round_money(dec!(10.005)), dec!(10.00));
/// assert_eq!(round_money(dec!(10.015)), dec!(10.02));
/// ```
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointNearestEven)
}

/// Applies a percentage to an amount, rounded to money precision.
///
/// `percent` is expressed as a whole-number percentage (e.g. `8.25` for
/// 8.25%), matching how tax rates are stored.
#[must_use]
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    round_money(amount * percent / Decimal::ONE_HUNDRED)
}
