//! Shared helpers for the calculators.

use rust_decimal::Decimal;

/// Rounds a monetary value to two decimal places using half-up rounding
/// (midpoint away from zero), the standard financial convention.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}
