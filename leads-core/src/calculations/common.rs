//! Shared arithmetic helpers for funnel and pricing calculations.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 round away from zero, which is how currency
/// amounts are presented.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use leads_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a decimal to a lead count.
///
/// Negative values floor to zero; values past `u32::MAX` saturate.
pub fn floor_count(value: Decimal) -> u32 {
    if value <= Decimal::ZERO {
        return 0;
    }
    value.floor().to_u32().unwrap_or(u32::MAX)
}

/// Applies a conversion ratio to a stage size and floors the result.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use leads_core::calculations::common::apply_ratio;
///
/// assert_eq!(apply_ratio(100, dec!(0.1325)), 13);
/// assert_eq!(apply_ratio(2, dec!(0.3333)), 0);
/// ```
pub fn apply_ratio(
    count: u32,
    ratio: Decimal,
) -> u32 {
    floor_count(Decimal::from(count) * ratio)
}
