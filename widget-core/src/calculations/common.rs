//! Common utility functions for paycheck calculations.
//!
//! Calculations keep full precision; these helpers are for the points where
//! a figure is floored or shown to a person.

use rust_decimal::{Decimal, RoundingStrategy};

/// Local income tax as a fraction of income tax.
pub const LOCAL_INCOME_TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Months per year, used when annualizing or de-annualizing.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Rounds a decimal value to a whole won using half-up rounding.
///
/// Values at exactly 0.5 round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use widget_core::calculations::common::round_won;
///
/// assert_eq!(round_won(dec!(1234.49)), dec!(1234));
/// assert_eq!(round_won(dec!(1234.5)), dec!(1235));
/// assert_eq!(round_won(dec!(-1234.5)), dec!(-1235)); // Away from zero
/// ```
pub fn round_won(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value`, or zero when it is negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use widget_core::calculations::common::floor_zero;
///
/// assert_eq!(floor_zero(dec!(-5)), dec!(0));
/// assert_eq!(floor_zero(dec!(5)), dec!(5));
/// ```
pub fn floor_zero(value: Decimal) -> Decimal {
    if value > Decimal::ZERO { value } else { Decimal::ZERO }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_won tests
    // =========================================================================

    #[test]
    fn round_won_rounds_down_below_midpoint() {
        assert_eq!(round_won(dec!(17737.49)), dec!(17737));
    }

    #[test]
    fn round_won_rounds_up_at_midpoint() {
        assert_eq!(round_won(dec!(17737.5)), dec!(17738));
    }

    #[test]
    fn round_won_handles_long_fractions() {
        assert_eq!(round_won(dec!(4166666.6666666666666666666667)), dec!(4166667));
    }

    #[test]
    fn round_won_handles_zero() {
        assert_eq!(round_won(dec!(0.00)), dec!(0));
    }

    // =========================================================================
    // floor_zero tests
    // =========================================================================

    #[test]
    fn floor_zero_keeps_positive_values() {
        assert_eq!(floor_zero(dec!(150.25)), dec!(150.25));
    }

    #[test]
    fn floor_zero_clamps_negative_values() {
        assert_eq!(floor_zero(dec!(-0.01)), dec!(0));
    }

    // =========================================================================
    // constant tests
    // =========================================================================

    #[test]
    fn constants_have_expected_values() {
        assert_eq!(LOCAL_INCOME_TAX_RATE, dec!(0.1));
        assert_eq!(MONTHS_PER_YEAR, dec!(12));
    }
}
