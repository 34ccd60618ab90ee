//! Money rounding and proration helpers.
//!
//! Every stage rounds as soon as it produces a figure so that later stages
//! consume already-rounded values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to two decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("157.495").unwrap()), Decimal::from_str("157.50").unwrap());
/// assert_eq!(round_money(Decimal::from_str("-0.005").unwrap()), Decimal::from_str("-0.01").unwrap());
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a percentage rate to a base and rounds the result.
pub fn percent_of(base: Decimal, rate: Decimal) -> Decimal {
    round_money(base * rate / Decimal::ONE_HUNDRED)
}

/// Returns `days_worked / days_in_month` clamped to `[0, 1]`.
///
/// A non-positive `days_in_month` yields zero instead of dividing by zero;
/// such input is rejected before a calculation is started.
pub fn proration_factor(days_worked: i32, days_in_month: i32) -> Decimal {
    if days_in_month <= 0 {
        return Decimal::ZERO;
    }

    let factor = Decimal::from(days_worked) / Decimal::from(days_in_month);
    factor.clamp(Decimal::ZERO, Decimal::ONE)
}

/// Formats a monetary value with exactly two decimals.
pub(crate) fn fmt_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Formats a proration factor with four decimals.
pub(crate) fn fmt_factor(value: Decimal) -> String {
    format!(
        "{:.4}",
        value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec("682.4999")), dec("682.50"));
        assert_eq!(round_money(dec("682.495")), dec("682.50"));
        assert_eq!(round_money(dec("682.494")), dec("682.49"));
        assert_eq!(round_money(dec("-682.495")), dec("-682.50"));
    }

    #[test]
    fn test_round_money_is_idempotent() {
        let once = round_money(dec("13333.333333"));
        assert_eq!(round_money(once), once);
    }

    #[test]
    fn test_percent_of_rounds_result() {
        assert_eq!(percent_of(dec("21000"), dec("0.75")), dec("157.50"));
        assert_eq!(percent_of(dec("21000"), dec("3.25")), dec("682.50"));
        assert_eq!(percent_of(dec("12345.67"), dec("12")), dec("1481.48"));
    }

    #[test]
    fn test_proration_factor_partial_month() {
        assert_eq!(proration_factor(15, 30), dec("0.5"));
    }

    #[test]
    fn test_proration_factor_clamps_above_one() {
        assert_eq!(proration_factor(32, 30), Decimal::ONE);
    }

    #[test]
    fn test_proration_factor_clamps_below_zero() {
        assert_eq!(proration_factor(-3, 30), Decimal::ZERO);
    }

    #[test]
    fn test_proration_factor_zero_days_in_month() {
        assert_eq!(proration_factor(10, 0), Decimal::ZERO);
    }

    #[test]
    fn test_fmt_money_pads_to_two_decimals() {
        assert_eq!(fmt_money(dec("1800")), "1800.00");
        assert_eq!(fmt_money(dec("0.75")), "0.75");
        assert_eq!(fmt_money(dec("157.495")), "157.50");
    }

    #[test]
    fn test_fmt_factor_rounds_to_four_decimals() {
        assert_eq!(fmt_factor(proration_factor(20, 30)), "0.6667");
        assert_eq!(fmt_factor(Decimal::ONE), "1.0000");
    }
}
