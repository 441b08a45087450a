//! Display helpers for user-facing notification copy.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{MONEY_DISPLAY_PRECISION, PERCENT_DISPLAY_PRECISION};

/// `$1234.50`, with a leading minus for negative amounts.
pub fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(
        MONEY_DISPLAY_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

/// Rounds a percentage for display (one decimal).
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        PERCENT_DISPLAY_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money() {
        assert_eq!(money(dec!(665)), "$665.00");
        assert_eq!(money(dec!(10.005)), "$10.01");
        assert_eq!(money(dec!(-42.5)), "-$42.50");
        assert_eq!(money(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(dec!(63.3333)), dec!(63.3));
        assert_eq!(round_percent(dec!(12.25)), dec!(12.3));
    }
}
