use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero and pads to exactly `dp` decimal places.
pub fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn pads_and_rounds_half_away_from_zero() {
        assert_eq!(fixed(dec!(12), 2), "12.00");
        assert_eq!(fixed(dec!(0.125), 2), "0.13");
        assert_eq!(fixed(dec!(-2.25), 1), "-2.3");
        assert_eq!(fixed(dec!(7.04), 0), "7");
    }
}
