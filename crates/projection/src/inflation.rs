use crate::error::ProjectionError;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

fn growth_factor(rate_pct: Decimal) -> Result<Decimal, ProjectionError> {
    let factor = Decimal::ONE + rate_pct / dec!(100);
    if factor <= Decimal::ZERO {
        return Err(ProjectionError::InvalidRate(rate_pct));
    }
    Ok(factor)
}

/// Discounts a nominal amount `years` into the future back to today's money.
///
/// `nominal / (1 + inflation/100)^years`. Inflation is applied once, to the
/// horizon value, not to each intermediate contribution.
pub fn real_value(
    nominal: Decimal,
    years: u32,
    inflation_rate_pct: Decimal,
) -> Result<Decimal, ProjectionError> {
    let factor = growth_factor(inflation_rate_pct)?;
    let discount = factor
        .checked_powi(i64::from(years))
        .ok_or_else(|| ProjectionError::Overflow("inflation discount factor".to_string()))?;

    nominal
        .checked_div(discount)
        .ok_or_else(|| ProjectionError::Overflow("real value".to_string()))
}

/// Real rate of return in percent: `((1 + n/100) / (1 + i/100) - 1) * 100`.
pub fn real_return_rate(
    nominal_rate_pct: Decimal,
    inflation_rate_pct: Decimal,
) -> Result<Decimal, ProjectionError> {
    let inflation = growth_factor(inflation_rate_pct)?;
    let nominal = Decimal::ONE + nominal_rate_pct / dec!(100);
    Ok((nominal / inflation - Decimal::ONE) * dec!(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn real_value_discounts_by_compounded_inflation() {
        // 1.1^2 = 1.21
        assert_eq!(real_value(dec!(121), 2, dec!(10)).unwrap(), dec!(100));
    }

    #[test]
    fn zero_inflation_is_identity() {
        assert_eq!(real_value(dec!(5000), 30, Decimal::ZERO).unwrap(), dec!(5000));
    }

    #[test]
    fn fisher_rate_matches_hand_calculation() {
        // 1.07 / 1.03 - 1 = 0.0388349...
        let rate = real_return_rate(dec!(7), dec!(3)).unwrap();
        assert_eq!(rate.round_dp(4), dec!(3.8835));
    }

    #[test]
    fn hyperdeflation_is_rejected() {
        assert_eq!(
            real_value(dec!(1), 1, dec!(-100)).unwrap_err(),
            ProjectionError::InvalidRate(dec!(-100))
        );
        assert!(real_return_rate(dec!(5), dec!(-150)).is_err());
    }

    proptest! {
        #[test]
        fn prop_no_time_means_no_discount(value in -1_000_000_000i64..1_000_000_000, bp in 0i64..5_000) {
            let v = Decimal::new(value, 2);
            prop_assert_eq!(real_value(v, 0, Decimal::new(bp, 2)).unwrap(), v);
        }
    }
}
