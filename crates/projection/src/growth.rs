use crate::error::ProjectionError;
use crate::inflation::real_value;
use core_types::GrowthPoint;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: u32 = 12;

/// Simulates month-by-month compounding and reports one snapshot per completed year.
///
/// Each month the balance first accrues interest at `annual_rate_pct / 100 / 12`,
/// then receives `monthly_contribution`. Year 0 is the principal alone. A
/// horizon of zero years yields no points.
pub fn project_growth(
    principal: Decimal,
    monthly_contribution: Decimal,
    annual_rate_pct: Decimal,
    years: u32,
) -> Result<Vec<GrowthPoint>, ProjectionError> {
    if years == 0 {
        return Ok(Vec::new());
    }

    let monthly_rate = annual_rate_pct / dec!(100) / Decimal::from(MONTHS_PER_YEAR);
    let multiplier = Decimal::ONE + monthly_rate;

    let mut balance = principal;
    let mut contributions = principal;
    let mut points = Vec::with_capacity(years as usize + 1);
    points.push(GrowthPoint { period: 0, balance, contributions, interest: Decimal::ZERO });

    for year in 1..=years {
        for _ in 0..MONTHS_PER_YEAR {
            balance = balance
                .checked_mul(multiplier)
                .and_then(|b| b.checked_add(monthly_contribution))
                .ok_or_else(|| ProjectionError::Overflow(format!("balance in year {year}")))?;
            contributions = contributions
                .checked_add(monthly_contribution)
                .ok_or_else(|| ProjectionError::Overflow(format!("contributions in year {year}")))?;
        }
        points.push(GrowthPoint {
            period: year,
            balance,
            contributions,
            interest: balance - contributions,
        });
    }

    tracing::debug!(
        years,
        final_balance = %balance,
        "Growth projection complete"
    );

    Ok(points)
}

/// A row of the nominal-versus-real growth table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthRow {
    pub year: u32,
    pub nominal: Decimal,
    pub real: Decimal,
    pub contributions: Decimal,
    pub interest: Decimal,
}

/// Runs [`project_growth`] and pairs every yearly balance with its value in today's money.
pub fn growth_table(
    principal: Decimal,
    monthly_contribution: Decimal,
    annual_rate_pct: Decimal,
    years: u32,
    inflation_rate_pct: Decimal,
) -> Result<Vec<GrowthRow>, ProjectionError> {
    project_growth(principal, monthly_contribution, annual_rate_pct, years)?
        .into_iter()
        .map(|p| {
            Ok(GrowthRow {
                year: p.period,
                nominal: p.balance,
                real: real_value(p.balance, p.period, inflation_rate_pct)?,
                contributions: p.contributions,
                interest: p.interest,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_years_is_empty() {
        assert!(project_growth(dec!(1000), dec!(100), dec!(7), 0).unwrap().is_empty());
    }

    #[test]
    fn year_zero_is_principal_only() {
        let points = project_growth(dec!(1000), dec!(100), dec!(7), 1).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(
            points[0],
            GrowthPoint {
                period: 0,
                balance: dec!(1000),
                contributions: dec!(1000),
                interest: Decimal::ZERO
            }
        );
        assert_eq!(points[1].contributions, dec!(2200));
    }

    #[test]
    fn contribution_lands_after_interest() {
        // 12% a year is exactly 1% a month; with principal 0 the first deposit
        // earns nothing in its own month.
        let points = project_growth(Decimal::ZERO, dec!(100), dec!(12), 1).unwrap();
        let mut expected = Decimal::ZERO;
        for _ in 0..12 {
            expected = expected * dec!(1.01) + dec!(100);
        }
        assert_eq!(points[1].balance, expected);
        assert_eq!(points[1].interest, expected - dec!(1200));
    }

    #[test]
    fn zero_rate_and_contribution_keep_principal() {
        let points = project_growth(dec!(2500), Decimal::ZERO, Decimal::ZERO, 5).unwrap();
        assert!(points.iter().all(|p| p.balance == dec!(2500) && p.interest.is_zero()));
    }

    #[test]
    fn growth_table_discounts_each_year() {
        let rows = growth_table(dec!(1000), Decimal::ZERO, Decimal::ZERO, 2, dec!(10)).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].real, dec!(1000));
        assert_eq!(rows[2].nominal, dec!(1000));
        assert_eq!(rows[2].real.round_dp(2), dec!(826.45));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_balance_is_contributions_plus_interest(
            principal in 0i64..1_000_000,
            contribution in 0i64..10_000,
            rate_bp in 0i64..2_000,
            years in 0u32..40,
        ) {
            let rate = Decimal::new(rate_bp, 2);
            let points = project_growth(
                Decimal::from(principal),
                Decimal::from(contribution),
                rate,
                years,
            ).unwrap();
            prop_assert_eq!(points.len(), if years == 0 { 0 } else { years as usize + 1 });
            for p in &points {
                prop_assert_eq!(p.balance, p.contributions + p.interest);
                prop_assert!(p.balance >= p.contributions);
                if rate.is_zero() {
                    prop_assert_eq!(p.balance, p.contributions);
                }
            }
        }
    }
}
