use crate::error::AnalyticsError;
use crate::report::PerformanceReport;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

/// A stateless calculator for deriving performance metrics from periodic returns.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    /// Annual risk-free rate as a fraction.
    risk_free_rate: Decimal,
    periods_per_year: u32,
}

fn mean(values: &[Decimal]) -> Decimal {
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}

/// Sample standard deviation (n - 1). `None` for fewer than two values.
fn sample_std_dev(values: &[Decimal]) -> Result<Option<Decimal>, AnalyticsError> {
    if values.len() < 2 {
        return Ok(None);
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (*v - m) * (*v - m)).sum::<Decimal>()
        / Decimal::from(values.len() - 1);
    variance
        .sqrt()
        .map(Some)
        .ok_or_else(|| AnalyticsError::Calculation("square root of variance".to_string()))
}

fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}

impl AnalyticsEngine {
    pub fn new(risk_free_rate: Decimal, periods_per_year: u32) -> Self {
        Self { risk_free_rate, periods_per_year }
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `returns` - Simple periodic returns as fractions (0.01 for +1%).
    /// * `initial_value` - The value invested before the first return.
    ///
    /// # Returns
    ///
    /// A zeroed report when fewer than two returns are given.
    pub fn calculate(
        &self,
        returns: &[Decimal],
        initial_value: Decimal,
    ) -> Result<PerformanceReport, AnalyticsError> {
        if initial_value <= Decimal::ZERO {
            return Err(AnalyticsError::InvalidInitialValue(initial_value));
        }
        if self.periods_per_year == 0 {
            return Err(AnalyticsError::InvalidPeriodsPerYear);
        }
        if returns.len() < 2 {
            tracing::debug!(returns = returns.len(), "Too few returns to score");
            return Ok(PerformanceReport::new());
        }

        let periods = Decimal::from(self.periods_per_year);
        let annualizer = periods
            .sqrt()
            .ok_or_else(|| AnalyticsError::Calculation("square root of periods".to_string()))?;

        // Growth of one unit after each period.
        let mut growth = Vec::with_capacity(returns.len());
        let mut cumulative = Decimal::ONE;
        for r in returns {
            cumulative = cumulative
                .checked_mul(Decimal::ONE + *r)
                .ok_or_else(|| AnalyticsError::Calculation("cumulative return overflow".to_string()))?;
            growth.push(cumulative);
        }

        let total_return_pct = (cumulative - Decimal::ONE) * dec!(100);
        let cagr_pct = self.cagr(cumulative, returns.len()).map(|c| c * dec!(100));

        let std_dev = positive(sample_std_dev(returns)?);
        let volatility_pct = std_dev.map_or(Decimal::ZERO, |s| s * annualizer * dec!(100));

        let excess_mean = mean(returns) - self.risk_free_rate / periods;
        let sharpe_ratio = std_dev.map(|s| annualizer * excess_mean / s);

        let downside: Vec<Decimal> = returns.iter().copied().filter(|r| *r < Decimal::ZERO).collect();
        let sortino_ratio = positive(sample_std_dev(&downside)?).map(|s| annualizer * excess_mean / s);

        let max_drawdown_pct = Self::max_drawdown(&growth) * dec!(100);

        let wins = returns.iter().filter(|r| **r > Decimal::ZERO).count();
        let win_rate_pct = Decimal::from(wins) / Decimal::from(returns.len()) * dec!(100);

        let report = PerformanceReport {
            total_return_pct,
            cagr_pct,
            volatility_pct,
            sharpe_ratio,
            sortino_ratio,
            max_drawdown_pct,
            win_rate_pct,
            final_value: initial_value * cumulative,
        };

        tracing::debug!(
            periods = returns.len(),
            total_return = %report.total_return_pct,
            max_drawdown = %report.max_drawdown_pct,
            "Performance calculated"
        );

        Ok(report)
    }

    /// Annualized growth; zero when the series was wiped out.
    ///
    /// `None` when annualizing a short, steep series leaves the decimal range.
    fn cagr(&self, cumulative: Decimal, count: usize) -> Option<Decimal> {
        if cumulative <= Decimal::ZERO {
            return Some(Decimal::ZERO);
        }
        let years = Decimal::from(count) / Decimal::from(self.periods_per_year);
        let exponent = Decimal::ONE / years;
        let annualized = cumulative.checked_powd(exponent).map(|v| v - Decimal::ONE);
        if annualized.is_none() {
            tracing::warn!(%cumulative, %exponent, "CAGR is out of range");
        }
        annualized
    }

    /// Largest relative fall from a running peak, as a non-positive fraction.
    ///
    /// Peaks are taken from the growth path itself, starting after the first period.
    fn max_drawdown(growth: &[Decimal]) -> Decimal {
        let mut worst = Decimal::ZERO;
        let mut peak = match growth.first() {
            Some(first) => *first,
            None => return worst,
        };
        for value in growth {
            if *value > peak {
                peak = *value;
            }
            if let Some(drawdown) = (*value - peak).checked_div(peak) {
                if peak > Decimal::ZERO && drawdown < worst {
                    worst = drawdown;
                }
            }
        }
        worst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine() -> AnalyticsEngine {
        AnalyticsEngine::new(dec!(0.05), 252)
    }

    #[test]
    fn fewer_than_two_returns_is_zeroed() {
        assert_eq!(engine().calculate(&[], dec!(10000)).unwrap(), PerformanceReport::new());
        assert_eq!(engine().calculate(&[dec!(0.1)], dec!(10000)).unwrap(), PerformanceReport::new());
    }

    #[test]
    fn total_return_and_final_value_compound() {
        let report = engine().calculate(&[dec!(0.1), dec!(-0.1)], dec!(10000)).unwrap();
        assert_eq!(report.total_return_pct, dec!(-1));
        assert_eq!(report.final_value, dec!(9900));
        assert_eq!(report.win_rate_pct, dec!(50));
    }

    #[test]
    fn drawdown_is_measured_from_running_peak() {
        // Path: 1.1, 0.88, 1.056
        let report = engine().calculate(&[dec!(0.1), dec!(-0.2), dec!(0.2)], dec!(1)).unwrap();
        assert_eq!(report.max_drawdown_pct, dec!(-20));
    }

    #[test]
    fn constant_returns_have_no_ratios() {
        let report = engine().calculate(&[dec!(0.01); 5], dec!(100)).unwrap();
        assert_eq!(report.volatility_pct, Decimal::ZERO);
        assert_eq!(report.sharpe_ratio, None);
        assert_eq!(report.sortino_ratio, None);
        assert_eq!(report.max_drawdown_pct, Decimal::ZERO);
        assert_eq!(report.win_rate_pct, dec!(100));
    }

    #[test]
    fn sortino_needs_two_losing_periods() {
        let report = engine().calculate(&[dec!(0.02), dec!(-0.01), dec!(0.01)], dec!(100)).unwrap();
        assert!(report.sharpe_ratio.is_some());
        assert_eq!(report.sortino_ratio, None);

        let report = engine()
            .calculate(&[dec!(0.02), dec!(-0.01), dec!(-0.03), dec!(0.01)], dec!(100))
            .unwrap();
        assert!(report.sortino_ratio.is_some());
    }

    #[test]
    fn one_year_of_periods_has_cagr_equal_to_total_return() {
        let engine = AnalyticsEngine::new(Decimal::ZERO, 2);
        let report = engine.calculate(&[dec!(0.1), dec!(0.1)], dec!(100)).unwrap();
        assert_eq!(report.total_return_pct, dec!(21));
        assert_eq!(report.cagr_pct.map(|c| c.round_dp(6)), Some(dec!(21)));
    }

    #[test]
    fn wiped_out_series_has_zero_cagr() {
        let report = engine().calculate(&[dec!(0.5), dec!(-1)], dec!(100)).unwrap();
        assert_eq!(report.final_value, Decimal::ZERO);
        assert_eq!(report.cagr_pct, Some(Decimal::ZERO));
        assert_eq!(report.max_drawdown_pct, dec!(-100));
    }

    #[test]
    fn short_steep_series_reports_other_metrics_without_cagr() {
        // Two daily doublings annualize to 4^126.
        let report = engine().calculate(&[dec!(1), dec!(1)], dec!(10000)).unwrap();
        assert_eq!(report.cagr_pct, None);
        assert_eq!(report.total_return_pct, dec!(300));
        assert_eq!(report.final_value, dec!(40000));
        assert_eq!(report.win_rate_pct, dec!(100));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert_eq!(
            engine().calculate(&[dec!(0.1), dec!(0.1)], Decimal::ZERO),
            Err(AnalyticsError::InvalidInitialValue(Decimal::ZERO))
        );
        assert_eq!(
            AnalyticsEngine::new(dec!(0.05), 0).calculate(&[dec!(0.1), dec!(0.1)], dec!(1)),
            Err(AnalyticsError::InvalidPeriodsPerYear)
        );
    }

    proptest! {
        #[test]
        fn drawdown_is_never_positive(bps in prop::collection::vec(-500i64..500, 2..40)) {
            let returns: Vec<Decimal> = bps.iter().map(|b| Decimal::new(*b, 4)).collect();
            let monthly = AnalyticsEngine::new(dec!(0.05), 12);
            let report = monthly.calculate(&returns, dec!(10000)).unwrap();
            prop_assert!(report.max_drawdown_pct <= Decimal::ZERO);
            prop_assert!(report.win_rate_pct >= Decimal::ZERO && report.win_rate_pct <= dec!(100));
        }
    }
}
