use crate::moving_average::{rolling_ema, rolling_mean};
use chrono::NaiveDate;
use core_types::TimeSeries;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The indicator channels a chart can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "period")]
pub enum IndicatorSpec {
    Sma(usize),
    Ema(usize),
}

/// One chart row: the source value plus any requested indicator channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema: Option<Decimal>,
}

/// A `TimeSeries` annotated with indicator channels over the same date domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub name: String,
    pub sma_period: Option<usize>,
    pub ema_period: Option<usize>,
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Annotates `series` with the requested channels.
    ///
    /// Unlike [`crate::simple_moving_average`], a channel whose period cannot be
    /// satisfied does not fail: the series is returned with that channel left
    /// `None` everywhere, so a chart can still draw the raw values.
    pub fn annotate(series: &TimeSeries, specs: &[IndicatorSpec]) -> Self {
        let values = series.values();
        let mut sma = vec![None; values.len()];
        let mut ema = vec![None; values.len()];
        let mut sma_period = None;
        let mut ema_period = None;

        for spec in specs {
            match *spec {
                IndicatorSpec::Sma(period) => {
                    sma = rolling_mean(&values, period);
                    sma_period = Some(period);
                }
                IndicatorSpec::Ema(period) => {
                    ema = rolling_ema(&values, period);
                    ema_period = Some(period);
                }
            }
            if values.len() < spec.period() {
                tracing::debug!(
                    series = series.name(),
                    len = values.len(),
                    ?spec,
                    "Series shorter than indicator period; channel left empty"
                );
            }
        }

        let points = series
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| IndicatorPoint { date: p.date, value: p.value, sma: sma[i], ema: ema[i] })
            .collect();

        Self { name: series.name().to_string(), sma_period, ema_period, points }
    }
}

impl IndicatorSpec {
    pub fn period(&self) -> usize {
        match self {
            IndicatorSpec::Sma(p) | IndicatorSpec::Ema(p) => *p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn spend() -> TimeSeries {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        TimeSeries::from_pairs(
            "spend",
            [(d(1), dec!(10)), (d(2), dec!(20)), (d(3), dec!(30))],
        )
        .unwrap()
    }

    #[test]
    fn annotate_keeps_date_domain() {
        let out = IndicatorSeries::annotate(&spend(), &[IndicatorSpec::Sma(2), IndicatorSpec::Ema(2)]);
        assert_eq!(out.points.len(), 3);
        assert_eq!(out.points[0].sma, None);
        assert_eq!(out.points[1].sma, Some(dec!(15)));
        assert_eq!(out.points[2].sma, Some(dec!(25)));
        assert_eq!(out.points[1].ema, Some(dec!(15)));
        assert_eq!(out.sma_period, Some(2));
    }

    #[test]
    fn unsatisfiable_period_leaves_channel_empty() {
        let out = IndicatorSeries::annotate(&spend(), &[IndicatorSpec::Sma(10)]);
        assert!(out.points.iter().all(|p| p.sma.is_none()));
        assert_eq!(out.points[2].value, dec!(30));
    }
}
