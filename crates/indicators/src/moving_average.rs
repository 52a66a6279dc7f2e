use crate::error::IndicatorError;
use core_types::TimeSeries;
use rust_decimal::Decimal;

/// Trailing simple moving average of `series`.
///
/// The output has one entry per input point: `None` while fewer than `period`
/// points are available, then the arithmetic mean of the trailing window.
pub fn simple_moving_average(
    series: &TimeSeries,
    period: usize,
) -> Result<Vec<Option<Decimal>>, IndicatorError> {
    check_period(series, period)?;
    Ok(rolling_mean(&series.values(), period))
}

/// Exponential moving average of `series`, seeded with the SMA of the first `period` points.
///
/// Subsequent values follow `ema[i] = (value[i] - ema[i-1]) * 2/(period+1) + ema[i-1]`.
pub fn exponential_moving_average(
    series: &TimeSeries,
    period: usize,
) -> Result<Vec<Option<Decimal>>, IndicatorError> {
    check_period(series, period)?;
    Ok(rolling_ema(&series.values(), period))
}

fn check_period(series: &TimeSeries, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }
    if series.len() < period {
        return Err(IndicatorError::InsufficientData {
            series: series.name().to_string(),
            len: series.len(),
            period,
        });
    }
    Ok(())
}

fn window_mean(window: &[Decimal]) -> Decimal {
    let sum: Decimal = window.iter().sum();
    sum / Decimal::from(window.len())
}

/// Lenient SMA over raw values: a period of zero or longer than the input yields all `None`.
pub fn rolling_mean(values: &[Decimal], period: usize) -> Vec<Option<Decimal>> {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    let mut out = vec![None; period - 1];
    out.extend(values.windows(period).map(|w| Some(window_mean(w))));
    out
}

/// Lenient EMA over raw values, with the same warm-up rules as [`rolling_mean`].
pub fn rolling_ema(values: &[Decimal], period: usize) -> Vec<Option<Decimal>> {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    let multiplier = Decimal::TWO / Decimal::from(period + 1);
    let seed = window_mean(&values[..period]);

    let mut out = vec![None; period - 1];
    out.push(Some(seed));

    let mut prev = seed;
    for value in &values[period..] {
        let next = (*value - prev) * multiplier + prev;
        out.push(Some(next));
        prev = next;
    }
    out
}
