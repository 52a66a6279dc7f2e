use crate::error::BacktestError;
use crate::result::{BacktestResult, PresetBacktest, StrategyComparison};
use analytics::AnalyticsEngine;
use chrono::NaiveDate;
use comparison::align_by_date;
use configuration::BacktestSettings;
use core_types::{DatedValue, TimeSeries};
use indicators::rolling_mean;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// The faster crossover always included in a strategy comparison.
const FAST_CROSSOVER: (usize, usize) = (20, 50);

/// Simple returns between consecutive prices, dated at the later price.
fn simple_returns(
    series: &str,
    dates: &[NaiveDate],
    prices: &[Decimal],
) -> Result<Vec<(NaiveDate, Decimal)>, BacktestError> {
    prices
        .windows(2)
        .zip(dates.iter().skip(1))
        .map(|(pair, date)| {
            let change = (pair[1] - pair[0])
                .checked_div(pair[0])
                .ok_or_else(|| BacktestError::ZeroPrice { series: series.to_string(), date: *date })?;
            Ok((*date, change))
        })
        .collect()
}

/// "SPY 60% / BND 40%", with each weight truncated to a whole percent.
pub fn allocation_label(weights: &BTreeMap<String, Decimal>) -> String {
    let total: Decimal = weights.values().sum();
    weights
        .iter()
        .map(|(asset, weight)| {
            let share = weight.checked_div(total).unwrap_or_default();
            let pct = (share * dec!(100)).trunc().to_i64().unwrap_or_default();
            format!("{asset} {pct}%")
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Replays price history through simple strategies and scores the result.
#[derive(Debug, Clone)]
pub struct Backtester {
    settings: BacktestSettings,
    analytics_engine: AnalyticsEngine,
}

impl Backtester {
    pub fn new(settings: BacktestSettings) -> Self {
        let analytics_engine = AnalyticsEngine::new(settings.risk_free_rate, settings.periods_per_year);
        Self { settings, analytics_engine }
    }

    /// Scores a return stream and turns it into a sampled equity curve.
    fn evaluate(
        &self,
        strategy_name: String,
        returns: &[(NaiveDate, Decimal)],
        total_trades: usize,
    ) -> Result<BacktestResult, BacktestError> {
        let initial = self.settings.initial_capital;
        let values: Vec<Decimal> = returns.iter().map(|(_, r)| *r).collect();
        let report = self.analytics_engine.calculate(&values, initial)?;

        let mut cumulative = Decimal::ONE;
        let curve: Vec<DatedValue> = returns
            .iter()
            .map(|(date, r)| {
                cumulative *= Decimal::ONE + *r;
                DatedValue::new(*date, initial * cumulative)
            })
            .collect();
        let equity_curve = curve
            .into_iter()
            .step_by(self.settings.sample_every.max(1))
            .collect();

        tracing::info!(
            strategy = %strategy_name,
            total_return = %report.total_return_pct.round_dp(2),
            trades = total_trades,
            "Backtest complete"
        );

        Ok(BacktestResult { strategy_name, report, total_trades, equity_curve })
    }

    /// Holds the asset for the whole period; one trade.
    pub fn buy_and_hold(&self, prices: &TimeSeries) -> Result<BacktestResult, BacktestError> {
        let name = "Buy & Hold";
        if prices.is_empty() {
            return Ok(BacktestResult::empty(name));
        }
        let returns = simple_returns(prices.name(), &prices.dates(), &prices.values())?;
        self.evaluate(name.to_string(), &returns, 1)
    }

    /// Invested while the `short` SMA is above the `long` SMA, in cash otherwise.
    ///
    /// A signal computed at the close of one bar earns the next bar's return.
    /// Every change of signal counts as a trade. Fewer prices than `long` yields
    /// an empty result.
    pub fn sma_crossover(
        &self,
        prices: &TimeSeries,
        short: usize,
        long: usize,
    ) -> Result<BacktestResult, BacktestError> {
        if short == 0 || short >= long {
            return Err(BacktestError::InvalidWindows { short, long });
        }
        let name = format!("SMA {short}/{long}");
        if prices.len() < long {
            tracing::warn!(strategy = %name, prices = prices.len(), "Not enough prices for crossover");
            return Ok(BacktestResult::empty(name));
        }

        let values = prices.values();
        let short_sma = rolling_mean(&values, short);
        let long_sma = rolling_mean(&values, long);
        let invested: Vec<bool> = short_sma
            .iter()
            .zip(&long_sma)
            .map(|pair| matches!(pair, (Some(s), Some(l)) if s > l))
            .collect();

        let total_trades = invested.windows(2).filter(|w| w[0] != w[1]).count();

        let returns: Vec<(NaiveDate, Decimal)> = simple_returns(prices.name(), &prices.dates(), &values)?
            .into_iter()
            .zip(&invested)
            .map(|((date, r), held)| (date, if *held { r } else { Decimal::ZERO }))
            .collect();

        self.evaluate(name, &returns, total_trades)
    }

    /// A fixed-weight portfolio over several assets, never rebalanced.
    ///
    /// Weights are normalized to sum to one. Prices are aligned on the union of
    /// dates, gaps are forward-filled, and dates before every asset has a price
    /// are dropped. The portfolio return of a day is the weighted sum of the
    /// assets' returns.
    pub fn allocation(
        &self,
        name: &str,
        weights: &BTreeMap<String, Decimal>,
        prices: &[TimeSeries],
    ) -> Result<BacktestResult, BacktestError> {
        let total: Decimal = weights.values().sum();
        if total <= Decimal::ZERO || weights.values().any(|w| w.is_sign_negative()) {
            return Err(BacktestError::InvalidWeights(total));
        }

        let mut selected = Vec::with_capacity(weights.len());
        for asset in weights.keys() {
            let series = prices
                .iter()
                .find(|s| s.name() == asset.as_str())
                .ok_or_else(|| BacktestError::MissingPrices(asset.clone()))?;
            selected.push(series.clone());
        }
        let table = align_by_date(&selected)?;

        // Forward-fill; a row is usable once every asset has been seen.
        let mut last: BTreeMap<&str, Decimal> = BTreeMap::new();
        let mut dates = Vec::new();
        let mut filled: BTreeMap<&str, Vec<Decimal>> = BTreeMap::new();
        for row in &table.rows {
            for asset in weights.keys() {
                if let Some(v) = row.get(asset) {
                    last.insert(asset.as_str(), v);
                }
            }
            if last.len() == weights.len() {
                dates.push(row.date);
                for (asset, v) in &last {
                    filled.entry(*asset).or_default().push(*v);
                }
            }
        }

        let mut portfolio: Vec<(NaiveDate, Decimal)> = dates
            .iter()
            .skip(1)
            .map(|d| (*d, Decimal::ZERO))
            .collect();
        for (asset, weight) in weights {
            let Some(asset_prices) = filled.get(asset.as_str()) else {
                continue;
            };
            let returns = simple_returns(asset, &dates, asset_prices)?;
            for (slot, (_, r)) in portfolio.iter_mut().zip(returns) {
                slot.1 += *weight / total * r;
            }
        }

        self.evaluate(name.to_string(), &portfolio, 1)
    }

    /// Runs one of the configured allocation presets.
    pub fn preset(&self, key: &str, prices: &[TimeSeries]) -> Result<PresetBacktest, BacktestError> {
        let preset = self
            .settings
            .presets
            .get(key)
            .ok_or_else(|| BacktestError::UnknownPreset(key.to_string()))?;
        let result = self.allocation(&preset.name, &preset.allocation, prices)?;
        Ok(PresetBacktest {
            preset: key.to_string(),
            name: preset.name.clone(),
            description: preset.description.clone(),
            allocation: preset.allocation.clone(),
            result,
        })
    }

    /// Buy and hold against the configured crossover and a faster 20/50 one.
    pub fn compare_strategies(&self, prices: &TimeSeries) -> Result<StrategyComparison, BacktestError> {
        let (fast_short, fast_long) = FAST_CROSSOVER;
        let mut strategies = vec![
            self.buy_and_hold(prices)?,
            self.sma_crossover(prices, self.settings.short_window, self.settings.long_window)?,
        ];
        if (fast_short, fast_long) != (self.settings.short_window, self.settings.long_window) {
            strategies.push(self.sma_crossover(prices, fast_short, fast_long)?);
        }

        let curves = strategies
            .iter()
            .map(|s| TimeSeries::new(s.strategy_name.clone(), s.equity_curve.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        let equity_table = align_by_date(&curves)?;

        Ok(StrategyComparison { strategies, equity_table })
    }
}
