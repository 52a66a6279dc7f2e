use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its `Default`, so an empty or missing
/// `config.toml` still yields a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub milestones: MilestoneSettings,
    #[serde(default)]
    pub spending: SpendingSettings,
    #[serde(default)]
    pub scenario: ScenarioSettings,
    #[serde(default)]
    pub backtest: BacktestSettings,
}

/// Where and how verbosely the binary logs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// Fallback filter directive when `RUST_LOG` is not set (e.g. "info", "goals=debug").
    pub level: String,
    /// If set, logs are additionally written to a daily-rolling file in this directory.
    pub directory: Option<String>,
}

/// Default look-back periods for the charting indicators.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub sma_period: usize,
    pub ema_period: usize,
}

/// Net-worth milestone ladder and progress checkpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MilestoneSettings {
    /// Ascending round-number targets used to auto-escalate a net-worth goal.
    pub ladder: Vec<Decimal>,
    /// Percent-of-goal checkpoints, ascending, each in (0, 100].
    pub checkpoints: Vec<Decimal>,
    /// Progress (in percent) at or above which a goal counts as on track.
    pub on_track_threshold_pct: Decimal,
}

/// Thresholds for the spending summary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpendingSettings {
    /// Month-over-month change (in percent) beyond which a category is trending.
    pub trend_threshold_pct: Decimal,
    /// Standard deviations above the category mean that flag an anomaly.
    pub anomaly_std_devs: Decimal,
}

/// Defaults for the what-if scenario planner.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    pub months: u32,
    /// Annual return in percent (7 means 7%).
    pub investment_return_rate: Decimal,
    /// Annual inflation in percent.
    pub inflation_rate: Decimal,
    pub emergency_fund_target: Decimal,
    pub retirement_goal: Decimal,
    /// Horizon of the investment growth table, in years.
    pub projection_years: u32,
}

/// Parameters for the historical backtests.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    pub initial_capital: Decimal,
    /// Annual risk-free rate as a fraction (0.05 for 5%).
    pub risk_free_rate: Decimal,
    /// Return periods per year used to annualize (252 trading days).
    pub periods_per_year: u32,
    /// Keep every n-th point of an equity curve.
    pub sample_every: usize,
    pub short_window: usize,
    pub long_window: usize,
    pub presets: BTreeMap<String, AllocationPreset>,
}

/// A named portfolio allocation, weights keyed by ticker.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationPreset {
    pub name: String,
    pub description: String,
    pub allocation: BTreeMap<String, Decimal>,
}

// --- Default Implementations ---

impl Default for Logging {
    fn default() -> Self {
        Self { level: "info".to_string(), directory: None }
    }
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self { sma_period: 20, ema_period: 20 }
    }
}

impl Default for MilestoneSettings {
    fn default() -> Self {
        Self {
            ladder: vec![
                dec!(50000),
                dec!(100000),
                dec!(250000),
                dec!(500000),
                dec!(1000000),
                dec!(2500000),
                dec!(5000000),
            ],
            checkpoints: vec![dec!(25), dec!(50), dec!(75), dec!(90), dec!(100)],
            on_track_threshold_pct: dec!(50),
        }
    }
}

impl Default for SpendingSettings {
    fn default() -> Self {
        Self { trend_threshold_pct: dec!(10), anomaly_std_devs: dec!(2) }
    }
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            months: 12,
            investment_return_rate: dec!(7),
            inflation_rate: dec!(3),
            emergency_fund_target: dec!(10000),
            retirement_goal: dec!(500000),
            projection_years: 10,
        }
    }
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            initial_capital: dec!(10000),
            risk_free_rate: dec!(0.05),
            periods_per_year: 252,
            sample_every: 5,
            short_window: 50,
            long_window: 200,
            presets: default_presets(),
        }
    }
}

fn preset(name: &str, description: &str, weights: &[(&str, Decimal)]) -> AllocationPreset {
    AllocationPreset {
        name: name.to_string(),
        description: description.to_string(),
        allocation: weights.iter().map(|(t, w)| (t.to_string(), *w)).collect(),
    }
}

fn default_presets() -> BTreeMap<String, AllocationPreset> {
    let mut presets = BTreeMap::new();
    presets.insert(
        "60_40".to_string(),
        preset(
            "60/40 Stock/Bond",
            "Classic balanced portfolio with 60% stocks, 40% bonds",
            &[("SPY", dec!(0.6)), ("BND", dec!(0.4))],
        ),
    );
    presets.insert(
        "sp500".to_string(),
        preset("S&P 500 Only", "100% invested in S&P 500 index", &[("SPY", dec!(1.0))]),
    );
    presets.insert(
        "aggressive".to_string(),
        preset(
            "Aggressive Growth",
            "80% stocks, 10% international, 10% bonds",
            &[("SPY", dec!(0.8)), ("VEU", dec!(0.1)), ("BND", dec!(0.1))],
        ),
    );
    presets.insert(
        "conservative".to_string(),
        preset(
            "Conservative",
            "40% stocks, 60% bonds",
            &[("SPY", dec!(0.4)), ("BND", dec!(0.6))],
        ),
    );
    presets.insert(
        "all_weather".to_string(),
        preset(
            "All Weather",
            "Ray Dalio inspired diversified allocation",
            &[
                ("SPY", dec!(0.3)),
                ("TLT", dec!(0.4)),
                ("IEI", dec!(0.15)),
                ("GLD", dec!(0.075)),
                ("DBC", dec!(0.075)),
            ],
        ),
    );
    presets
}

// --- Validation ---

fn strictly_ascending(values: &[Decimal]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

impl Config {
    /// Checks cross-field invariants that serde alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.milestones;
        if m.ladder.is_empty() || !strictly_ascending(&m.ladder) {
            return Err(ConfigError::ValidationError(
                "milestones.ladder must be non-empty and strictly ascending".to_string(),
            ));
        }
        if m.ladder[0] <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "milestones.ladder entries must be positive".to_string(),
            ));
        }
        if !strictly_ascending(&m.checkpoints)
            || m.checkpoints.iter().any(|c| *c <= Decimal::ZERO || *c > dec!(100))
        {
            return Err(ConfigError::ValidationError(
                "milestones.checkpoints must be strictly ascending and within (0, 100]".to_string(),
            ));
        }

        if self.indicators.sma_period == 0 || self.indicators.ema_period == 0 {
            return Err(ConfigError::ValidationError(
                "indicator periods must be at least 1".to_string(),
            ));
        }

        if self.spending.trend_threshold_pct < Decimal::ZERO
            || self.spending.anomaly_std_devs <= Decimal::ZERO
        {
            return Err(ConfigError::ValidationError(
                "spending thresholds must be positive".to_string(),
            ));
        }

        if self.scenario.months == 0 {
            return Err(ConfigError::ValidationError("scenario.months must be at least 1".to_string()));
        }
        if self.scenario.inflation_rate <= dec!(-100) {
            return Err(ConfigError::ValidationError(
                "scenario.inflation_rate must be greater than -100".to_string(),
            ));
        }

        let b = &self.backtest;
        if b.sample_every == 0 || b.periods_per_year == 0 {
            return Err(ConfigError::ValidationError(
                "backtest.sample_every and backtest.periods_per_year must be at least 1".to_string(),
            ));
        }
        if b.short_window == 0 || b.short_window >= b.long_window {
            return Err(ConfigError::ValidationError(
                "backtest.short_window must be at least 1 and less than backtest.long_window"
                    .to_string(),
            ));
        }
        if b.initial_capital <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "backtest.initial_capital must be positive".to_string(),
            ));
        }
        for (key, preset) in &b.presets {
            if preset.allocation.is_empty()
                || preset.allocation.values().any(|w| *w <= Decimal::ZERO)
            {
                return Err(ConfigError::ValidationError(format!(
                    "backtest.presets.{key} must have only positive weights"
                )));
            }
        }

        Ok(())
    }
}
