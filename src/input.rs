use anyhow::{Context, Result};
use core_types::{Category, TimeSeries};
use rust_decimal::Decimal;
use scenario::{Baseline, ScenarioAdjustment};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Reads and deserializes a JSON file, naming the file in any error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Price or balance files may hold one series or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeriesFile {
    One(TimeSeries),
    Many(Vec<TimeSeries>),
}

/// Loads every series from every file, in argument order.
pub fn read_series(paths: &[impl AsRef<Path>]) -> Result<Vec<TimeSeries>> {
    let mut all = Vec::new();
    for path in paths {
        match read_json::<SeriesFile>(path.as_ref())? {
            SeriesFile::One(series) => all.push(series),
            SeriesFile::Many(series) => all.extend(series),
        }
    }
    Ok(all)
}

/// The `scenario` input: a baseline plus adjustments, with rates and targets
/// falling back to configuration when omitted.
#[derive(Debug, Deserialize)]
pub struct ScenarioInput {
    pub baseline: Baseline,
    #[serde(default)]
    pub category_deltas: BTreeMap<Category, Decimal>,
    #[serde(default)]
    pub income_adjustment: Decimal,
    pub investment_return_rate: Option<Decimal>,
    pub inflation_rate: Option<Decimal>,
    pub emergency_fund_target: Option<Decimal>,
    pub retirement_goal: Option<Decimal>,
}

impl ScenarioInput {
    /// Overlays the explicit fields on `defaults`.
    pub fn adjustment(&self, defaults: ScenarioAdjustment) -> ScenarioAdjustment {
        ScenarioAdjustment {
            category_deltas: self.category_deltas.clone(),
            income_adjustment: self.income_adjustment,
            investment_return_rate: self.investment_return_rate.unwrap_or(defaults.investment_return_rate),
            inflation_rate: self.inflation_rate.unwrap_or(defaults.inflation_rate),
            emergency_fund_target: self.emergency_fund_target.unwrap_or(defaults.emergency_fund_target),
            retirement_goal: self.retirement_goal.unwrap_or(defaults.retirement_goal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::ScenarioSettings;
    use rust_decimal_macros::dec;

    #[test]
    fn series_files_accept_one_or_many() {
        let dir = tempfile::tempdir().unwrap();
        let one = dir.path().join("one.json");
        let many = dir.path().join("many.json");
        fs::write(&one, r#"{"name":"SPY","points":[{"date":"2024-01-02","value":"470.1"}]}"#).unwrap();
        fs::write(
            &many,
            r#"[{"name":"BND","points":[]},{"name":"GLD","points":[{"date":"2024-01-02","value":190}]}]"#,
        )
        .unwrap();

        let series = read_series(&[one, many]).unwrap();
        let names: Vec<_> = series.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["SPY", "BND", "GLD"]);
    }

    #[test]
    fn unordered_series_file_is_rejected_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"name":"x","points":[{"date":"2024-01-02","value":1},{"date":"2024-01-01","value":2}]}"#,
        )
        .unwrap();
        let err = read_series(&[&path]).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn scenario_input_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.json");
        fs::write(
            &path,
            r#"{
                "baseline": {"monthly_income": 5000, "category_spend": {"groceries": 400}},
                "category_deltas": {"groceries": -25},
                "inflation_rate": 2
            }"#,
        )
        .unwrap();

        let input: ScenarioInput = read_json(&path).unwrap();
        let defaults = ScenarioAdjustment::from_settings(&ScenarioSettings::default());
        let adjustment = input.adjustment(defaults);
        assert_eq!(adjustment.category_deltas[&Category::Groceries], dec!(-25));
        assert_eq!(adjustment.inflation_rate, dec!(2));
        assert_eq!(adjustment.investment_return_rate, dec!(7));
        assert_eq!(input.baseline.current_balance, Decimal::ZERO);
    }
}
