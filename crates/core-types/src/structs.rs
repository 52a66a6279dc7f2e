use crate::enums::{GoalStatus, GoalTrend, TransactionKind};
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One point of a time series: a calendar day and the value observed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: Decimal,
}

impl DatedValue {
    pub fn new(date: NaiveDate, value: Decimal) -> Self {
        Self { date, value }
    }
}

#[derive(Deserialize)]
struct RawTimeSeries {
    name: String,
    points: Vec<DatedValue>,
}

impl TryFrom<RawTimeSeries> for TimeSeries {
    type Error = CoreError;

    fn try_from(raw: RawTimeSeries) -> Result<Self, Self::Error> {
        TimeSeries::new(raw.name, raw.points)
    }
}

/// A named, strictly date-ascending sequence of values.
///
/// The only way to obtain a `TimeSeries` is through [`TimeSeries::new`] (or
/// deserialization, which goes through the same check), so every consumer can
/// rely on unique, ordered dates without re-validating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSeries")]
pub struct TimeSeries {
    name: String,
    points: Vec<DatedValue>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, points: Vec<DatedValue>) -> Result<Self, CoreError> {
        let name = name.into();
        for pair in points.windows(2) {
            let (prev, next) = (pair[0].date, pair[1].date);
            if next == prev {
                return Err(CoreError::DuplicateDate { series: name, date: next });
            }
            if next < prev {
                return Err(CoreError::NonMonotonicDates { series: name, date: next });
            }
        }
        Ok(Self { name, points })
    }

    /// Builds a series from `(date, value)` tuples, validating order like [`TimeSeries::new`].
    pub fn from_pairs(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (NaiveDate, Decimal)>,
    ) -> Result<Self, CoreError> {
        let points = pairs
            .into_iter()
            .map(|(date, value)| DatedValue { date, value })
            .collect();
        Self::new(name, points)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[DatedValue] {
        &self.points
    }

    pub fn values(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&DatedValue> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&DatedValue> {
        self.points.last()
    }
}

/// One annual snapshot of a compounding simulation.
///
/// `balance == contributions + interest` holds for every point produced by the projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub period: u32,
    pub balance: Decimal,
    pub contributions: Decimal,
    pub interest: Decimal,
}

/// A monthly spending target, either for one category or for total spend (`category = None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub category: Option<String>,
}

/// The evaluation of a single [`Goal`] against observed spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalResult {
    pub goal: Goal,
    pub current_average: Decimal,
    pub progress_percent: Decimal,
    pub status: GoalStatus,
    pub forecast_text: String,
    pub trend: GoalTrend,
}

/// Observed average monthly spend, overall and per category.
///
/// A category missing from `by_category` means no spend was observed for it.
/// The `recent_*` fields hold the mean of the latest two months with spend and
/// are only present where at least two such months exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingAverages {
    pub total: Decimal,
    pub by_category: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub recent_total: Option<Decimal>,
    #[serde(default)]
    pub recent_by_category: BTreeMap<String, Decimal>,
}

impl SpendingAverages {
    /// The average to compare against a goal scoped to `category` (`None` = total spend).
    pub fn for_category(&self, category: Option<&str>) -> Decimal {
        match category {
            None => self.total,
            Some(name) => self.by_category.get(name).copied().unwrap_or(Decimal::ZERO),
        }
    }

    /// The recent two-month average for the same scope, if there is enough history.
    pub fn recent_for(&self, category: Option<&str>) -> Option<Decimal> {
        match category {
            None => self.recent_total,
            Some(name) => self.recent_by_category.get(name).copied(),
        }
    }
}

/// One row of a date-aligned comparison table.
///
/// A series appears in `values` only on dates it defines; nothing is interpolated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub values: BTreeMap<String, Decimal>,
}

impl AlignedRow {
    pub fn get(&self, series: &str) -> Option<Decimal> {
        self.values.get(series).copied()
    }
}

/// The merged output of several series, with the column order callers passed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedTable {
    pub series: Vec<String>,
    pub rows: Vec<AlignedRow>,
}

/// A single ledger entry as supplied by the financial-data API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub merchant: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub notes: Option<String>,
}
