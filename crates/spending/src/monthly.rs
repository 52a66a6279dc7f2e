use chrono::{Datelike, NaiveDate};
use core_types::{SpendingAverages, Transaction, TransactionKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    pub month: String,
    pub amount: Decimal,
}

pub(crate) fn debits(transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions.iter().filter(|t| t.kind == TransactionKind::Debit)
}

/// Sums of debit amounts per calendar month, optionally restricted to one category.
///
/// Months without any matching debit are absent rather than zero.
pub fn monthly_totals(
    transactions: &[Transaction],
    category: Option<&str>,
) -> BTreeMap<YearMonth, Decimal> {
    let mut totals = BTreeMap::new();
    for t in debits(transactions).filter(|t| category.is_none_or(|c| t.category == c)) {
        *totals.entry(YearMonth::from(t.date)).or_insert(Decimal::ZERO) += t.amount;
    }
    totals
}

pub(crate) fn mean(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    let (sum, count) = values
        .into_iter()
        .fold((Decimal::ZERO, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / Decimal::from(count))
    }
}

/// Mean of the latest two months, when there are at least two.
fn recent_mean(months: &BTreeMap<YearMonth, Decimal>) -> Option<Decimal> {
    if months.len() < 2 {
        return None;
    }
    mean(months.values().rev().take(2).copied())
}

/// Average monthly spend overall and per category, the input to goal evaluation.
///
/// Each figure is the mean over the months in which that scope had any spend, so
/// a category bought only twice is averaged over those two months. The recent
/// figures average the latest two of those months.
pub fn monthly_averages(transactions: &[Transaction]) -> SpendingAverages {
    let overall = monthly_totals(transactions, None);
    let total = mean(overall.values().copied()).unwrap_or(Decimal::ZERO);
    let recent_total = recent_mean(&overall);

    let mut per_category: BTreeMap<&str, BTreeMap<YearMonth, Decimal>> = BTreeMap::new();
    for t in debits(transactions) {
        *per_category
            .entry(t.category.as_str())
            .or_default()
            .entry(YearMonth::from(t.date))
            .or_insert(Decimal::ZERO) += t.amount;
    }

    let mut by_category = BTreeMap::new();
    let mut recent_by_category = BTreeMap::new();
    for (category, months) in &per_category {
        if let Some(avg) = mean(months.values().copied()) {
            by_category.insert(category.to_string(), avg);
        }
        if let Some(recent) = recent_mean(months) {
            recent_by_category.insert(category.to_string(), recent);
        }
    }

    SpendingAverages { total, by_category, recent_total, recent_by_category }
}
