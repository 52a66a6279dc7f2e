use crate::anomalies::{Anomaly, detect_anomalies};
use crate::error::SpendingError;
use crate::monthly::{MonthlyAmount, YearMonth, debits, mean, monthly_totals};
use configuration::SpendingSettings;
use core_types::{Transaction, TransactionKind};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How many of the biggest categories get a month-by-month history.
const TOP_CATEGORY_TRENDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInsight {
    pub category: String,
    pub total: Decimal,
    /// Share of all spend, 0-100.
    pub percentage: Decimal,
    pub trend: TrendDirection,
    /// Last month against the one before; zero when there is nothing to compare.
    pub change_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMonthlyTrend {
    pub category: String,
    pub monthly_data: Vec<MonthlyAmount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_savings: Decimal,
    pub avg_monthly_spending: Decimal,
    /// Sorted by total, largest first.
    pub spending_by_category: Vec<CategoryInsight>,
    pub trends: Vec<CategoryMonthlyTrend>,
    pub anomalies: Vec<Anomaly>,
}

/// Classifies the move from the second-to-last to the last month.
///
/// Moves beyond `threshold_pct` in either direction count as a trend. Fewer than
/// two months, or a previous month of zero, is reported as stable with no change.
pub fn category_trend(
    monthly: &BTreeMap<YearMonth, Decimal>,
    threshold_pct: Decimal,
) -> (TrendDirection, Decimal) {
    let mut recent = monthly.values().rev();
    let (Some(last), Some(previous)) = (recent.next(), recent.next()) else {
        return (TrendDirection::Stable, Decimal::ZERO);
    };
    if previous.is_zero() {
        return (TrendDirection::Stable, Decimal::ZERO);
    }

    let change = (*last - *previous) / *previous * dec!(100);
    let direction = if change > threshold_pct {
        TrendDirection::Increasing
    } else if change < -threshold_pct {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };
    (direction, change)
}

/// Builds the full spending overview for a ledger.
pub fn summarize(
    transactions: &[Transaction],
    settings: &SpendingSettings,
) -> Result<SpendingSummary, SpendingError> {
    if settings.trend_threshold_pct < Decimal::ZERO {
        return Err(SpendingError::InvalidThreshold(settings.trend_threshold_pct.to_string()));
    }

    let total_income: Decimal = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Credit)
        .map(|t| t.amount)
        .sum();
    let total_expenses: Decimal = debits(transactions).map(|t| t.amount).sum();

    let avg_monthly_spending =
        mean(monthly_totals(transactions, None).into_values()).unwrap_or(Decimal::ZERO);

    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in debits(transactions) {
        *by_category.entry(t.category.as_str()).or_insert(Decimal::ZERO) += t.amount;
    }
    let mut ranked: Vec<(&str, Decimal)> = by_category.into_iter().collect();
    // Stable sort keeps ties in alphabetical order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let spending_by_category = ranked
        .iter()
        .map(|(category, total)| {
            let monthly = monthly_totals(transactions, Some(*category));
            let (trend, change_percent) = category_trend(&monthly, settings.trend_threshold_pct);
            CategoryInsight {
                category: category.to_string(),
                total: *total,
                percentage: if total_expenses.is_zero() {
                    Decimal::ZERO
                } else {
                    *total / total_expenses * dec!(100)
                },
                trend,
                change_percent,
            }
        })
        .collect();

    let trends = ranked
        .iter()
        .take(TOP_CATEGORY_TRENDS)
        .map(|(category, _)| CategoryMonthlyTrend {
            category: category.to_string(),
            monthly_data: monthly_totals(transactions, Some(*category))
                .into_iter()
                .map(|(month, amount)| MonthlyAmount { month: month.to_string(), amount })
                .collect(),
        })
        .collect();

    let anomalies = detect_anomalies(transactions, settings.anomaly_std_devs)?;

    tracing::debug!(
        transactions = transactions.len(),
        categories = ranked.len(),
        anomalies = anomalies.len(),
        "Spending summarised"
    );

    Ok(SpendingSummary {
        total_income,
        total_expenses,
        net_savings: total_income - total_expenses,
        avg_monthly_spending,
        spending_by_category,
        trends,
        anomalies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monthly::fixtures::*;

    fn months(values: &[Decimal]) -> BTreeMap<YearMonth, Decimal> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (YearMonth { year: 2024, month: i as u32 + 1 }, *v))
            .collect()
    }

    #[test]
    fn trend_compares_last_two_months() {
        let (dir, change) = category_trend(&months(&[dec!(500), dec!(100), dec!(120)]), dec!(10));
        assert_eq!(dir, TrendDirection::Increasing);
        assert_eq!(change, dec!(20));

        let (dir, _) = category_trend(&months(&[dec!(100), dec!(85)]), dec!(10));
        assert_eq!(dir, TrendDirection::Decreasing);
    }

    #[test]
    fn trend_threshold_is_exclusive() {
        let (dir, change) = category_trend(&months(&[dec!(100), dec!(110)]), dec!(10));
        assert_eq!(dir, TrendDirection::Stable);
        assert_eq!(change, dec!(10));
    }

    #[test]
    fn trend_without_history_is_stable() {
        assert_eq!(
            category_trend(&months(&[dec!(100)]), dec!(10)),
            (TrendDirection::Stable, Decimal::ZERO)
        );
        assert_eq!(
            category_trend(&months(&[dec!(0), dec!(100)]), dec!(10)),
            (TrendDirection::Stable, Decimal::ZERO)
        );
    }

    #[test]
    fn summary_totals_and_ranking() {
        let txns = vec![
            txn("2024-01-01", "Employer", "Income", dec!(3000), TransactionKind::Credit),
            debit("2024-01-05", "Rent", dec!(1200)),
            debit("2024-01-10", "Groceries", dec!(300)),
            debit("2024-02-05", "Rent", dec!(1200)),
            debit("2024-02-10", "Groceries", dec!(500)),
        ];
        let summary = summarize(&txns, &SpendingSettings::default()).unwrap();

        assert_eq!(summary.total_income, dec!(3000));
        assert_eq!(summary.total_expenses, dec!(3200));
        assert_eq!(summary.net_savings, dec!(-200));
        assert_eq!(summary.avg_monthly_spending, dec!(1600));

        let names: Vec<_> = summary.spending_by_category.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Groceries"]);
        assert_eq!(summary.spending_by_category[0].percentage, dec!(75));
        assert_eq!(summary.spending_by_category[0].trend, TrendDirection::Stable);

        let groceries = &summary.spending_by_category[1];
        assert_eq!(groceries.trend, TrendDirection::Increasing);
        assert_eq!(groceries.change_percent.round_dp(2), dec!(66.67));

        assert_eq!(summary.trends[0].monthly_data[0].month, "2024-01");
    }

    #[test]
    fn empty_ledger_summarises_to_zero() {
        let summary = summarize(&[], &SpendingSettings::default()).unwrap();
        assert_eq!(summary.total_expenses, Decimal::ZERO);
        assert_eq!(summary.avg_monthly_spending, Decimal::ZERO);
        assert!(summary.spending_by_category.is_empty());
        assert!(summary.anomalies.is_empty());
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let settings = SpendingSettings { trend_threshold_pct: dec!(-1), ..Default::default() };
        assert!(matches!(summarize(&[], &settings), Err(SpendingError::InvalidThreshold(_))));
    }
}
