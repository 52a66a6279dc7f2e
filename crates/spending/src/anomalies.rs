use crate::error::SpendingError;
use crate::monthly::debits;
use chrono::NaiveDate;
use core_types::Transaction;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A debit that stands out, either statistically or because its notes say so.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    pub date: NaiveDate,
    pub merchant: String,
    pub category: String,
    pub amount: Decimal,
    /// Set for statistical outliers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_for_category: Option<Decimal>,
    /// Distance from the category mean in standard deviations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation: Option<Decimal>,
    /// Set for entries flagged by their notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn sample_std_dev(values: &[Decimal], mean: Decimal) -> Result<Option<Decimal>, SpendingError> {
    if values.len() < 2 {
        return Ok(None);
    }
    let variance = values.iter().map(|v| (*v - mean) * (*v - mean)).sum::<Decimal>()
        / Decimal::from(values.len() - 1);
    if variance.is_zero() {
        return Ok(None);
    }
    variance
        .sqrt()
        .map(Some)
        .ok_or_else(|| SpendingError::Calculation("square root of variance".to_string()))
}

/// Flags debits above `mean + std_devs * sigma` within their category, plus any
/// debit whose notes mention "anomaly".
///
/// Sigma is the sample standard deviation; categories with a single debit or no
/// variation are skipped. A transaction is reported once even when both rules
/// match. Results are sorted by amount, largest first.
pub fn detect_anomalies(
    transactions: &[Transaction],
    std_devs: Decimal,
) -> Result<Vec<Anomaly>, SpendingError> {
    if std_devs < Decimal::ZERO {
        return Err(SpendingError::InvalidThreshold(std_devs.to_string()));
    }

    let mut by_category: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for t in debits(transactions) {
        by_category.entry(t.category.as_str()).or_default().push(t);
    }

    let mut anomalies = Vec::new();
    for (category, txns) in &by_category {
        let amounts: Vec<Decimal> = txns.iter().map(|t| t.amount).collect();
        let mean = amounts.iter().sum::<Decimal>() / Decimal::from(amounts.len());
        let Some(sigma) = sample_std_dev(&amounts, mean)? else {
            continue;
        };
        let limit = mean + std_devs * sigma;

        for t in txns.iter().filter(|t| t.amount > limit) {
            anomalies.push(Anomaly {
                date: t.date,
                merchant: t.merchant.clone(),
                category: category.to_string(),
                amount: t.amount,
                avg_for_category: Some(mean),
                deviation: Some((t.amount - mean) / sigma),
                note: None,
            });
        }
    }

    let mut seen: HashSet<(String, NaiveDate)> =
        anomalies.iter().map(|a| (a.merchant.clone(), a.date)).collect();
    for t in debits(transactions) {
        let Some(notes) = t.notes.as_deref() else {
            continue;
        };
        if !notes.to_lowercase().contains("anomaly") {
            continue;
        }
        if seen.insert((t.merchant.clone(), t.date)) {
            anomalies.push(Anomaly {
                date: t.date,
                merchant: t.merchant.clone(),
                category: t.category.clone(),
                amount: t.amount,
                avg_for_category: None,
                deviation: None,
                note: Some(notes.to_string()),
            });
        }
    }

    anomalies.sort_by(|a, b| b.amount.cmp(&a.amount));
    Ok(anomalies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monthly::fixtures::*;
    use core_types::TransactionKind;
    use rust_decimal_macros::dec;

    fn noted(mut t: Transaction, note: &str) -> Transaction {
        t.notes = Some(note.to_string());
        t
    }

    fn dining() -> Vec<Transaction> {
        let mut txns: Vec<Transaction> = (1..=9)
            .map(|d| debit(&format!("2024-01-0{d}"), "Restaurants", dec!(40)))
            .collect();
        txns.push(txn("2024-01-20", "Steakhouse", "Restaurants", dec!(400), TransactionKind::Debit));
        txns
    }

    #[test]
    fn outlier_above_two_sigma_is_flagged() {
        let anomalies = detect_anomalies(&dining(), dec!(2)).unwrap();
        assert_eq!(anomalies.len(), 1);
        let a = &anomalies[0];
        assert_eq!(a.merchant, "Steakhouse");
        assert_eq!(a.avg_for_category, Some(dec!(76)));
        assert!(a.deviation.unwrap() > dec!(2));
        assert_eq!(a.note, None);
    }

    #[test]
    fn uniform_or_single_categories_are_skipped() {
        let txns = vec![
            debit("2024-01-01", "Rent", dec!(1200)),
            debit("2024-02-01", "Rent", dec!(1200)),
            debit("2024-01-05", "Shopping", dec!(900)),
        ];
        assert!(detect_anomalies(&txns, dec!(2)).unwrap().is_empty());
    }

    #[test]
    fn notes_flag_is_case_insensitive_and_deduplicated() {
        let mut txns = dining();
        let last = txns.len() - 1;
        txns[last] = noted(txns[last].clone(), "ANOMALY: card present?");
        txns.push(noted(debit("2024-01-03", "Groceries", dec!(20)), "possible anomaly"));
        txns.push(noted(
            txn("2024-01-04", "Refund", "Other", dec!(999), TransactionKind::Credit),
            "anomaly",
        ));

        let anomalies = detect_anomalies(&txns, dec!(2)).unwrap();
        assert_eq!(anomalies.len(), 2);
        assert_eq!(anomalies[0].merchant, "Steakhouse");
        assert!(anomalies[0].deviation.is_some());
        assert_eq!(anomalies[1].amount, dec!(20));
        assert_eq!(anomalies[1].note.as_deref(), Some("possible anomaly"));
    }

    #[test]
    fn results_are_sorted_by_amount() {
        let txns = vec![
            noted(debit("2024-01-01", "Other", dec!(5)), "anomaly"),
            noted(txn("2024-01-02", "Shop", "Other", dec!(50), TransactionKind::Debit), "Anomaly"),
        ];
        let amounts: Vec<_> = detect_anomalies(&txns, dec!(2))
            .unwrap()
            .into_iter()
            .map(|a| a.amount)
            .collect();
        assert_eq!(amounts, vec![dec!(50), dec!(5)]);
    }
}
