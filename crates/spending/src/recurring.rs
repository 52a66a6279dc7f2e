use crate::monthly::{debits, mean};
use chrono::NaiveDate;
use core_types::Transaction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

const MIN_CHARGES: usize = 3;
const MAX_DISTINCT_AMOUNTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeFrequency {
    /// Four or more charges.
    Monthly,
    Recurring,
}

impl fmt::Display for ChargeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChargeFrequency::Monthly => f.write_str("monthly"),
            ChargeFrequency::Recurring => f.write_str("recurring"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Five or more charges, all for the same amount.
    High,
    Medium,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Confidence::High => f.write_str("high"),
            Confidence::Medium => f.write_str("medium"),
        }
    }
}

/// A merchant that bills repeatedly for (nearly) the same amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringCharge {
    pub merchant: String,
    /// Mean charge.
    pub amount: Decimal,
    pub charges: usize,
    pub frequency: ChargeFrequency,
    pub last_charge: NaiveDate,
    pub total_spent: Decimal,
    pub confidence: Confidence,
}

/// Finds merchants debited at least three times with at most two distinct amounts.
///
/// Results are sorted by total spent, largest first.
pub fn detect_recurring_charges(transactions: &[Transaction]) -> Vec<RecurringCharge> {
    let mut by_merchant: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for t in debits(transactions) {
        by_merchant.entry(t.merchant.as_str()).or_default().push(t);
    }

    let mut charges: Vec<RecurringCharge> = by_merchant
        .into_iter()
        .filter(|(_, txns)| txns.len() >= MIN_CHARGES)
        .filter_map(|(merchant, txns)| {
            let distinct: BTreeSet<Decimal> = txns.iter().map(|t| t.amount.normalize()).collect();
            if distinct.len() > MAX_DISTINCT_AMOUNTS {
                return None;
            }
            let amount = mean(txns.iter().map(|t| t.amount))?;
            let last_charge = txns.iter().map(|t| t.date).max()?;
            let count = txns.len();
            Some(RecurringCharge {
                merchant: merchant.to_string(),
                amount,
                charges: count,
                frequency: if count >= 4 { ChargeFrequency::Monthly } else { ChargeFrequency::Recurring },
                last_charge,
                total_spent: txns.iter().map(|t| t.amount).sum(),
                confidence: if count >= 5 && distinct.len() == 1 {
                    Confidence::High
                } else {
                    Confidence::Medium
                },
            })
        })
        .collect();

    charges.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
    tracing::debug!(found = charges.len(), "Recurring charges detected");
    charges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monthly::fixtures::txn;
    use core_types::TransactionKind::{Credit, Debit};
    use rust_decimal_macros::dec;

    fn charge(date: &str, merchant: &str, amount: Decimal) -> Transaction {
        txn(date, merchant, "Subscriptions", amount, Debit)
    }

    #[test]
    fn steady_merchant_is_high_confidence_monthly() {
        let txns: Vec<_> = (1..=5)
            .map(|m| charge(&format!("2024-0{m}-05"), "StreamCo", dec!(15.99)))
            .collect();
        let found = detect_recurring_charges(&txns);
        assert_eq!(found.len(), 1);
        let c = &found[0];
        assert_eq!(c.amount, dec!(15.99));
        assert_eq!(c.total_spent, dec!(79.95));
        assert_eq!(c.frequency, ChargeFrequency::Monthly);
        assert_eq!(c.confidence, Confidence::High);
        assert_eq!(c.last_charge, "2024-05-05".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn price_change_is_still_recurring_at_medium_confidence() {
        let txns = vec![
            charge("2024-01-01", "Gym", dec!(40)),
            charge("2024-02-01", "Gym", dec!(40.00)),
            charge("2024-03-01", "Gym", dec!(45)),
        ];
        let found = detect_recurring_charges(&txns);
        assert_eq!(found[0].frequency, ChargeFrequency::Recurring);
        assert_eq!(found[0].confidence, Confidence::Medium);
        assert_eq!(found[0].charges, 3);
    }

    #[test]
    fn varied_amounts_and_rare_merchants_are_ignored() {
        let txns = vec![
            charge("2024-01-03", "Grocer", dec!(82)),
            charge("2024-01-10", "Grocer", dec!(64)),
            charge("2024-01-17", "Grocer", dec!(91)),
            charge("2024-01-04", "Cloud", dec!(2.99)),
            charge("2024-02-04", "Cloud", dec!(2.99)),
            txn("2024-01-01", "Employer", "Income", dec!(4000), Credit),
            txn("2024-02-01", "Employer", "Income", dec!(4000), Credit),
            txn("2024-03-01", "Employer", "Income", dec!(4000), Credit),
        ];
        assert!(detect_recurring_charges(&txns).is_empty());
    }

    #[test]
    fn sorted_by_total_spent() {
        let mut txns = Vec::new();
        for m in 1..=3 {
            txns.push(charge(&format!("2024-0{m}-01"), "Music", dec!(10)));
            txns.push(charge(&format!("2024-0{m}-02"), "Insurance", dec!(120)));
        }
        let names: Vec<_> = detect_recurring_charges(&txns).into_iter().map(|c| c.merchant).collect();
        assert_eq!(names, vec!["Insurance", "Music"]);
    }
}
