use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of spending categories a scenario may adjust.
///
/// Adjustment maps are keyed by this enum rather than free-form strings, so an
/// unknown category name is rejected at parse time instead of being ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Restaurants,
    Groceries,
    Shopping,
    Entertainment,
    Transportation,
    Subscriptions,
    Rent,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Restaurants,
        Category::Groceries,
        Category::Shopping,
        Category::Entertainment,
        Category::Transportation,
        Category::Subscriptions,
        Category::Rent,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Restaurants => "restaurants",
            Category::Groceries => "groceries",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Transportation => "transportation",
            Category::Subscriptions => "subscriptions",
            Category::Rent => "rent",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// Outcome of comparing observed spend against a budget target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    #[serde(rename = "on-track")]
    OnTrack,
    #[serde(rename = "over-budget")]
    OverBudget,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalStatus::OnTrack => f.write_str("on-track"),
            GoalStatus::OverBudget => f.write_str("over-budget"),
        }
    }
}

/// Whether recent spend is moving toward or away from a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalTrend {
    Improving,
    Worsening,
    Stable,
}

impl fmt::Display for GoalTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalTrend::Improving => f.write_str("improving"),
            GoalTrend::Worsening => f.write_str("worsening"),
            GoalTrend::Stable => f.write_str("stable"),
        }
    }
}

/// Direction of money movement for a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Credit,
    Debit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Groceries".parse::<Category>().unwrap(), Category::Groceries);
        assert_eq!(" rent ".parse::<Category>().unwrap(), Category::Rent);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "crypto".parse::<Category>().unwrap_err();
        assert_eq!(err, CoreError::UnknownCategory("crypto".to_string()));
    }

    #[test]
    fn unknown_category_key_fails_deserialization() {
        let parsed: Result<std::collections::BTreeMap<Category, i32>, _> =
            serde_json::from_str(r#"{"groceries": 1, "yachts": 2}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn goal_status_uses_hyphenated_names() {
        assert_eq!(serde_json::to_string(&GoalStatus::OnTrack).unwrap(), "\"on-track\"");
        assert_eq!(serde_json::to_string(&GoalStatus::OverBudget).unwrap(), "\"over-budget\"");
    }
}
