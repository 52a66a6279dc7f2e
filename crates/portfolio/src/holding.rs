use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad class of an investment, used for the allocation breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Stock,
    Etf,
    Bond,
    #[default]
    Other,
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetClass::Stock => f.write_str("stocks"),
            AssetClass::Etf => f.write_str("etfs"),
            AssetClass::Bond => f.write_str("bonds"),
            AssetClass::Other => f.write_str("other"),
        }
    }
}

/// One purchase lot as recorded by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub shares: Decimal,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub asset_class: AssetClass,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A lot marked to a current price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingValuation {
    pub symbol: String,
    pub asset_class: AssetClass,
    pub shares: Decimal,
    pub purchase_price: Decimal,
    pub current_price: Decimal,
    /// False when no quote was supplied and the purchase price stood in.
    pub priced: bool,
    pub cost_basis: Decimal,
    pub current_value: Decimal,
    pub gain_loss: Decimal,
    /// `None` for a zero cost basis.
    pub gain_loss_percent: Option<Decimal>,
    pub purchase_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
