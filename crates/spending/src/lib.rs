//! # Spending Analytics
//!
//! Turns a ledger of credit/debit [`core_types::Transaction`]s into the figures the
//! dashboard and goal evaluation consume: income and expense totals, monthly
//! averages, per-category trends, unusual charges and recurring merchants.
//!
//! Everything here is a pure function over the slice it is given. Debits are
//! spend, credits are income; amounts are expected to be positive either way.

pub mod anomalies;
pub mod error;
pub mod monthly;
pub mod recurring;
pub mod summary;

pub use anomalies::{Anomaly, detect_anomalies};
pub use error::SpendingError;
pub use monthly::{MonthlyAmount, YearMonth, monthly_averages, monthly_totals};
pub use recurring::{ChargeFrequency, Confidence, RecurringCharge, detect_recurring_charges};
pub use summary::{
    CategoryInsight, CategoryMonthlyTrend, SpendingSummary, TrendDirection, category_trend,
    summarize,
};
