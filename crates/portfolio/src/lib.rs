//! # Portfolio
//!
//! Values a list of purchase lots against current quotes: cost basis, gain or
//! loss per lot, totals, allocation by asset class, and net worth once cash
//! savings are added. Quotes are supplied by the caller; nothing here fetches them.

pub mod error;
pub mod holding;
pub mod valuation;

pub use error::PortfolioError;
pub use holding::{AssetClass, Holding, HoldingValuation};
pub use valuation::{AllocationSlice, NetWorth, PortfolioSummary, net_worth, summarize_portfolio};
