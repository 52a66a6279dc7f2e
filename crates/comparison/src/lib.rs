//! # Series Comparison
//!
//! Merges independently-dated series into one table keyed by date, so several
//! backtested portfolios or strategies can be charted side by side. This is the
//! "master clock" of a comparison: the union of every series' dates, in order.

pub mod aligner;
pub mod error;

pub use aligner::align_by_date;
pub use error::ComparisonError;
