pub mod enums;
pub mod error;
pub mod format;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Category, GoalStatus, GoalTrend, TransactionKind};
pub use error::CoreError;
pub use format::fixed;
pub use structs::{
    AlignedRow, AlignedTable, DatedValue, Goal, GoalResult, GrowthPoint, SpendingAverages, TimeSeries,
    Transaction,
};
