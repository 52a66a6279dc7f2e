//! # Scenario Projector
//!
//! The "time machine": given a baseline month (income plus per-category spend)
//! and a set of percentage adjustments, compare where savings go under the
//! current habits versus the adjusted ones.

pub mod error;
pub mod model;
pub mod projector;

pub use error::ScenarioError;
pub use model::{
    Baseline, CategoryComparison, InvestmentYear, MonthProjection, ScenarioAdjustment,
    ScenarioProjection,
};
pub use projector::{ScenarioProjector, emergency_fund_months, months_to_goal, project_scenario};
