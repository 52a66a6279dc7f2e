//! # Goals
//!
//! Two evaluators that share one idea, "how far along is the user":
//!
//! - **Milestones** (`milestones`, `progress`): net-worth style goals that grow
//!   toward a target, with percent checkpoints and automatic escalation along a
//!   fixed ladder once a target is passed.
//! - **Budgets** (`budget`): spending caps that the user should stay *under*,
//!   classified as on-track or over-budget with a short forecast sentence and a
//!   trend from the latest two months.
//!
//! Everything here is stateless. `MilestoneEngine` only bundles the configured
//! ladder and checkpoints so callers do not have to thread them through.

pub mod budget;
pub mod error;
pub mod milestones;
pub mod progress;

pub use budget::{evaluate_goal, evaluate_goals, goal_trend};
pub use error::GoalError;
pub use milestones::{
    Milestone, MilestoneProgress, achieved_milestones, milestone_label, milestone_ladder,
    next_milestone_goal,
};
pub use progress::{MilestoneEngine, ProgressAnalysis, analyze_progress};
