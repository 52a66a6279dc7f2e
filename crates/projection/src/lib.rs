//! # Growth Projector
//!
//! Compound-growth simulation and inflation adjustment. Pure functions over
//! caller-supplied parameters; the goal and scenario crates build on
//! [`real_value`].

pub mod error;
pub mod growth;
pub mod inflation;

pub use error::ProjectionError;
pub use growth::{GrowthRow, growth_table, project_growth};
pub use inflation::{real_return_rate, real_value};
