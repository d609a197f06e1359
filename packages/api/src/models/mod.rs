//! Database models and their projections.

mod account;
mod weight_entry;

pub use account::{Account, GoalSettings};
pub use weight_entry::WeightEntry;
