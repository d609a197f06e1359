//! # Account model
//!
//! Two representations of a registered user:
//!
//! ## [`Account`]
//!
//! The complete database row from the `accounts` table. It derives
//! [`sqlx::FromRow`] so it can be loaded directly from queries and contains
//! every column:
//!
//! - `id` — primary key (`BIGSERIAL`).
//! - `username` — unique, case-sensitive login name.
//! - `password_hash` — Argon2id hash in PHC format; plaintext passwords are
//!   never stored or compared.
//! - `height_cm`, `start_weight`, `target_weight`, `goal_start` — the goal
//!   attributes, all optional and mutated via the settings form.
//!
//! Deleting an account cascades to its `weight_entries` rows at the schema
//! level; no delete-account operation exists in the application itself.
//!
//! ## [`GoalSettings`]
//!
//! The goal attributes alone, projected out with [`Account::goal`]. The
//! dashboard aggregator takes this instead of the full row so it stays a
//! pure function with no access to credentials.

use chrono::NaiveDate;
use sqlx::FromRow;

/// Full account record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub height_cm: Option<f64>,
    pub start_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub goal_start: Option<NaiveDate>,
}

impl Account {
    /// Project out the goal attributes for the dashboard aggregator.
    pub fn goal(&self) -> GoalSettings {
        GoalSettings {
            height_cm: self.height_cm,
            start_weight: self.start_weight,
            target_weight: self.target_weight,
            goal_start: self.goal_start,
        }
    }
}

/// An account's goal attributes; every field may be unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalSettings {
    pub height_cm: Option<f64>,
    pub start_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub goal_start: Option<NaiveDate>,
}
