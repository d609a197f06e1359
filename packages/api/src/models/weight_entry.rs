//! Weight entry model.

use chrono::NaiveDate;
use sqlx::FromRow;

/// One dated weight measurement belonging to exactly one account.
///
/// The schema enforces at most one entry per `(account_id, day)` pair.
#[derive(Debug, Clone, FromRow)]
pub struct WeightEntry {
    pub id: i64,
    pub account_id: i64,
    pub day: NaiveDate,
    pub kg: f64,
}
