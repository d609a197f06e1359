use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{Account, GoalSettings, WeightEntry};

/// All persistence operations, over a cloned connection pool.
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // accounts

    pub async fn find_account(&self, id: i64) -> Result<Option<Account>, AppError> {
        let account: Option<Account> = sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    /// Username lookup is case-sensitive, matching the uniqueness rule.
    pub async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AppError> {
        let account: Option<Account> = sqlx::query_as("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    /// Insert a new account. A duplicate username surfaces as
    /// [`AppError::Conflict`] even when it slips past the caller's
    /// check-then-insert (two registrations racing on the same name).
    pub async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, AppError> {
        let account: Account = sqlx::query_as(
            "INSERT INTO accounts (username, password_hash) VALUES ($1, $2) RETURNING *",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or_db(e, "username is already taken"))?;
        Ok(account)
    }

    /// Overwrite all four goal attributes; `None` clears a column.
    pub async fn update_goal(&self, account_id: i64, goal: &GoalSettings) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE accounts
             SET height_cm = $2, start_weight = $3, target_weight = $4, goal_start = $5
             WHERE id = $1",
        )
        .bind(account_id)
        .bind(goal.height_cm)
        .bind(goal.start_weight)
        .bind(goal.target_weight)
        .bind(goal.goal_start)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // weight entries

    /// The account's full history, ascending by day, the order the
    /// dashboard aggregator expects.
    pub async fn weights_for_account(
        &self,
        account_id: i64,
    ) -> Result<Vec<WeightEntry>, AppError> {
        let entries: Vec<WeightEntry> =
            sqlx::query_as("SELECT * FROM weight_entries WHERE account_id = $1 ORDER BY day ASC")
                .bind(account_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(entries)
    }

    pub async fn find_weight(&self, id: i64) -> Result<Option<WeightEntry>, AppError> {
        let entry: Option<WeightEntry> = sqlx::query_as("SELECT * FROM weight_entries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    /// Record or overwrite a day's weight: explicit find-or-create inside
    /// one transaction, so two requests for the same `(account, day)` pair
    /// serialize on the row lock instead of racing to insert.
    pub async fn upsert_weight(
        &self,
        account_id: i64,
        day: NaiveDate,
        kg: f64,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM weight_entries WHERE account_id = $1 AND day = $2 FOR UPDATE",
        )
        .bind(account_id)
        .bind(day)
        .fetch_optional(&mut *tx)
        .await?;

        match existing {
            Some((id,)) => {
                sqlx::query("UPDATE weight_entries SET kg = $2 WHERE id = $1")
                    .bind(id)
                    .bind(kg)
                    .execute(&mut *tx)
                    .await?;
            }
            None => {
                sqlx::query("INSERT INTO weight_entries (account_id, day, kg) VALUES ($1, $2, $3)")
                    .bind(account_id)
                    .bind(day)
                    .bind(kg)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Overwrite both fields of an existing entry. Moving it onto a day the
    /// account already has an entry for violates the `(account_id, day)`
    /// uniqueness constraint and surfaces as [`AppError::Conflict`].
    pub async fn update_weight(&self, id: i64, day: NaiveDate, kg: f64) -> Result<(), AppError> {
        sqlx::query("UPDATE weight_entries SET day = $2, kg = $3 WHERE id = $1")
            .bind(id)
            .bind(day)
            .bind(kg)
            .execute(&self.pool)
            .await
            .map_err(|e| conflict_or_db(e, "another entry already exists for that day"))?;
        Ok(())
    }

    /// Delete an entry owned by the given account. Scoping the DELETE to the
    /// owner makes a non-owned id a no-op rather than an error.
    pub async fn delete_weight(&self, id: i64, account_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM weight_entries WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Map a unique-constraint violation to [`AppError::Conflict`]; anything
/// else stays a database error.
fn conflict_or_db(err: sqlx::Error, message: &str) -> AppError {
    let unique_violation = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());
    if unique_violation {
        AppError::Conflict(message.to_string())
    } else {
        AppError::Database(err)
    }
}
