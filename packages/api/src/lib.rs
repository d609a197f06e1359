//! # API crate — domain logic for the weight tracker
//!
//! Everything the HTTP surface in the `web` crate orchestrates lives here:
//! models, persistence, authentication, and the dashboard aggregation that
//! turns a raw weight history into chart- and table-ready data.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Argon2id password hashing and session-backed account resolution |
//! | [`dashboard`] | Pure aggregation: merge real and virtual points, derive PNL/BMI/progress |
//! | [`db`] | [`Store`] — every SQL statement the application runs, over a shared `PgPool` |
//! | [`error`] | [`AppError`] — the error taxonomy handlers translate into user feedback |
//! | [`models`] | Database rows ([`Account`], [`WeightEntry`]) and their projections |
//!
//! The crate is HTTP-agnostic: nothing in here depends on axum, so the whole
//! domain can be exercised from unit tests without a running server. The SQL
//! schema ships in `migrations/` and is embedded by the `web` binary with
//! `sqlx::migrate!`.

pub mod auth;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod models;

pub use db::Store;
pub use error::AppError;
pub use models::{Account, GoalSettings, WeightEntry};
