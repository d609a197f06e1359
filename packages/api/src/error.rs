//! Error taxonomy shared by the store, auth helpers, and request handlers.
//!
//! The first four variants are expected outcomes of normal use and are
//! surfaced to the user as flash messages or status pages; `Database` and
//! `Session` are the only genuinely unexpected class and end up as 500s.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed date or number in a form submission.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A uniqueness rule was violated (duplicate username, occupied day).
    #[error("{0}")]
    Conflict(String),

    /// The acting account does not own the targeted entry.
    #[error("access denied")]
    AccessDenied,

    /// Unknown username or wrong password; the two are indistinguishable.
    #[error("invalid username or password")]
    AuthFailure,

    #[error("not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}
