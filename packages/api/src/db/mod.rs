//! # Database module — the persistence store
//!
//! [`Store`] wraps the shared [`sqlx::PgPool`] and owns every SQL statement
//! the application runs. It is constructed once in the `web` binary's `main`
//! and handed to request handlers through axum state; nothing in the
//! codebase reaches for a global connection.
//!
//! Each method is a single transaction: plain statements implicitly, the
//! weight upsert explicitly (it reads then writes and must not race with a
//! concurrent upsert for the same day).

mod store;

pub use store::Store;
