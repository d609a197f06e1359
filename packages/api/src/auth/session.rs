//! Session-backed account resolution.
//!
//! The session carries exactly one piece of state: the id of the signed-in
//! account, stored under [`SESSION_ACCOUNT_ID_KEY`]. Everything else is
//! loaded fresh from the store on each request.

use tower_sessions::Session;

use crate::db::Store;
use crate::error::AppError;
use crate::models::Account;

/// Key for storing the account id in the session.
pub const SESSION_ACCOUNT_ID_KEY: &str = "account_id";

/// Resolve the currently signed-in account, if any.
///
/// Returns `None` both for anonymous sessions and for sessions whose stored
/// id no longer matches a row, so a stale cookie degrades to "logged out"
/// rather than an error.
pub async fn current_account(session: &Session, store: &Store) -> Result<Option<Account>, AppError> {
    let account_id: Option<i64> = session.get(SESSION_ACCOUNT_ID_KEY).await?;

    let Some(account_id) = account_id else {
        return Ok(None);
    };

    store.find_account(account_id).await
}

/// Establish a session for the given account.
pub async fn log_in(session: &Session, account_id: i64) -> Result<(), AppError> {
    session.insert(SESSION_ACCOUNT_ID_KEY, account_id).await?;
    Ok(())
}

/// Destroy the current session entirely.
pub async fn log_out(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}
