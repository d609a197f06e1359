//! Authentication: password hashing, credential verification, and
//! session-backed account resolution.

mod password;
mod session;

pub use password::{hash_password, verify_password};
pub use session::{current_account, log_in, log_out, SESSION_ACCOUNT_ID_KEY};

use crate::db::Store;
use crate::error::AppError;
use crate::models::Account;

/// Check a username/password pair against the store.
///
/// An unknown username and a wrong password both come back as
/// [`AppError::AuthFailure`]; the caller cannot tell which it was.
pub async fn authenticate(
    store: &Store,
    username: &str,
    password: &str,
) -> Result<Account, AppError> {
    let Some(account) = store.find_account_by_username(username).await? else {
        return Err(AppError::AuthFailure);
    };

    if verify_password(password, &account.password_hash)? {
        Ok(account)
    } else {
        Err(AppError::AuthFailure)
    }
}
