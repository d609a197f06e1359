//! One-shot flash messages, carried in the session between a redirect and
//! the next rendered page.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::WebError;

const FLASH_KEY: &str = "flash";

/// Category names double as CSS classes, matching the usual Bootstrap set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub category: String,
    pub message: String,
}

/// Queue a message for the next page render.
pub async fn push(session: &Session, category: &str, message: &str) -> Result<(), WebError> {
    let mut pending: Vec<Flash> = session.get(FLASH_KEY).await?.unwrap_or_default();
    pending.push(Flash {
        category: category.to_string(),
        message: message.to_string(),
    });
    session.insert(FLASH_KEY, pending).await?;
    Ok(())
}

/// Drain all pending messages; each is shown exactly once.
pub async fn take(session: &Session) -> Result<Vec<Flash>, WebError> {
    let pending: Option<Vec<Flash>> = session.remove(FLASH_KEY).await?;
    Ok(pending.unwrap_or_default())
}
