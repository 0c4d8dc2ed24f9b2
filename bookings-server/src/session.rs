//! Session keys and read-once helpers

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::AppError;
use tower_sessions::Session;

pub const REMOTE_IP: &str = "remote_ip";
/// Confirmed reservation, read once by the summary page
pub const RESERVATION: &str = "reservation";
/// Stay picked by search / choose-room / book-room, not yet submitted
pub const PENDING_RESERVATION: &str = "pending_reservation";
pub const USER_ID: &str = "user_id";
pub const FLASH: &str = "flash";
pub const ERROR: &str = "error";
pub const WARNING: &str = "warning";

/// Store a value, mapping store failures to [`AppError`]
pub async fn put<T: Serialize>(session: &Session, key: &str, value: T) -> Result<(), AppError> {
    session
        .insert(key, value)
        .await
        .map_err(|e| AppError::session(format!("failed to write session key {key}: {e}")))
}

/// Read without clearing; a value of the wrong shape counts as absent
pub async fn get<T: DeserializeOwned>(session: &Session, key: &str) -> Option<T> {
    match session.get::<T>(key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Unreadable session value");
            None
        }
    }
}

/// Read and clear; a second pop without a new write yields `None`
pub async fn pop<T: DeserializeOwned>(session: &Session, key: &str) -> Option<T> {
    match session.remove::<T>(key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Unreadable session value discarded");
            None
        }
    }
}

/// Pop a message key, empty string when unset
pub async fn pop_string(session: &Session, key: &str) -> String {
    pop::<String>(session, key).await.unwrap_or_default()
}

pub async fn flash(session: &Session, message: &str) -> Result<(), AppError> {
    put(session, FLASH, message).await
}

pub async fn flash_error(session: &Session, message: &str) -> Result<(), AppError> {
    put(session, ERROR, message).await
}

pub async fn is_authenticated(session: &Session) -> bool {
    get::<i64>(session, USER_ID).await.is_some()
}
