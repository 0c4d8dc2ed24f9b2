//! Error type and its HTTP response

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Handlers return this when a request cannot be completed. Form validation
/// problems never become an `AppError`; they are re-rendered inline.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (resource ids, context)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a database timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TimeoutError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create a template error
    pub fn template(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TemplateError, msg)
    }

    /// Create a session store error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::SessionError, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    /// Status from the error code and the public message as a plain body
    ///
    /// The error itself rides along in the response extensions so the web
    /// service can swap the body for a rendered error page.
    fn into_response(mut self) -> axum::response::Response {
        let status = self.http_status();

        // System errors carry internals: log them, show the generic message
        if self.code.category() == ErrorCategory::System {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                details = ?self.details,
                "System error occurred"
            );
            self.message = self.code.message().to_string();
            self.details = None;
        }

        let mut response = (status, self.message.clone()).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_not_found_carries_resource() {
        let err = AppError::not_found("Reservation 7");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Reservation 7 not found");
        let details = err.details.unwrap();
        assert_eq!(details["resource"], "Reservation 7");
    }

    #[test]
    fn test_into_response_status() {
        let resp = AppError::timeout("deadline exceeded").into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let resp = AppError::not_found("Room 9").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let carried = resp.extensions().get::<AppError>().unwrap();
        assert_eq!(carried.message, "Room 9 not found");
    }

    #[test]
    fn test_system_error_hides_internals() {
        let resp = AppError::database("relation \"rooms\" does not exist").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let carried = resp.extensions().get::<AppError>().unwrap();
        assert_eq!(carried.message, "Database error");
        assert!(carried.details.is_none());
    }
}
