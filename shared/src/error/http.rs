//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound => StatusCode::NOT_FOUND,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,

            // 409 Conflict
            Self::NoAvailability => StatusCode::CONFLICT,

            // 503 Service Unavailable (transient, client can retry)
            Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::TemplateError
            | Self::SessionError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::InvalidRequest | Self::InvalidDateRange => StatusCode::BAD_REQUEST,
        }
    }
}
