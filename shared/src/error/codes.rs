//! Unified error codes for the bookings site
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Booking errors (availability, date ranges)
//! - 9xxx: System errors

use std::fmt;

/// Unified error code enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Room, reservation or user lookup missed
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,

    // ==================== 2xxx: Booking ====================
    /// No room is free for the requested dates
    NoAvailability = 2004,
    /// End date is not after start date
    InvalidDateRange = 2005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Database call exceeded its deadline
    TimeoutError = 9003,
    /// Template lookup or rendering failed
    TemplateError = 9004,
    /// Session store failure
    SessionError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the user-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "Log in first!",
            ErrorCode::InvalidCredentials => "Invalid login credentials",

            // Booking
            ErrorCode::NoAvailability => "No availability",
            ErrorCode::InvalidDateRange => "End date must be after start date",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Database did not answer in time, please retry",
            ErrorCode::TemplateError => "Page could not be rendered",
            ErrorCode::SessionError => "Session store error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
