//! Shared types for the bookings site
//!
//! Domain models (rooms, reservations, restrictions, users) and the unified
//! error type used by the web service and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
