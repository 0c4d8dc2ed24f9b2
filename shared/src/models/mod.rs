//! Data models
//!
//! Shared between the web service, its repositories and templates.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (Postgres BIGSERIAL).

pub mod reservation;
pub mod restriction;
pub mod room;
pub mod user;

// Re-exports
pub use reservation::*;
pub use restriction::*;
pub use room::*;
pub use user::*;
