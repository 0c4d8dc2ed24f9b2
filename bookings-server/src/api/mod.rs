//! HTTP routes for the bookings site

pub mod admin;
pub mod auth;
pub mod availability;
pub mod error_page;
pub mod pages;
pub mod reservation;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// All page and form routes (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Public pages
        .merge(pages::router())
        // Search, room choice
        .merge(availability::router())
        // Guest reservation form and summary
        .merge(reservation::router())
        // Login / logout
        .merge(user::router())
        // Admin area - login required
        .merge(admin::router())
}
