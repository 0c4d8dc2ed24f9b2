//! Bookings web service
//!
//! Server-rendered booking site: room pages, availability search, the guest
//! reservation flow and an admin area for managing bookings.

pub mod api;
pub mod config;
pub mod db;
pub mod forms;
pub mod logger;
pub mod render;
pub mod services;
pub mod session;
pub mod state;
pub mod util;

pub use config::Config;
pub use state::AppState;

use axum::Router;
use axum::middleware;
use http::StatusCode;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

/// Build the fully configured application with all middleware and state
pub fn build_app(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.is_production());

    api::build_router()
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        // ========== Application Middleware ==========
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::error_page::render_error_page,
        ))
        .layer(session_layer)
        // ========== Tower HTTP Middleware ==========
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout(),
        ))
        // Panics become 500 instead of dropping the connection
        .layer(CatchPanicLayer::new())
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
