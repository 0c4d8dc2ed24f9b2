//! Static pages API module

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::home))
        .route("/about", get(handler::about))
        .route("/generals-quarters", get(handler::generals))
        .route("/majors-suite", get(handler::majors))
        .route("/contact", get(handler::contact))
}
