//! Reservation API module

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/make-reservation",
            get(handler::reservation_form).post(handler::post_reservation),
        )
        .route("/reservation-summary", get(handler::summary))
}
