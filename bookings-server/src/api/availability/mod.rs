//! Availability search API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/search-availability",
            get(handler::search_page).post(handler::search),
        )
        .route("/search-availability-json", post(handler::search_json))
        .route("/choose-room/{id}", get(handler::choose_room))
        .route("/book-room", get(handler::book_room))
}
