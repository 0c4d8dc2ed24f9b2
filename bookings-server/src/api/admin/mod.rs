//! Admin API module
//!
//! Every route sits behind [`require_auth`].

mod calendar;
mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::api::auth::require_auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/admin", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handler::dashboard))
        .route("/reservations-new", get(handler::new_reservations))
        .route("/reservations-all", get(handler::all_reservations))
        .route("/reservations/{src}/{id}/show", get(handler::show_reservation))
        .route("/reservations/{src}/{id}", post(handler::update_reservation))
        .route("/process-reservation/{src}/{id}", get(handler::process_reservation))
        .route("/delete-reservation/{src}/{id}", get(handler::delete_reservation))
        .route(
            "/reservations-calendar",
            get(handler::calendar).post(handler::update_calendar),
        )
        .layer(middleware::from_fn(require_auth))
}
