//! User login API module

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/login", get(handler::login_page).post(handler::login))
        .route("/user/logout", get(handler::logout))
}
