//! Error page rendering

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use shared::error::AppError;

use crate::render::TemplateData;
use crate::state::AppState;

const ERROR_PAGE: &str = "error.page.tmpl";

/// Replace the plain body of a failed handler with the site's error page
///
/// Only responses built from an [`AppError`] are touched; the status code is
/// kept. If the error page itself cannot be rendered the plain body stays.
pub async fn render_error_page(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;
    let Some(err) = response.extensions().get::<AppError>() else {
        return response;
    };

    let status = response.status();
    let td = TemplateData::new()
        .with_int("status", i64::from(status.as_u16()))
        .with_string("reason", status.canonical_reason().unwrap_or("Error"))
        .with_string("message", err.message.as_str());

    match state.renderer.render_page(ERROR_PAGE, &td) {
        Ok(page) => (status, page).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Error page render failed");
            response
        }
    }
}
