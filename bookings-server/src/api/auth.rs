//! Login gate for the admin area

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use shared::error::{AppError, ErrorCode};
use tower_sessions::Session;

use crate::session;

/// Let the request through only when the session carries a `user_id`
pub async fn require_auth(session: Session, req: Request, next: Next) -> Result<Response, AppError> {
    if session::is_authenticated(&session).await {
        return Ok(next.run(req).await);
    }

    tracing::info!(uri = %req.uri(), "Unauthenticated admin request");
    session::flash_error(&session, ErrorCode::NotAuthenticated.message()).await?;
    Ok(Redirect::to("/user/login").into_response())
}
