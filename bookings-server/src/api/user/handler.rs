//! Login / Logout Handlers

use std::collections::HashMap;

use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use shared::error::{AppError, AppResult, ErrorCode};
use tower_sessions::Session;

use crate::db::repository::RepoError;
use crate::forms;
use crate::render::TemplateData;
use crate::session;
use crate::state::AppState;

const LOGIN_PAGE: &str = "login.page.tmpl";

/// GET /user/login
pub async fn login_page(State(state): State<AppState>, session: Session) -> AppResult<Html<String>> {
    state
        .renderer
        .render(&session, LOGIN_PAGE, TemplateData::new())
        .await
}

/// POST /user/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(values): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    // New session id on every login attempt
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::session(format!("failed to renew session id: {e}")))?;

    let mut form = forms::Form::new(values);
    form.required(&["email", "password"]);
    form.is_email("email");
    if !form.valid() {
        let td = TemplateData::new().with_form(form);
        let page = state.renderer.render(&session, LOGIN_PAGE, td).await?;
        return Ok(page.into_response());
    }

    let email = form.get("email");
    match state.repo.authenticate(email, form.get("password")).await {
        Ok((user_id, _)) => {
            tracing::info!(user_id, "User logged in");
            session::put(&session, session::USER_ID, user_id).await?;
            session::flash(&session, "Logged in successfully").await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(RepoError::InvalidCredentials | RepoError::NotFound(_)) => {
            tracing::warn!(email, "Login rejected");
            session::flash_error(&session, ErrorCode::InvalidCredentials.message()).await?;
            Ok(Redirect::to("/user/login").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /user/logout - drops the whole session
pub async fn logout(session: Session) -> AppResult<Redirect> {
    session
        .flush()
        .await
        .map_err(|e| AppError::session(format!("failed to destroy session: {e}")))?;
    Ok(Redirect::to("/user/login"))
}
