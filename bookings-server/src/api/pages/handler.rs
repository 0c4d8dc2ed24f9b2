//! Static Page Handlers

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::response::Html;
use shared::error::AppResult;
use tower_sessions::Session;

use crate::render::TemplateData;
use crate::session;
use crate::state::AppState;

/// Peer address from the connection, else the first X-Forwarded-For hop
fn remote_ip(req: &Request) -> String {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// GET / - home page, remembers the visitor's address
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    req: Request,
) -> AppResult<Html<String>> {
    session::put(&session, session::REMOTE_IP, remote_ip(&req)).await?;
    state
        .renderer
        .render(&session, "home.page.tmpl", TemplateData::new())
        .await
}

/// GET /about
pub async fn about(State(state): State<AppState>, session: Session) -> AppResult<Html<String>> {
    let remote_ip: String = session::get(&session, session::REMOTE_IP)
        .await
        .unwrap_or_default();
    let td = TemplateData::new()
        .with_string("test", "Hello, again.")
        .with_string("remote_ip", remote_ip);
    state.renderer.render(&session, "about.page.tmpl", td).await
}

/// GET /generals-quarters
pub async fn generals(State(state): State<AppState>, session: Session) -> AppResult<Html<String>> {
    state
        .renderer
        .render(&session, "generals.page.tmpl", TemplateData::new())
        .await
}

/// GET /majors-suite
pub async fn majors(State(state): State<AppState>, session: Session) -> AppResult<Html<String>> {
    state
        .renderer
        .render(&session, "majors.page.tmpl", TemplateData::new())
        .await
}

/// GET /contact
pub async fn contact(State(state): State<AppState>, session: Session) -> AppResult<Html<String>> {
    state
        .renderer
        .render(&session, "contact.page.tmpl", TemplateData::new())
        .await
}
