//! Reservation Handlers

use std::collections::HashMap;

use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use shared::error::AppResult;
use shared::models::Reservation;
use tower_sessions::Session;

use crate::render::TemplateData;
use crate::services::{ReservationWorkflow, Submission};
use crate::session;
use crate::state::AppState;

const FORM_PAGE: &str = "make-reservation.page.tmpl";

/// GET /make-reservation - empty form, prefilled with the pending stay
pub async fn reservation_form(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Html<String>> {
    let pending = session::get::<Reservation>(&session, session::PENDING_RESERVATION).await;
    let td = TemplateData::new()
        .with_form(ReservationWorkflow::empty_form(pending.as_ref()))
        .with_data("reservation", &pending);
    state.renderer.render(&session, FORM_PAGE, td).await
}

/// POST /make-reservation
///
/// Invalid input re-renders the form with 200 and stores nothing.
pub async fn post_reservation(
    State(state): State<AppState>,
    session: Session,
    Form(values): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let pending = session::get::<Reservation>(&session, session::PENDING_RESERVATION).await;

    let outcome = ReservationWorkflow::new(state.repo.as_ref())
        .submit(values, pending.as_ref())
        .await?;

    match outcome {
        Submission::Rejected(form) => {
            let td = TemplateData::new()
                .with_form(form)
                .with_data("reservation", &pending);
            let page = state.renderer.render(&session, FORM_PAGE, td).await?;
            Ok(page.into_response())
        }
        Submission::Accepted(reservation) => {
            session::pop::<Reservation>(&session, session::PENDING_RESERVATION).await;
            session::put(&session, session::RESERVATION, reservation).await?;
            Ok(Redirect::to("/reservation-summary").into_response())
        }
    }
}

/// GET /reservation-summary - shows the stored reservation once
pub async fn summary(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let Some(reservation) = session::pop::<Reservation>(&session, session::RESERVATION).await else {
        tracing::warn!("Reservation summary requested with no reservation in session");
        session::flash_error(&session, "Can't get reservation from session").await?;
        return Ok(Redirect::temporary("/").into_response());
    };

    let td = TemplateData::new()
        .with_int("nights", reservation.nights())
        .with_data("reservation", &reservation);
    let page = state
        .renderer
        .render(&session, "reservation-summary.page.tmpl", td)
        .await?;
    Ok(page.into_response())
}
