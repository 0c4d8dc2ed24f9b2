//! Availability Search Handlers
//!
//! A successful search leaves a pending stay (dates, later the room) in the
//! session; the reservation form picks it up from there.

use axum::Json;
use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Reservation;
use shared::util::{format_date, parse_date};
use tower_sessions::Session;

use crate::render::TemplateData;
use crate::session;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub room_id: String,
}

impl SearchForm {
    /// Both dates parsed and `end` after `start`
    fn stay(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = parse_date(&self.start)?;
        let end = parse_date(&self.end)?;
        (end > start).then_some((start, end))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub ok: bool,
    pub message: String,
    pub room_id: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Deserialize)]
pub struct BookRoomQuery {
    pub id: i64,
    pub s: String,
    pub e: String,
}

/// GET /search-availability
pub async fn search_page(State(state): State<AppState>, session: Session) -> AppResult<Html<String>> {
    state
        .renderer
        .render(&session, "search-availability.page.tmpl", TemplateData::new())
        .await
}

/// POST /search-availability - list free rooms for the posted dates
pub async fn search(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SearchForm>,
) -> AppResult<Response> {
    let Some((start, end)) = form.stay() else {
        session::flash_error(&session, ErrorCode::InvalidDateRange.message()).await?;
        return Ok(Redirect::to("/search-availability").into_response());
    };

    let rooms = state.repo.search_availability_for_all_rooms(start, end).await?;
    if rooms.is_empty() {
        tracing::debug!(%start, %end, "No rooms available");
        session::flash_error(&session, ErrorCode::NoAvailability.message()).await?;
        return Ok(Redirect::to("/search-availability").into_response());
    }

    session::put(&session, session::PENDING_RESERVATION, Reservation::pending(start, end)).await?;

    let td = TemplateData::new().with_data("rooms", &rooms);
    let page = state
        .renderer
        .render(&session, "choose-room.page.tmpl", td)
        .await?;
    Ok(page.into_response())
}

/// POST /search-availability-json - availability of one room as JSON
pub async fn search_json(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Json<AvailabilityResponse> {
    let mut resp = AvailabilityResponse {
        ok: false,
        message: String::new(),
        room_id: form.room_id.clone(),
        start_date: form.start.clone(),
        end_date: form.end.clone(),
    };

    let (Some((start, end)), Ok(room_id)) = (form.stay(), form.room_id.trim().parse::<i64>())
    else {
        resp.message = "Invalid request parameters".into();
        return Json(resp);
    };

    match state
        .repo
        .search_availability_by_dates_by_room_id(start, end, room_id)
        .await
    {
        Ok(available) => {
            resp.ok = available;
            resp.message = if available { "Available!" } else { "Not available" }.into();
            resp.start_date = format_date(start);
            resp.end_date = format_date(end);
        }
        Err(e) => {
            tracing::error!(room_id, error = %e, "Availability lookup failed");
            resp.message = "Error querying database".into();
        }
    }
    Json(resp)
}

/// GET /choose-room/{id} - attach a room to the pending stay
pub async fn choose_room(
    State(state): State<AppState>,
    session: Session,
    Path(room_id): Path<i64>,
) -> AppResult<Response> {
    let Some(mut pending) =
        session::get::<Reservation>(&session, session::PENDING_RESERVATION).await
    else {
        session::flash_error(&session, "Can't get reservation from session").await?;
        return Ok(Redirect::to("/").into_response());
    };

    let room = state.repo.get_room_by_id(room_id).await?;
    pending.room_id = room.id;
    pending.room = room;
    session::put(&session, session::PENDING_RESERVATION, pending).await?;

    Ok(Redirect::to("/make-reservation").into_response())
}

/// GET /book-room?id=&s=&e= - start a reservation straight from a room page
pub async fn book_room(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<BookRoomQuery>,
) -> AppResult<Response> {
    let (Some(start), Some(end)) = (parse_date(&query.s), parse_date(&query.e)) else {
        return Err(AppError::invalid_request("Invalid dates"));
    };

    let room = state.repo.get_room_by_id(query.id).await?;

    let mut pending = Reservation::pending(start, end);
    pending.room_id = room.id;
    pending.room = room;
    session::put(&session, session::PENDING_RESERVATION, pending).await?;

    Ok(Redirect::to("/make-reservation").into_response())
}
