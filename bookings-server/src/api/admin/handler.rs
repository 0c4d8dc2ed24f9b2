//! Admin Reservation Handlers

use std::collections::HashMap;

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use shared::error::AppResult;
use shared::models::{Reservation, ReservationUpdate};
use tower_sessions::Session;

use super::calendar::{self, Month};
use crate::forms;
use crate::render::TemplateData;
use crate::session;
use crate::state::AppState;

/// Month selector carried by the calendar page and its links
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub y: Option<i32>,
    pub m: Option<u32>,
}

impl MonthQuery {
    /// Requested month, the current one when absent or invalid
    fn month(&self) -> Month {
        let requested = match (self.y, self.m) {
            (Some(y), Some(m)) => Month::new(y, m),
            _ => None,
        };
        requested.unwrap_or_else(|| Month::containing(chrono::Local::now().date_naive()))
    }
}

/// Where to go back to after acting on a reservation opened from `src`
fn back_to(src: &str, query: &MonthQuery) -> String {
    match src {
        "new" => "/admin/reservations-new".into(),
        "cal" => {
            let month = query.month();
            format!("/admin/reservations-calendar?y={}&m={}", month.year(), month.month())
        }
        _ => "/admin/reservations-all".into(),
    }
}

fn guest_form(reservation: &Reservation) -> forms::Form {
    forms::Form::new(HashMap::from([
        ("first_name".to_string(), reservation.first_name.clone()),
        ("last_name".to_string(), reservation.last_name.clone()),
        ("email".to_string(), reservation.email.clone()),
        ("phone".to_string(), reservation.phone.clone()),
    ]))
}

/// GET /admin/dashboard
pub async fn dashboard(State(state): State<AppState>, session: Session) -> AppResult<Html<String>> {
    state
        .renderer
        .render(&session, "admin-dashboard.page.tmpl", TemplateData::new())
        .await
}

/// GET /admin/reservations-new - unprocessed reservations
pub async fn new_reservations(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Html<String>> {
    let reservations = state.repo.all_new_reservations().await?;
    let td = TemplateData::new().with_data("reservations", &reservations);
    state
        .renderer
        .render(&session, "admin-new-reservations.page.tmpl", td)
        .await
}

/// GET /admin/reservations-all
pub async fn all_reservations(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Html<String>> {
    let reservations = state.repo.all_reservations().await?;
    let td = TemplateData::new().with_data("reservations", &reservations);
    state
        .renderer
        .render(&session, "admin-all-reservations.page.tmpl", td)
        .await
}

fn show_data(src: String, month: Month, reservation: &Reservation, form: forms::Form) -> TemplateData {
    let status = if reservation.is_processed() { "Processed" } else { "New" };
    TemplateData::new()
        .with_string("src", src)
        .with_string("status", status)
        .with_int("year", month.year() as i64)
        .with_int("month", month.month() as i64)
        .with_int("nights", reservation.nights())
        .with_form(form)
        .with_data("reservation", reservation)
}

/// GET /admin/reservations/{src}/{id}/show
pub async fn show_reservation(
    State(state): State<AppState>,
    session: Session,
    Path((src, id)): Path<(String, i64)>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Html<String>> {
    let reservation = state.repo.get_reservation_by_id(id).await?;
    let form = guest_form(&reservation);
    let td = show_data(src, query.month(), &reservation, form);
    state
        .renderer
        .render(&session, "admin-reservations-show.page.tmpl", td)
        .await
}

/// POST /admin/reservations/{src}/{id} - save edited guest fields
pub async fn update_reservation(
    State(state): State<AppState>,
    session: Session,
    Path((src, id)): Path<(String, i64)>,
    Form(values): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let mut reservation = state.repo.get_reservation_by_id(id).await?;
    let query = MonthQuery {
        y: values.get("year").and_then(|v| v.parse().ok()),
        m: values.get("month").and_then(|v| v.parse().ok()),
    };

    let mut form = forms::Form::new(values);
    form.required(&["first_name", "last_name", "email"]);
    form.is_email("email");
    if !form.valid() {
        let td = show_data(src, query.month(), &reservation, form);
        let page = state
            .renderer
            .render(&session, "admin-reservations-show.page.tmpl", td)
            .await?;
        return Ok(page.into_response());
    }

    ReservationUpdate {
        first_name: form.get("first_name").to_string(),
        last_name: form.get("last_name").to_string(),
        email: form.get("email").to_string(),
        phone: form.get("phone").to_string(),
    }
    .apply_to(&mut reservation);
    state.repo.update_reservation(&reservation).await?;

    tracing::info!(reservation_id = id, "Reservation updated");
    session::flash(&session, "Changes saved").await?;
    Ok(Redirect::to(&back_to(&src, &query)).into_response())
}

/// GET /admin/process-reservation/{src}/{id}
pub async fn process_reservation(
    State(state): State<AppState>,
    session: Session,
    Path((src, id)): Path<(String, i64)>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Redirect> {
    state.repo.update_processed_for_reservation(id, 1).await?;
    tracing::info!(reservation_id = id, "Reservation marked as processed");
    session::flash(&session, "Reservation marked as processed").await?;
    Ok(Redirect::to(&back_to(&src, &query)))
}

/// GET /admin/delete-reservation/{src}/{id}
pub async fn delete_reservation(
    State(state): State<AppState>,
    session: Session,
    Path((src, id)): Path<(String, i64)>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Redirect> {
    state.repo.delete_reservation(id).await?;
    tracing::info!(reservation_id = id, "Reservation deleted");
    session::flash(&session, "Reservation deleted").await?;
    Ok(Redirect::to(&back_to(&src, &query)))
}

/// GET /admin/reservations-calendar?y=&m=
pub async fn calendar(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<MonthQuery>,
) -> AppResult<Html<String>> {
    let month = query.month();
    let (prev, next) = (month.previous(), month.next());

    let mut rows = Vec::new();
    for room in state.repo.all_rooms().await? {
        let restrictions = state
            .repo
            .get_restrictions(room.id, month.first, month.last())
            .await?;
        rows.push(calendar::room_row(room, month, &restrictions));
    }

    let td = TemplateData::new()
        .with_string("this_month", month.first.format("%B").to_string())
        .with_int("this_month_year", month.year() as i64)
        .with_int("this_month_number", month.month() as i64)
        .with_int("prev_year", prev.year() as i64)
        .with_int("prev_month", prev.month() as i64)
        .with_int("next_year", next.year() as i64)
        .with_int("next_month", next.month() as i64)
        .with_int("days_in_month", month.days().count() as i64)
        .with_data("rooms", &rows);
    state
        .renderer
        .render(&session, "admin-reservations-calendar.page.tmpl", td)
        .await
}

/// POST /admin/reservations-calendar - apply block / unblock checkboxes
///
/// An owner block rendered on the page (marked by `shown_block_{room}_{id}`)
/// stays only if its `remove_block_{room}_{id}` box is still ticked; blocks
/// the page did not render are never touched. Every ticked
/// `add_block_{room}_{date}` box becomes a new one-day block.
pub async fn update_calendar(
    State(state): State<AppState>,
    session: Session,
    Form(values): Form<HashMap<String, String>>,
) -> AppResult<Redirect> {
    let query = MonthQuery {
        y: values.get("y").and_then(|v| v.parse().ok()),
        m: values.get("m").and_then(|v| v.parse().ok()),
    };
    let month = query.month();

    let mut removed = 0;
    for room in state.repo.all_rooms().await? {
        let restrictions = state
            .repo
            .get_restrictions(room.id, month.first, month.last())
            .await?;
        for block in restrictions.iter().filter(|rr| rr.is_owner_block()) {
            let shown = values.contains_key(&calendar::shown_block_key(room.id, block.id));
            let kept = values.contains_key(&calendar::remove_block_key(room.id, block.id));
            if shown && !kept {
                state.repo.delete_block_by_id(block.id).await?;
                removed += 1;
            }
        }
    }

    let mut added = 0;
    for (room_id, date) in values.keys().filter_map(|k| calendar::parse_add_block_key(k)) {
        state.repo.insert_block_for_room(room_id, date).await?;
        added += 1;
    }

    tracing::info!(
        added,
        removed,
        year = month.year(),
        month = month.month(),
        "Calendar blocks updated"
    );
    session::flash(&session, "Changes saved").await?;
    Ok(Redirect::to(&back_to("cal", &query)))
}
