//! Reservation Workflow
//!
//! `Empty → Rendered(Form) → Submitted → {Rejected | Accepted} → SummaryRendered → Cleared`
//!
//! This module owns the form checks and the persistence step. Session
//! handling (pending stay, summary pop) lives in the handlers.

use std::collections::HashMap;

use shared::error::AppResult;
use shared::models::Reservation;
use shared::util::{format_date, parse_date};

use crate::db::repository::{DatabaseRepo, RepoError};
use crate::forms::Form;

/// Outcome of a posted reservation form
#[derive(Debug)]
pub enum Submission {
    /// Form with field errors and the entered values; nothing was stored
    Rejected(Form),
    /// Stored reservation with its new id and joined room
    Accepted(Reservation),
}

pub struct ReservationWorkflow<'a> {
    repo: &'a dyn DatabaseRepo,
}

impl<'a> ReservationWorkflow<'a> {
    pub fn new(repo: &'a dyn DatabaseRepo) -> Self {
        Self { repo }
    }

    /// Form shown on entry, prefilled with the stay picked earlier (if any)
    pub fn empty_form(pending: Option<&Reservation>) -> Form {
        let mut values = HashMap::new();
        if let Some(stay) = pending {
            values.insert("start_date".into(), format_date(stay.start_date));
            values.insert("end_date".into(), format_date(stay.end_date));
            if stay.room_id > 0 {
                values.insert("room_id".into(), stay.room_id.to_string());
            }
        }
        Form::new(values)
    }

    /// Validate a posted form and, when it passes, persist the reservation
    /// together with its occupancy restriction
    ///
    /// Stay fields missing from the post are taken from `pending`.
    pub async fn submit(
        &self,
        values: HashMap<String, String>,
        pending: Option<&Reservation>,
    ) -> AppResult<Submission> {
        let mut form = Form::new(values);
        if let Some(stay) = pending {
            fill_missing_stay(&mut form, stay);
        }

        form.required(&["first_name", "last_name", "email"]);
        form.min_length("first_name", 3);
        form.is_email("email");

        let start = parse_date(form.get("start_date"));
        let end = parse_date(form.get("end_date"));
        let room_id = form.get("room_id").parse::<i64>().ok();

        if start.is_none() {
            form.add_error("start_date", "Invalid arrival date");
        }
        if end.is_none() {
            form.add_error("end_date", "Invalid departure date");
        }
        if matches!((start, end), (Some(s), Some(e)) if e <= s) {
            form.add_error("end_date", "Departure must be after arrival");
        }

        let room = match room_id {
            Some(id) => match self.repo.get_room_by_id(id).await {
                Ok(room) => Some(room),
                Err(RepoError::NotFound(_)) => None,
                Err(e) => return Err(e.into()),
            },
            None => None,
        };
        if room.is_none() {
            form.add_error("room_id", "Choose a room first");
        }

        let (Some(start), Some(end), Some(room), true) = (start, end, room, form.valid()) else {
            tracing::debug!(errors = ?form.errors, "Reservation form rejected");
            return Ok(Submission::Rejected(form));
        };

        // Room may have been taken or blocked since the stay was picked
        if !self
            .repo
            .search_availability_by_dates_by_room_id(start, end, room.id)
            .await?
        {
            tracing::info!(room_id = room.id, %start, %end, "Reservation rejected, room taken");
            form.add_error("room_id", "This room is no longer available for these dates");
            return Ok(Submission::Rejected(form));
        }

        let mut reservation = Reservation::pending(start, end);
        reservation.first_name = form.get("first_name").to_string();
        reservation.last_name = form.get("last_name").to_string();
        reservation.email = form.get("email").to_string();
        reservation.phone = form.get("phone").to_string();
        reservation.room_id = room.id;

        reservation.id = self
            .repo
            .insert_reservation_with_restriction(&reservation)
            .await?;
        reservation.room = room;

        tracing::info!(
            reservation_id = reservation.id,
            room_id = reservation.room_id,
            start = %reservation.start_date,
            end = %reservation.end_date,
            "Reservation stored"
        );
        Ok(Submission::Accepted(reservation))
    }
}

fn fill_missing_stay(form: &mut Form, stay: &Reservation) {
    let defaults = [
        ("start_date", format_date(stay.start_date)),
        ("end_date", format_date(stay.end_date)),
        ("room_id", stay.room_id.to_string()),
    ];
    for (field, value) in defaults {
        if !form.has(field) {
            form.values.insert(field.to_string(), value);
        }
    }
}
