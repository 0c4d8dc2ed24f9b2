//! In-memory Repository
//!
//! Mirrors the Postgres queries over plain vectors. Used by the test suite
//! and by development runs without `DATABASE_URL`.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use shared::models::{Reservation, Room, RoomRestriction, User};
use shared::util::overlaps;

use super::{DatabaseRepo, RepoError, RepoResult};
use crate::util::{hash_password, verify_password};

/// Seeded administrator login for database-less runs
pub const SEED_ADMIN_EMAIL: &str = "admin@admin.com";
pub const SEED_ADMIN_PASSWORD: &str = "password";

#[derive(Default)]
struct Tables {
    rooms: Vec<Room>,
    reservations: Vec<Reservation>,
    room_restrictions: Vec<RoomRestriction>,
    users: Vec<User>,
    next_reservation_id: i64,
    next_restriction_id: i64,
    next_user_id: i64,
}

impl Tables {
    fn push_reservation(&mut self, reservation: &Reservation) -> i64 {
        self.next_reservation_id += 1;
        let id = self.next_reservation_id;
        let now = Utc::now();
        let mut stored = reservation.clone();
        stored.id = id;
        stored.processed = 0;
        stored.created_at = Some(now);
        stored.updated_at = Some(now);
        stored.room = Room::default();
        self.reservations.push(stored);
        id
    }

    fn push_restriction(&mut self, restriction: &RoomRestriction) -> i64 {
        self.next_restriction_id += 1;
        let id = self.next_restriction_id;
        let now = Utc::now();
        let mut stored = restriction.clone();
        stored.id = id;
        stored.created_at = Some(now);
        stored.updated_at = Some(now);
        self.room_restrictions.push(stored);
        id
    }

    /// Reservation with its room joined, as the listing queries return it
    fn joined(&self, reservation: &Reservation) -> Reservation {
        let mut out = reservation.clone();
        out.room = self
            .rooms
            .iter()
            .find(|r| r.id == reservation.room_id)
            .map(|r| Room::new(r.id, r.room_name.clone()))
            .unwrap_or_else(|| Room::new(reservation.room_id, ""));
        out
    }

    fn room_is_free(&self, room_id: i64, start: NaiveDate, end: NaiveDate) -> bool {
        !self
            .room_restrictions
            .iter()
            .any(|rr| rr.room_id == room_id && overlaps(rr.start_date, rr.end_date, start, end))
    }
}

/// Repository held entirely in process memory
#[derive(Default)]
pub struct MemoryRepo {
    tables: RwLock<Tables>,
}

impl MemoryRepo {
    /// Empty store with no rooms, reservations or users
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the two rooms and the seeded administrator
    pub fn seeded() -> RepoResult<Self> {
        let repo = Self::new();
        {
            let mut t = repo.tables.write();
            t.rooms.push(Room::new(1, "General's Quarters"));
            t.rooms.push(Room::new(2, "Major's Suite"));
        }
        repo.add_user("Admin", "User", SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD, 3)?;
        Ok(repo)
    }

    /// Insert a user with a freshly hashed password; an existing e-mail is
    /// left untouched and its id returned
    pub fn add_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        access_level: i32,
    ) -> RepoResult<i64> {
        let hash = hash_password(password)
            .map_err(|e| RepoError::Database(format!("failed to hash password: {e}")))?;
        let mut t = self.tables.write();
        if let Some(existing) = t.users.iter().find(|u| u.email == email) {
            return Ok(existing.id);
        }
        t.next_user_id += 1;
        let id = t.next_user_id;
        let now = Utc::now();
        t.users.push(User {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: hash,
            access_level,
            created_at: Some(now),
            updated_at: Some(now),
        });
        Ok(id)
    }

    pub fn reservation_count(&self) -> usize {
        self.tables.read().reservations.len()
    }

    pub fn restriction_count(&self) -> usize {
        self.tables.read().room_restrictions.len()
    }
}

#[async_trait]
impl DatabaseRepo for MemoryRepo {
    async fn search_availability_by_dates_by_room_id(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        room_id: i64,
    ) -> RepoResult<bool> {
        Ok(self.tables.read().room_is_free(room_id, start, end))
    }

    async fn search_availability_for_all_rooms(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Room>> {
        let t = self.tables.read();
        let mut rooms: Vec<Room> = t
            .rooms
            .iter()
            .filter(|r| t.room_is_free(r.id, start, end))
            .cloned()
            .collect();
        rooms.sort_by_key(|r| r.id);
        Ok(rooms)
    }

    async fn get_room_by_id(&self, id: i64) -> RepoResult<Room> {
        self.tables
            .read()
            .rooms
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(format!("Room {id}")))
    }

    async fn all_rooms(&self) -> RepoResult<Vec<Room>> {
        let mut rooms = self.tables.read().rooms.clone();
        rooms.sort_by(|a, b| a.room_name.cmp(&b.room_name));
        Ok(rooms)
    }

    async fn insert_reservation(&self, reservation: &Reservation) -> RepoResult<i64> {
        Ok(self.tables.write().push_reservation(reservation))
    }

    async fn insert_room_restriction(&self, restriction: &RoomRestriction) -> RepoResult<()> {
        self.tables.write().push_restriction(restriction);
        Ok(())
    }

    async fn insert_reservation_with_restriction(
        &self,
        reservation: &Reservation,
    ) -> RepoResult<i64> {
        // Single write guard: both rows appear together or not at all
        let mut t = self.tables.write();
        let id = t.push_reservation(reservation);
        t.push_restriction(&RoomRestriction::for_reservation(
            id,
            reservation.room_id,
            reservation.start_date,
            reservation.end_date,
        ));
        Ok(id)
    }

    async fn all_reservations(&self) -> RepoResult<Vec<Reservation>> {
        let t = self.tables.read();
        let mut out: Vec<Reservation> = t.reservations.iter().map(|r| t.joined(r)).collect();
        out.sort_by_key(|r| r.start_date);
        Ok(out)
    }

    async fn all_new_reservations(&self) -> RepoResult<Vec<Reservation>> {
        let t = self.tables.read();
        let mut out: Vec<Reservation> = t
            .reservations
            .iter()
            .filter(|r| r.processed == 0)
            .map(|r| t.joined(r))
            .collect();
        out.sort_by_key(|r| r.start_date);
        Ok(out)
    }

    async fn get_reservation_by_id(&self, id: i64) -> RepoResult<Reservation> {
        let t = self.tables.read();
        t.reservations
            .iter()
            .find(|r| r.id == id)
            .map(|r| t.joined(r))
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {id}")))
    }

    async fn update_reservation(&self, reservation: &Reservation) -> RepoResult<()> {
        let mut t = self.tables.write();
        let stored = t
            .reservations
            .iter_mut()
            .find(|r| r.id == reservation.id)
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {}", reservation.id)))?;
        stored.first_name = reservation.first_name.clone();
        stored.last_name = reservation.last_name.clone();
        stored.email = reservation.email.clone();
        stored.phone = reservation.phone.clone();
        stored.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn delete_reservation(&self, id: i64) -> RepoResult<()> {
        let mut t = self.tables.write();
        t.reservations.retain(|r| r.id != id);
        // ON DELETE CASCADE on room_restrictions.reservation_id
        t.room_restrictions.retain(|rr| rr.reservation_id != Some(id));
        Ok(())
    }

    async fn update_processed_for_reservation(&self, id: i64, processed: i32) -> RepoResult<()> {
        let mut t = self.tables.write();
        if let Some(stored) = t.reservations.iter_mut().find(|r| r.id == id) {
            stored.processed = processed;
            stored.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn get_restrictions(
        &self,
        room_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<RoomRestriction>> {
        let t = self.tables.read();
        let mut out: Vec<RoomRestriction> = t
            .room_restrictions
            .iter()
            .filter(|rr| rr.room_id == room_id && start < rr.end_date && end >= rr.start_date)
            .cloned()
            .collect();
        out.sort_by_key(|rr| rr.start_date);
        Ok(out)
    }

    async fn insert_block_for_room(&self, room_id: i64, start_date: NaiveDate) -> RepoResult<()> {
        self.tables
            .write()
            .push_restriction(&RoomRestriction::owner_block(room_id, start_date));
        Ok(())
    }

    async fn delete_block_by_id(&self, restriction_id: i64) -> RepoResult<()> {
        self.tables
            .write()
            .room_restrictions
            .retain(|rr| rr.id != restriction_id);
        Ok(())
    }

    async fn get_user_by_id(&self, id: i64) -> RepoResult<User> {
        self.tables
            .read()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(format!("User {id}")))
    }

    async fn update_user(&self, user: &User) -> RepoResult<()> {
        let mut t = self.tables.write();
        if let Some(stored) = t.users.iter_mut().find(|u| u.id == user.id) {
            stored.first_name = user.first_name.clone();
            stored.last_name = user.last_name.clone();
            stored.email = user.email.clone();
            stored.access_level = user.access_level;
            stored.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> RepoResult<(i64, String)> {
        let (id, hash) = {
            let t = self.tables.read();
            let user = t
                .users
                .iter()
                .find(|u| u.email == email)
                .ok_or_else(|| RepoError::NotFound(format!("User {email}")))?;
            (user.id, user.password.clone())
        };

        match verify_password(password, &hash) {
            Ok(true) => Ok((id, hash)),
            Ok(false) => Err(RepoError::InvalidCredentials),
            Err(e) => Err(RepoError::Database(format!(
                "stored password hash for user {id} is unreadable: {e}"
            ))),
        }
    }
}
