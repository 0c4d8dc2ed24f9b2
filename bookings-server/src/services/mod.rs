//! Services Module

pub mod reservation;

pub use reservation::{ReservationWorkflow, Submission};
