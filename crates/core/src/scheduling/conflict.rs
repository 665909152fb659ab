//! Booking-conflict detection.
//!
//! Read-only decision function over a candidate interval and the
//! professional's existing appointments. Atomicity against concurrent
//! bookings is the persistence layer's job; see the appointment
//! repository adapter.

use slotwise_domain::{Appointment, ConflictCheck, TimeSlot};

/// Check whether `candidate` may be booked against `existing`.
///
/// Cancelled appointments are excluded entirely (they free the slot).
/// When several appointments conflict, the earliest-starting one is
/// reported so error messages are deterministic.
pub fn check_conflict(candidate: &TimeSlot, existing: &[Appointment]) -> ConflictCheck {
    let conflicting = existing
        .iter()
        .filter(|appointment| appointment.blocks_time())
        .filter(|appointment| appointment.slot().overlaps(candidate))
        .min_by_key(|appointment| appointment.start);

    match conflicting {
        Some(appointment) => ConflictCheck::against(appointment.clone()),
        None => ConflictCheck::clear(),
    }
}
