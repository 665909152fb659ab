//! Repository port interfaces for the scheduling service.
//!
//! The engine is a pure computation library; everything it reads or
//! writes goes through these traits. Adapters live in `slotwise-infra`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotwise_domain::{Appointment, AppointmentStatus, Result, ScheduleConfiguration, TimeSlot};
use uuid::Uuid;

/// Access to stored schedule configurations.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Stored configuration for a professional, if any. Absence means the
    /// caller substitutes the system default.
    async fn get_configuration(
        &self,
        professional_id: Uuid,
    ) -> Result<Option<ScheduleConfiguration>>;

    /// Persist a configuration, superseding any previous one. Never a
    /// hard delete.
    async fn save_configuration(&self, configuration: &ScheduleConfiguration) -> Result<()>;
}

/// Access to a professional's appointments.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Appointments whose interval intersects `[start, end)`, ordered by
    /// start ascending. Includes cancelled ones; callers filter by status.
    async fn appointments_in_range(
        &self,
        professional_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>>;

    /// Insert a new appointment if its interval is free.
    ///
    /// Implementations must run the overlap re-check and the insert as a
    /// single atomic unit per professional, so two concurrent bookings
    /// for overlapping intervals cannot both succeed. A lost race is
    /// reported as `SlotwiseError::Conflict`, indistinguishable from a
    /// pre-checked conflict.
    async fn book(&self, appointment: &Appointment) -> Result<()>;

    /// Transition an appointment's status.
    async fn update_status(&self, id: Uuid, status: AppointmentStatus) -> Result<()>;

    /// Move an appointment to a new interval, re-running the conflict
    /// check atomically (update-then-reconflict-check, not a new entity).
    async fn reschedule(&self, id: Uuid, slot: TimeSlot) -> Result<()>;
}
