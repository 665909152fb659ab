//! SQLite-backed implementation of the AppointmentRepository port.
//!
//! Booking is the one place where check-then-write must be atomic: the
//! overlap re-check and the insert run inside a single `BEGIN IMMEDIATE`
//! transaction, so two concurrent bookings for the same professional and
//! overlapping intervals cannot both commit. A lost race surfaces as the
//! same conflict error a pre-checked rejection produces.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Row, Transaction, TransactionBehavior};
use slotwise_core::scheduling::ports::AppointmentRepository;
use slotwise_domain::{Appointment, AppointmentStatus, Result, SlotwiseError, TimeSlot};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::errors::InfraError;

/// SQLite implementation of AppointmentRepository.
pub struct SqliteAppointmentRepository {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteAppointmentRepository {
    /// Create a new appointment repository.
    pub fn new(pool: Pool<SqliteConnectionManager>) -> Self {
        Self { pool }
    }

    /// Earliest-starting non-cancelled appointment overlapping
    /// `[start, end)`, excluding `exclude_id` when rescheduling.
    fn find_overlapping(
        tx: &Transaction<'_>,
        professional_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Appointment>> {
        let row = tx
            .query_row(
                "SELECT id, professional_id, start_ts, end_ts, status
                 FROM appointments
                 WHERE professional_id = ?1
                   AND status != 'cancelled'
                   AND start_ts < ?3 AND ?2 < end_ts
                   AND (?4 IS NULL OR id != ?4)
                 ORDER BY start_ts ASC
                 LIMIT 1",
                params![
                    professional_id.to_string(),
                    start.timestamp_millis(),
                    end.timestamp_millis(),
                    exclude_id.map(|id| id.to_string()),
                ],
                map_appointment_row,
            )
            .optional()
            .map_err(InfraError::from)?;

        row.map(parse_appointment).transpose()
    }
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepository {
    #[instrument(skip(self), fields(professional_id = %professional_id))]
    async fn appointments_in_range(
        &self,
        professional_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        let mut stmt = conn
            .prepare(
                "SELECT id, professional_id, start_ts, end_ts, status
                 FROM appointments
                 WHERE professional_id = ?1 AND start_ts < ?3 AND ?2 < end_ts
                 ORDER BY start_ts ASC",
            )
            .map_err(InfraError::from)?;

        let rows = stmt
            .query_map(
                params![professional_id.to_string(), start.timestamp_millis(), end.timestamp_millis()],
                map_appointment_row,
            )
            .map_err(InfraError::from)?;

        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(parse_appointment(row.map_err(InfraError::from)?)?);
        }

        debug!(count = appointments.len(), "retrieved appointments in range");
        Ok(appointments)
    }

    #[instrument(skip(self, appointment), fields(professional_id = %appointment.professional_id))]
    async fn book(&self, appointment: &Appointment) -> Result<()> {
        let mut conn = self.pool.get().map_err(InfraError::from)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(InfraError::from)?;

        if let Some(existing) = Self::find_overlapping(
            &tx,
            appointment.professional_id,
            appointment.start,
            appointment.end,
            None,
        )? {
            warn!(conflicting_id = %existing.id, "booking lost the interval race");
            return Err(SlotwiseError::Conflict(format!(
                "overlaps appointment starting at {}",
                existing.start
            )));
        }

        tx.execute(
            "INSERT INTO appointments (id, professional_id, start_ts, end_ts, status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                appointment.id.to_string(),
                appointment.professional_id.to_string(),
                appointment.start.timestamp_millis(),
                appointment.end.timestamp_millis(),
                appointment.status.as_str(),
            ],
        )
        .map_err(InfraError::from)?;

        tx.commit().map_err(InfraError::from)?;

        debug!(id = %appointment.id, "booked appointment");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Uuid, status: AppointmentStatus) -> Result<()> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        let updated = conn
            .execute(
                "UPDATE appointments SET status = ?2 WHERE id = ?1",
                params![id.to_string(), status.as_str()],
            )
            .map_err(InfraError::from)?;

        if updated == 0 {
            return Err(SlotwiseError::NotFound(format!("appointment {id}")));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn reschedule(&self, id: Uuid, slot: TimeSlot) -> Result<()> {
        let mut conn = self.pool.get().map_err(InfraError::from)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(InfraError::from)?;

        let professional_id: Option<String> = tx
            .query_row(
                "SELECT professional_id FROM appointments WHERE id = ?1",
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()
            .map_err(InfraError::from)?;

        let Some(professional_id) = professional_id else {
            return Err(SlotwiseError::NotFound(format!("appointment {id}")));
        };
        let professional_id = Uuid::parse_str(&professional_id)
            .map_err(|e| SlotwiseError::Database(format!("invalid stored uuid: {e}")))?;

        if let Some(existing) =
            Self::find_overlapping(&tx, professional_id, slot.start, slot.end, Some(id))?
        {
            return Err(SlotwiseError::Conflict(format!(
                "overlaps appointment starting at {}",
                existing.start
            )));
        }

        tx.execute(
            "UPDATE appointments SET start_ts = ?2, end_ts = ?3 WHERE id = ?1",
            params![id.to_string(), slot.start.timestamp_millis(), slot.end.timestamp_millis()],
        )
        .map_err(InfraError::from)?;

        tx.commit().map_err(InfraError::from)?;

        debug!(%id, start = %slot.start, "rescheduled appointment");
        Ok(())
    }
}

type AppointmentRow = (String, String, i64, i64, String);

fn map_appointment_row(row: &Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn parse_appointment(row: AppointmentRow) -> Result<Appointment> {
    let (id, professional_id, start_ts, end_ts, status) = row;
    Ok(Appointment {
        id: Uuid::parse_str(&id)
            .map_err(|e| SlotwiseError::Database(format!("invalid stored uuid: {e}")))?,
        professional_id: Uuid::parse_str(&professional_id)
            .map_err(|e| SlotwiseError::Database(format!("invalid stored uuid: {e}")))?,
        start: DateTime::from_timestamp_millis(start_ts)
            .ok_or_else(|| SlotwiseError::Database(format!("invalid stored timestamp {start_ts}")))?,
        end: DateTime::from_timestamp_millis(end_ts)
            .ok_or_else(|| SlotwiseError::Database(format!("invalid stored timestamp {end_ts}")))?,
        status: status.parse()?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveTime};
    use tempfile::TempDir;

    use super::*;
    use crate::database::manager::DatabaseManager;

    fn setup() -> (SqliteAppointmentRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let manager = DatabaseManager::new(&temp_dir.path().join("test.db")).unwrap();
        (SqliteAppointmentRepository::new(manager.pool()), temp_dir)
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
            .and_utc()
    }

    #[tokio::test]
    async fn book_and_read_back_in_range() {
        let (repo, _temp) = setup();
        let professional_id = Uuid::now_v7();

        let appointment = Appointment::new(
            professional_id,
            at(10, 0),
            at(10, 30),
            AppointmentStatus::Confirmed,
        );
        repo.book(&appointment).await.unwrap();

        let found = repo
            .appointments_in_range(professional_id, at(0, 0), at(23, 59))
            .await
            .unwrap();
        assert_eq!(found, vec![appointment]);
    }

    #[tokio::test]
    async fn sub_second_instants_round_trip_exactly() {
        let (repo, _temp) = setup();
        let professional_id = Uuid::now_v7();

        let appointment = Appointment::new(
            professional_id,
            at(10, 0) + Duration::milliseconds(250),
            at(10, 30) + Duration::milliseconds(750),
            AppointmentStatus::Confirmed,
        );
        repo.book(&appointment).await.unwrap();

        let found = repo
            .appointments_in_range(professional_id, at(9, 0), at(11, 0))
            .await
            .unwrap();
        assert_eq!(found, vec![appointment]);
    }

    #[tokio::test]
    async fn overlapping_booking_is_rejected_inside_the_transaction() {
        let (repo, _temp) = setup();
        let professional_id = Uuid::now_v7();

        let first =
            Appointment::new(professional_id, at(10, 0), at(10, 30), AppointmentStatus::Pending);
        repo.book(&first).await.unwrap();

        let second =
            Appointment::new(professional_id, at(10, 15), at(10, 45), AppointmentStatus::Pending);
        let err = repo.book(&second).await.unwrap_err();
        assert!(matches!(err, SlotwiseError::Conflict(_)));

        // Adjacent interval is free (half-open semantics in SQL too)
        let adjacent =
            Appointment::new(professional_id, at(10, 30), at(11, 0), AppointmentStatus::Pending);
        repo.book(&adjacent).await.unwrap();
    }

    #[tokio::test]
    async fn cancelled_appointment_does_not_block_booking() {
        let (repo, _temp) = setup();
        let professional_id = Uuid::now_v7();

        let first =
            Appointment::new(professional_id, at(10, 0), at(10, 30), AppointmentStatus::Pending);
        repo.book(&first).await.unwrap();
        repo.update_status(first.id, AppointmentStatus::Cancelled).await.unwrap();

        let replacement =
            Appointment::new(professional_id, at(10, 0), at(10, 30), AppointmentStatus::Pending);
        repo.book(&replacement).await.unwrap();
    }

    #[tokio::test]
    async fn other_professionals_do_not_conflict() {
        let (repo, _temp) = setup();

        let first =
            Appointment::new(Uuid::now_v7(), at(10, 0), at(10, 30), AppointmentStatus::Pending);
        repo.book(&first).await.unwrap();

        let other =
            Appointment::new(Uuid::now_v7(), at(10, 0), at(10, 30), AppointmentStatus::Pending);
        repo.book(&other).await.unwrap();
    }

    #[tokio::test]
    async fn reschedule_reruns_the_conflict_check() {
        let (repo, _temp) = setup();
        let professional_id = Uuid::now_v7();

        let first =
            Appointment::new(professional_id, at(10, 0), at(10, 30), AppointmentStatus::Pending);
        let second =
            Appointment::new(professional_id, at(11, 0), at(11, 30), AppointmentStatus::Pending);
        repo.book(&first).await.unwrap();
        repo.book(&second).await.unwrap();

        // Moving second onto first must fail
        let err = repo
            .reschedule(second.id, TimeSlot::new(at(10, 15), at(10, 45)))
            .await
            .unwrap_err();
        assert!(matches!(err, SlotwiseError::Conflict(_)));

        // Moving it to a free interval succeeds, and moving it onto
        // itself-adjacent times is allowed
        repo.reschedule(second.id, TimeSlot::new(at(12, 0), at(12, 30))).await.unwrap();
        let found = repo
            .appointments_in_range(professional_id, at(12, 0), at(12, 30) + Duration::minutes(1))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, second.id);
    }

    #[tokio::test]
    async fn update_status_of_unknown_appointment_is_not_found() {
        let (repo, _temp) = setup();
        let err = repo
            .update_status(Uuid::now_v7(), AppointmentStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, SlotwiseError::NotFound(_)));
    }
}
