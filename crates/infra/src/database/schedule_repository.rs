//! SQLite-backed implementation of the ScheduleRepository port.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};
use slotwise_core::scheduling::ports::ScheduleRepository;
use slotwise_domain::{
    Result, ScheduleConfiguration, ScheduleException, SlotwiseError, WeekdaySchedule,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::InfraError;

/// SQLite implementation of ScheduleRepository.
///
/// The weekly template persists as a JSON column; exceptions live in
/// their own table with a `(professional_id, date)` primary key, which is
/// what enforces at-most-one-exception-per-date at the storage level.
pub struct SqliteScheduleRepository {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteScheduleRepository {
    /// Create a new schedule repository.
    pub fn new(pool: Pool<SqliteConnectionManager>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepository {
    #[instrument(skip(self), fields(professional_id = %professional_id))]
    async fn get_configuration(
        &self,
        professional_id: Uuid,
    ) -> Result<Option<ScheduleConfiguration>> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        let row = conn
            .query_row(
                "SELECT weekday_schedule, last_updated_at, updated_by
                 FROM schedule_configurations
                 WHERE professional_id = ?1",
                params![professional_id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, Option<String>>(2)?,
                    ))
                },
            )
            .optional()
            .map_err(InfraError::from)?;

        let Some((template_json, last_updated_ts, updated_by)) = row else {
            return Ok(None);
        };

        let weekday_schedule: WeekdaySchedule =
            serde_json::from_str(&template_json).map_err(InfraError::from)?;
        let last_updated_at = DateTime::from_timestamp(last_updated_ts, 0).ok_or_else(|| {
            SlotwiseError::Database(format!("invalid stored timestamp {last_updated_ts}"))
        })?;
        let updated_by = updated_by
            .map(|raw| {
                Uuid::parse_str(&raw).map_err(|e| {
                    SlotwiseError::Database(format!("invalid stored updated_by uuid: {e}"))
                })
            })
            .transpose()?;

        let mut exceptions = BTreeMap::new();
        let mut stmt = conn
            .prepare(
                "SELECT date, kind, time_blocks, reason
                 FROM schedule_exceptions
                 WHERE professional_id = ?1
                 ORDER BY date ASC",
            )
            .map_err(InfraError::from)?;
        let rows = stmt
            .query_map(params![professional_id.to_string()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })
            .map_err(InfraError::from)?;

        for row in rows {
            let (date_raw, kind_raw, blocks_json, reason) = row.map_err(InfraError::from)?;
            let date = date_raw.parse::<NaiveDate>().map_err(|e| {
                SlotwiseError::Database(format!("invalid stored exception date: {e}"))
            })?;
            let exception = ScheduleException {
                date,
                kind: kind_raw.parse()?,
                time_blocks: serde_json::from_str(&blocks_json).map_err(InfraError::from)?,
                reason,
            };
            exceptions.insert(date, exception);
        }

        debug!(exceptions = exceptions.len(), "loaded schedule configuration");

        Ok(Some(ScheduleConfiguration {
            professional_id,
            weekday_schedule,
            exceptions,
            last_updated_at,
            updated_by,
        }))
    }

    #[instrument(skip(self, configuration), fields(professional_id = %configuration.professional_id))]
    async fn save_configuration(&self, configuration: &ScheduleConfiguration) -> Result<()> {
        let mut conn = self.pool.get().map_err(InfraError::from)?;
        let tx = conn.transaction().map_err(InfraError::from)?;

        let template_json =
            serde_json::to_string(&configuration.weekday_schedule).map_err(InfraError::from)?;

        tx.execute(
            "INSERT INTO schedule_configurations
                (professional_id, weekday_schedule, last_updated_at, updated_by)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(professional_id) DO UPDATE SET
                weekday_schedule = excluded.weekday_schedule,
                last_updated_at = excluded.last_updated_at,
                updated_by = excluded.updated_by",
            params![
                configuration.professional_id.to_string(),
                template_json,
                configuration.last_updated_at.timestamp(),
                configuration.updated_by.map(|id| id.to_string()),
            ],
        )
        .map_err(InfraError::from)?;

        // The new exception set supersedes the stored one wholesale
        tx.execute(
            "DELETE FROM schedule_exceptions WHERE professional_id = ?1",
            params![configuration.professional_id.to_string()],
        )
        .map_err(InfraError::from)?;

        for exception in configuration.exceptions.values() {
            let blocks_json =
                serde_json::to_string(&exception.time_blocks).map_err(InfraError::from)?;
            tx.execute(
                "INSERT INTO schedule_exceptions
                    (professional_id, date, kind, time_blocks, reason)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    configuration.professional_id.to_string(),
                    exception.date.to_string(),
                    exception.kind.as_str(),
                    blocks_json,
                    exception.reason,
                ],
            )
            .map_err(InfraError::from)?;
        }

        tx.commit().map_err(InfraError::from)?;

        debug!(exceptions = configuration.exceptions.len(), "saved schedule configuration");
        Ok(())
    }
}
