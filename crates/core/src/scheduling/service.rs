//! Scheduling service - the engine's facade over its ports.
//!
//! Wires the pure functions (validator, resolver, availability, conflict
//! detector) to the repositories. All blocking I/O happens in the
//! adapters, strictly before the pure functions run.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use slotwise_domain::{
    Appointment, AppointmentStatus, ConflictCheck, EngineConfig, Result, ScheduleConfiguration,
    ScheduleException, ScheduleStats, SlotwiseError, TimeBlock, TimeSlot, ValidationReport,
};
use tracing::{debug, warn};
use uuid::Uuid;

use super::availability::compute_slots;
use super::conflict::check_conflict;
use super::ports::{AppointmentRepository, ScheduleRepository};
use super::resolver::resolve_day;
use super::stats::calculate_stats;
use super::validator::validate_schedule;

/// Availability and booking-conflict service for one tenant.
pub struct SchedulingService {
    schedules: Arc<dyn ScheduleRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    config: EngineConfig,
}

impl SchedulingService {
    /// Create a new scheduling service with default engine configuration.
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        appointments: Arc<dyn AppointmentRepository>,
    ) -> Self {
        Self { schedules, appointments, config: EngineConfig::default() }
    }

    /// Override the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The professional's configuration, or the system default when none
    /// is stored. The default substitution happens here, at the boundary,
    /// never inside the pure functions.
    pub async fn configuration(&self, professional_id: Uuid) -> Result<ScheduleConfiguration> {
        match self.schedules.get_configuration(professional_id).await? {
            Some(configuration) => Ok(configuration),
            None => {
                debug!(%professional_id, "no stored schedule, substituting system default");
                Ok(ScheduleConfiguration::default_for(professional_id))
            }
        }
    }

    /// Validate a configuration without persisting anything.
    pub fn validate(&self, configuration: &ScheduleConfiguration) -> ValidationReport {
        validate_schedule(configuration, &self.config)
    }

    /// Validate and, only when valid, persist a configuration.
    ///
    /// The report is returned either way so the caller can surface
    /// errors and warnings.
    pub async fn update_schedule(
        &self,
        mut configuration: ScheduleConfiguration,
        updated_by: Option<Uuid>,
    ) -> Result<ValidationReport> {
        let report = self.validate(&configuration);
        if !report.is_valid() {
            warn!(
                professional_id = %configuration.professional_id,
                errors = report.errors.len(),
                "rejected schedule update"
            );
            return Ok(report);
        }

        configuration.touch(updated_by);
        self.schedules.save_configuration(&configuration).await?;
        Ok(report)
    }

    /// Add an exception for a date that has none yet. Fails on a
    /// duplicate date; use [`Self::set_exception`] to replace.
    pub async fn add_exception(
        &self,
        professional_id: Uuid,
        exception: ScheduleException,
        updated_by: Option<Uuid>,
    ) -> Result<ValidationReport> {
        let mut configuration = self.configuration(professional_id).await?;
        configuration.add_exception(exception)?;
        self.update_schedule(configuration, updated_by).await
    }

    /// Add or replace the exception for a date.
    pub async fn set_exception(
        &self,
        professional_id: Uuid,
        exception: ScheduleException,
        updated_by: Option<Uuid>,
    ) -> Result<ValidationReport> {
        let mut configuration = self.configuration(professional_id).await?;
        configuration.set_exception(exception);
        self.update_schedule(configuration, updated_by).await
    }

    /// Remove the exception for a date, if present.
    pub async fn remove_exception(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
        updated_by: Option<Uuid>,
    ) -> Result<ValidationReport> {
        let mut configuration = self.configuration(professional_id).await?;
        configuration.remove_exception(date);
        self.update_schedule(configuration, updated_by).await
    }

    /// Effective open blocks for a professional on a date.
    pub async fn effective_day(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<TimeBlock>> {
        let configuration = self.configuration(professional_id).await?;
        Ok(resolve_day(&configuration, date))
    }

    /// Bookable slots for a professional, date, and service duration.
    ///
    /// `step_minutes` falls back to the configured default when `None`.
    pub async fn availability(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
        duration_minutes: u16,
        step_minutes: Option<u16>,
    ) -> Result<Vec<TimeSlot>> {
        let configuration = self.configuration(professional_id).await?;
        let existing = self.appointments_on(professional_id, date).await?;
        let step = step_minutes.unwrap_or(self.config.default_step_minutes);
        compute_slots(&configuration, date, duration_minutes, &existing, step)
    }

    /// Check a candidate interval against the professional's existing
    /// appointments. A conflict is a first-class result, not an error.
    pub async fn check_conflict(
        &self,
        professional_id: Uuid,
        candidate: TimeSlot,
    ) -> Result<ConflictCheck> {
        if !candidate.is_well_formed() {
            return Err(SlotwiseError::invalid_input("candidate", "start must be before end"));
        }

        let existing = self
            .appointments
            .appointments_in_range(professional_id, candidate.start, candidate.end)
            .await?;
        Ok(check_conflict(&candidate, &existing))
    }

    /// Book a candidate interval.
    ///
    /// Pre-checks against the appointments read here, then delegates to
    /// the repository's atomic insert, which re-runs the check inside a
    /// transaction. A race lost at that point surfaces as the same
    /// `SlotwiseError::Conflict` the pre-check produces.
    pub async fn book(&self, professional_id: Uuid, slot: TimeSlot) -> Result<Appointment> {
        let check = self.check_conflict(professional_id, slot).await?;
        if check.has_conflict {
            let detail = check
                .conflicting_appointment
                .map(|a| format!("overlaps appointment starting at {}", a.start))
                .unwrap_or_else(|| "interval is no longer free".to_string());
            return Err(SlotwiseError::Conflict(detail));
        }

        let appointment =
            Appointment::new(professional_id, slot.start, slot.end, AppointmentStatus::Pending);
        self.appointments.book(&appointment).await?;

        debug!(%professional_id, start = %slot.start, "booked appointment");
        Ok(appointment)
    }

    /// Display aggregates for a professional's schedule.
    pub async fn schedule_stats(&self, professional_id: Uuid) -> Result<ScheduleStats> {
        let configuration = self.configuration(professional_id).await?;
        Ok(calculate_stats(&configuration))
    }

    /// All appointments intersecting the given calendar date.
    async fn appointments_on(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>> {
        let day_start = date.and_time(NaiveTime::MIN).and_utc();
        let day_end = day_start + Duration::days(1);
        self.appointments.appointments_in_range(professional_id, day_start, day_end).await
    }
}
