//! Mock repository implementations for testing
//!
//! Provides in-memory mocks for the scheduling ports, enabling
//! deterministic service tests without database dependencies. The
//! appointment mock reproduces the adapter contract: the overlap re-check
//! and the insert happen under one lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotwise_core::scheduling::ports::{AppointmentRepository, ScheduleRepository};
use slotwise_domain::{
    Appointment, AppointmentStatus, Result as DomainResult, ScheduleConfiguration, SlotwiseError,
    TimeSlot,
};
use uuid::Uuid;

/// In-memory mock for `ScheduleRepository`.
#[derive(Default, Clone)]
pub struct MockScheduleRepository {
    configurations: Arc<Mutex<HashMap<Uuid, ScheduleConfiguration>>>,
}

impl MockScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the mock with a stored configuration.
    pub fn with_configuration(self, configuration: ScheduleConfiguration) -> Self {
        self.configurations
            .lock()
            .unwrap()
            .insert(configuration.professional_id, configuration);
        self
    }

    /// Whether a configuration is stored for the professional.
    pub fn contains(&self, professional_id: Uuid) -> bool {
        self.configurations.lock().unwrap().contains_key(&professional_id)
    }
}

#[async_trait]
impl ScheduleRepository for MockScheduleRepository {
    async fn get_configuration(
        &self,
        professional_id: Uuid,
    ) -> DomainResult<Option<ScheduleConfiguration>> {
        Ok(self.configurations.lock().unwrap().get(&professional_id).cloned())
    }

    async fn save_configuration(&self, configuration: &ScheduleConfiguration) -> DomainResult<()> {
        self.configurations
            .lock()
            .unwrap()
            .insert(configuration.professional_id, configuration.clone());
        Ok(())
    }
}

/// In-memory mock for `AppointmentRepository`.
///
/// `book` holds the mutex across the re-check and the insert, matching
/// the atomicity contract of the real adapter.
#[derive(Default, Clone)]
pub struct MockAppointmentRepository {
    appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl MockAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the mock with an existing appointment.
    pub fn with_appointment(self, appointment: Appointment) -> Self {
        self.appointments.lock().unwrap().push(appointment);
        self
    }

    /// Snapshot of everything stored, for invariant assertions.
    pub fn all(&self) -> Vec<Appointment> {
        self.appointments.lock().unwrap().clone()
    }
}

#[async_trait]
impl AppointmentRepository for MockAppointmentRepository {
    async fn appointments_in_range(
        &self,
        professional_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Appointment>> {
        let mut matching: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.professional_id == professional_id && a.start < end && start < a.end)
            .cloned()
            .collect();
        matching.sort_by_key(|a| a.start);
        Ok(matching)
    }

    async fn book(&self, appointment: &Appointment) -> DomainResult<()> {
        let mut appointments = self.appointments.lock().unwrap();
        let candidate = appointment.slot();
        if appointments.iter().any(|a| {
            a.professional_id == appointment.professional_id
                && a.blocks_time()
                && a.slot().overlaps(&candidate)
        }) {
            return Err(SlotwiseError::Conflict("interval is already booked".to_string()));
        }
        appointments.push(appointment.clone());
        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: AppointmentStatus) -> DomainResult<()> {
        let mut appointments = self.appointments.lock().unwrap();
        match appointments.iter_mut().find(|a| a.id == id) {
            Some(appointment) => {
                appointment.status = status;
                Ok(())
            }
            None => Err(SlotwiseError::NotFound(format!("appointment {id}"))),
        }
    }

    async fn reschedule(&self, id: Uuid, slot: TimeSlot) -> DomainResult<()> {
        let mut appointments = self.appointments.lock().unwrap();
        let professional_id = match appointments.iter().find(|a| a.id == id) {
            Some(appointment) => appointment.professional_id,
            None => return Err(SlotwiseError::NotFound(format!("appointment {id}"))),
        };

        if appointments.iter().any(|a| {
            a.id != id
                && a.professional_id == professional_id
                && a.blocks_time()
                && a.slot().overlaps(&slot)
        }) {
            return Err(SlotwiseError::Conflict("new interval is already booked".to_string()));
        }

        if let Some(appointment) = appointments.iter_mut().find(|a| a.id == id) {
            appointment.start = slot.start;
            appointment.end = slot.end;
        }
        Ok(())
    }
}
