//! Validation and conflict-check result types

use serde::{Deserialize, Serialize};

use crate::types::appointment::Appointment;

/// Outcome of schedule validation.
///
/// Errors block acceptance; warnings are advisory only. The caller
/// persists a configuration only when `is_valid` is true.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no errors were recorded (warnings do not count).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a blocking error, prefixed with the offending field.
    pub fn add_error(&mut self, field: impl AsRef<str>, message: impl AsRef<str>) {
        self.errors.push(format!("{}: {}", field.as_ref(), message.as_ref()));
    }

    /// Record a non-blocking warning.
    pub fn add_warning(&mut self, field: impl AsRef<str>, message: impl AsRef<str>) {
        self.warnings.push(format!("{}: {}", field.as_ref(), message.as_ref()));
    }
}

/// Outcome of a booking-conflict check.
///
/// A conflict is a first-class result, not an error: the caller turns it
/// into a user-facing rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConflictCheck {
    pub has_conflict: bool,
    /// The earliest-starting conflicting appointment, for deterministic
    /// error messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_appointment: Option<Appointment>,
}

impl ConflictCheck {
    /// No conflict found.
    pub fn clear() -> Self {
        Self { has_conflict: false, conflicting_appointment: None }
    }

    /// Conflict with a specific appointment.
    pub fn against(appointment: Appointment) -> Self {
        Self { has_conflict: true, conflicting_appointment: Some(appointment) }
    }
}
