//! Appointment types
//!
//! Appointments are read-only to the engine: the booking flow creates
//! them, the engine only checks their intervals for conflicts.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SlotwiseError;

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Whether an appointment in this status still occupies its interval.
    ///
    /// Only cancellation frees the slot; completed and no-show
    /// appointments keep their historical interval reserved.
    pub fn blocks_time(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Lowercase tag used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = SlotwiseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            other => Err(SlotwiseError::invalid_input(
                "status",
                format!("unknown appointment status '{other}'"),
            )),
        }
    }
}

/// A half-open `[start, end)` interval on the canonical timeline.
///
/// Used both for booked-appointment intervals and for computed bookable
/// slots offered to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `start < end`.
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Half-open overlap; touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A booked appointment, as read from the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn new(
        professional_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: AppointmentStatus,
    ) -> Self {
        Self { id: Uuid::now_v7(), professional_id, start, end, status }
    }

    /// The interval this appointment occupies.
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.start, self.end)
    }

    /// Whether this appointment participates in conflict checks.
    pub fn blocks_time(&self) -> bool {
        self.status.blocks_time()
    }
}
