//! # Slotwise Domain
//!
//! Business domain types and models for the Slotwise scheduling engine.
//!
//! This crate contains:
//! - Schedule and appointment data types (TimeBlock, ScheduleConfiguration, ...)
//! - Domain error types and Result definitions
//! - Engine configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Slotwise crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::EngineConfig;
pub use errors::{Result, SlotwiseError};
pub use types::appointment::{Appointment, AppointmentStatus, TimeSlot};
pub use types::schedule::{
    ExceptionKind, ScheduleConfiguration, ScheduleException, TimeBlock, Weekday, WeekdaySchedule,
};
pub use types::stats::ScheduleStats;
pub use types::validation::{ConflictCheck, ValidationReport};
