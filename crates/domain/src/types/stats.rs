//! Schedule statistics types
//!
//! Purely derived display aggregates. No booking logic depends on these;
//! they may be recomputed freely without affecting invariants.

use serde::{Deserialize, Serialize};

/// Aggregates derived from a schedule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStats {
    /// Sum of all template block durations across the week.
    pub total_weekly_minutes: u32,

    /// Weekdays with at least one template block.
    pub working_days_count: u8,

    /// Total number of date exceptions.
    pub exceptions_count: u32,

    /// Exceptions that close their date entirely (closed + vacation).
    pub closed_exception_days: u32,

    /// Exceptions that replace the template with modified hours.
    pub modified_exception_days: u32,
}
