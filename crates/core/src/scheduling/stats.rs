//! Schedule statistics - display-only aggregates.

use slotwise_domain::{ScheduleConfiguration, ScheduleStats};

/// Derive display aggregates from a schedule configuration.
///
/// Not part of the booking-correctness contract; safe to recompute at any
/// time.
pub fn calculate_stats(schedule: &ScheduleConfiguration) -> ScheduleStats {
    let mut stats = ScheduleStats::default();

    for (_, blocks) in schedule.weekday_schedule.iter_days() {
        if !blocks.is_empty() {
            stats.working_days_count += 1;
        }
        stats.total_weekly_minutes +=
            blocks.iter().map(|b| u32::from(b.duration_minutes())).sum::<u32>();
    }

    for exception in schedule.exceptions.values() {
        stats.exceptions_count += 1;
        if exception.kind.closes_day() {
            stats.closed_exception_days += 1;
        } else {
            stats.modified_exception_days += 1;
        }
    }

    stats
}
