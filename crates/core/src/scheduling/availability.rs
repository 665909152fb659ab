//! Availability computation: bookable slots for a date and duration.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use slotwise_domain::{Appointment, Result, ScheduleConfiguration, SlotwiseError, TimeBlock, TimeSlot};
use tracing::debug;

use crate::interval;
use crate::scheduling::resolver::resolve_day;

/// Compute the ordered list of bookable `[start, start + duration)` slots
/// for `date`.
///
/// Open blocks come from the exception resolver; busy intervals are the
/// non-cancelled appointment intervals clipped to the date; candidate
/// starts walk each free sub-block at `step_minutes` granularity.
///
/// A closed date or a duration longer than every free sub-block yields an
/// empty list, not an error. Non-positive duration or step fails fast.
/// Pure given its inputs: identical inputs yield identical output.
pub fn compute_slots(
    schedule: &ScheduleConfiguration,
    date: NaiveDate,
    duration_minutes: u16,
    existing: &[Appointment],
    step_minutes: u16,
) -> Result<Vec<TimeSlot>> {
    if duration_minutes == 0 {
        return Err(SlotwiseError::invalid_input("duration_minutes", "must be positive"));
    }
    if step_minutes == 0 {
        return Err(SlotwiseError::invalid_input("step_minutes", "must be positive"));
    }

    let open_blocks = resolve_day(schedule, date);
    if open_blocks.is_empty() {
        return Ok(Vec::new());
    }

    let busy = busy_blocks_on(date, existing);
    let day_start = day_start_utc(date);

    let mut slots = Vec::new();
    for block in open_blocks {
        for free in interval::subtract(block, &busy) {
            let mut start = free.start_minute;
            // Widened comparison: `start + duration` can exceed u16::MAX
            // for durations or steps longer than any day, which must end
            // the walk, not overflow
            while u32::from(start) + u32::from(duration_minutes) <= u32::from(free.end_minute) {
                let slot_start = day_start + Duration::minutes(i64::from(start));
                let slot_end = slot_start + Duration::minutes(i64::from(duration_minutes));
                slots.push(TimeSlot::new(slot_start, slot_end));
                start = start.saturating_add(step_minutes);
            }
        }
    }

    slots.sort_by_key(|slot| slot.start);
    slots.dedup();

    debug!(
        %date,
        duration_minutes,
        step_minutes,
        existing = existing.len(),
        slots = slots.len(),
        "computed availability"
    );

    Ok(slots)
}

/// Non-cancelled appointment intervals clipped to `date`, as minute-of-day
/// blocks. Appointments entirely outside the date contribute nothing.
fn busy_blocks_on(date: NaiveDate, existing: &[Appointment]) -> Vec<TimeBlock> {
    let day_start = day_start_utc(date);
    let day_end = day_start + Duration::days(1);

    existing
        .iter()
        .filter(|appointment| appointment.blocks_time())
        .filter(|appointment| appointment.start < day_end && day_start < appointment.end)
        .map(|appointment| {
            let clipped_start = appointment.start.max(day_start);
            let clipped_end = appointment.end.min(day_end);
            TimeBlock::new(
                minutes_into_day(day_start, clipped_start),
                minutes_into_day(day_start, clipped_end),
            )
        })
        .collect()
}

fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn minutes_into_day(day_start: DateTime<Utc>, at: DateTime<Utc>) -> u16 {
    // Clipping guarantees 0..=1440
    (at - day_start).num_minutes() as u16
}
