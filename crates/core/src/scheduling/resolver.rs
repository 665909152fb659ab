//! Exception resolution: effective open blocks for a calendar date.

use chrono::NaiveDate;
use slotwise_domain::{ExceptionKind, ScheduleConfiguration, TimeBlock, Weekday};

/// Resolve the effective open blocks for `date`.
///
/// A date exception takes precedence over the weekly template:
/// - `Closed`/`Vacation` -> no availability at all
/// - `Modified` -> the exception's blocks verbatim (full replacement,
///   never a merge with the template)
/// - no exception -> the template blocks for that weekday
///
/// Pure and total; a missing configuration is handled upstream by
/// substituting the system default.
pub fn resolve_day(schedule: &ScheduleConfiguration, date: NaiveDate) -> Vec<TimeBlock> {
    if let Some(exception) = schedule.exception_for(date) {
        return match exception.kind {
            ExceptionKind::Closed | ExceptionKind::Vacation => Vec::new(),
            ExceptionKind::Modified => exception.time_blocks.clone(),
        };
    }

    schedule.weekday_schedule.blocks_for(Weekday::from_date(date)).to_vec()
}

#[cfg(test)]
mod tests {
    use slotwise_domain::ScheduleException;
    use uuid::Uuid;

    use super::*;

    fn monday() -> NaiveDate {
        // 2025-06-02 is a Monday
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn falls_back_to_weekday_template() {
        let schedule = ScheduleConfiguration::default_for(Uuid::now_v7());
        assert_eq!(resolve_day(&schedule, monday()), vec![TimeBlock::new(540, 1080)]);
    }

    #[test]
    fn closed_and_vacation_yield_no_blocks() {
        let mut schedule = ScheduleConfiguration::default_for(Uuid::now_v7());
        schedule.set_exception(ScheduleException::closed(monday()));
        assert!(resolve_day(&schedule, monday()).is_empty());

        schedule.set_exception(ScheduleException::vacation(monday()));
        assert!(resolve_day(&schedule, monday()).is_empty());
    }

    #[test]
    fn modified_blocks_replace_the_template_entirely() {
        let mut schedule = ScheduleConfiguration::default_for(Uuid::now_v7());
        let short_day = vec![TimeBlock::new(600, 720)];
        schedule.set_exception(ScheduleException::modified(monday(), short_day.clone()));

        assert_eq!(resolve_day(&schedule, monday()), short_day);
    }

    #[test]
    fn exception_applies_only_to_its_date() {
        let mut schedule = ScheduleConfiguration::default_for(Uuid::now_v7());
        schedule.set_exception(ScheduleException::closed(monday()));

        let tuesday = monday().succ_opt().unwrap();
        assert_eq!(resolve_day(&schedule, tuesday), vec![TimeBlock::new(540, 1080)]);
    }

    #[test]
    fn weekday_without_blocks_resolves_empty() {
        let schedule = ScheduleConfiguration::default_for(Uuid::now_v7());
        // 2025-06-07 is a Saturday
        let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
        assert!(resolve_day(&schedule, saturday).is_empty());
    }
}
