//! Schedule configuration validation.
//!
//! Pure validation: errors block acceptance, warnings do not. The caller
//! persists a configuration only when the report is valid.

use slotwise_domain::{
    EngineConfig, ExceptionKind, ScheduleConfiguration, TimeBlock, ValidationReport,
};

use crate::interval;

/// Validate a schedule configuration.
///
/// Errors:
/// - any block with `start >= end` or an endpoint outside the day
/// - overlapping blocks within one weekday
/// - a `Modified` exception with no blocks, malformed blocks, or
///   overlapping blocks (same rules as weekday blocks)
/// - a `Closed`/`Vacation` exception carrying blocks
///
/// Warnings:
/// - a block shorter than `config.min_block_minutes`
/// - a weekday with zero blocks (fully closed)
pub fn validate_schedule(
    schedule: &ScheduleConfiguration,
    config: &EngineConfig,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    for (day, blocks) in schedule.weekday_schedule.iter_days() {
        let field = format!("weekday_schedule.{}", day.as_str());
        validate_block_list(&field, blocks, config, &mut report);

        if blocks.is_empty() {
            report.add_warning(&field, "day has no blocks and is fully closed");
        }
    }

    for (date, exception) in &schedule.exceptions {
        let field = format!("exceptions.{date}");
        match exception.kind {
            ExceptionKind::Modified => {
                if exception.time_blocks.is_empty() {
                    report.add_error(
                        &field,
                        "modified exception must supply at least one time block",
                    );
                } else {
                    validate_block_list(&field, &exception.time_blocks, config, &mut report);
                }
            }
            ExceptionKind::Closed | ExceptionKind::Vacation => {
                if !exception.time_blocks.is_empty() {
                    report.add_error(
                        &field,
                        format!(
                            "{} exception must not carry time blocks",
                            exception.kind.as_str()
                        ),
                    );
                }
            }
        }
    }

    report
}

fn validate_block_list(
    field: &str,
    blocks: &[TimeBlock],
    config: &EngineConfig,
    report: &mut ValidationReport,
) {
    for (i, block) in blocks.iter().enumerate() {
        if !block.is_well_formed() {
            report.add_error(
                format!("{field}[{i}]"),
                format!(
                    "invalid block [{}, {}): start must be before end and within the day",
                    block.start_minute, block.end_minute
                ),
            );
        } else if block.duration_minutes() < config.min_block_minutes {
            report.add_warning(
                format!("{field}[{i}]"),
                format!(
                    "block is shorter than {} minutes, likely a data-entry mistake",
                    config.min_block_minutes
                ),
            );
        }
    }

    // Pairwise overlap check over the well-formed blocks only; malformed
    // blocks were already reported above.
    for i in 0..blocks.len() {
        for j in (i + 1)..blocks.len() {
            if blocks[i].is_well_formed()
                && blocks[j].is_well_formed()
                && interval::overlaps(&blocks[i], &blocks[j])
            {
                report.add_error(
                    field,
                    format!(
                        "blocks [{}, {}) and [{}, {}) overlap",
                        blocks[i].start_minute,
                        blocks[i].end_minute,
                        blocks[j].start_minute,
                        blocks[j].end_minute
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use slotwise_domain::{ScheduleException, Weekday};
    use uuid::Uuid;

    use super::*;

    fn empty_schedule() -> ScheduleConfiguration {
        ScheduleConfiguration::new(Uuid::now_v7())
    }

    #[test]
    fn default_configuration_is_valid() {
        let schedule = ScheduleConfiguration::default_for(Uuid::now_v7());
        let report = validate_schedule(&schedule, &EngineConfig::default());

        assert!(report.is_valid());
        // Saturday and Sunday are closed in the default template
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn overlapping_weekday_blocks_fail_validation() {
        let mut schedule = empty_schedule();
        // [9:00, 12:00) and [11:00, 14:00) on the same day
        schedule
            .weekday_schedule
            .set_day(Weekday::Monday, vec![TimeBlock::new(540, 720), TimeBlock::new(660, 840)]);

        let report = validate_schedule(&schedule, &EngineConfig::default());
        assert!(!report.is_valid());
        assert!(report.errors.iter().any(|e| e.contains("overlap")));
    }

    #[test]
    fn back_to_back_blocks_pass_validation() {
        let mut schedule = empty_schedule();
        schedule
            .weekday_schedule
            .set_day(Weekday::Monday, vec![TimeBlock::new(540, 720), TimeBlock::new(720, 840)]);

        assert!(validate_schedule(&schedule, &EngineConfig::default()).is_valid());
    }

    #[test]
    fn inverted_and_out_of_range_blocks_are_errors() {
        let mut schedule = empty_schedule();
        schedule
            .weekday_schedule
            .set_day(Weekday::Tuesday, vec![TimeBlock::new(720, 540), TimeBlock::new(1400, 1500)]);

        let report = validate_schedule(&schedule, &EngineConfig::default());
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn short_block_is_a_warning_not_an_error() {
        let mut schedule = empty_schedule();
        schedule.weekday_schedule.set_day(Weekday::Monday, vec![TimeBlock::new(540, 550)]);

        let report = validate_schedule(&schedule, &EngineConfig::default());
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.contains("shorter than 15 minutes")));
    }

    #[test]
    fn modified_exception_without_blocks_is_an_error() {
        let mut schedule = empty_schedule();
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        schedule.set_exception(ScheduleException::modified(date, vec![]));

        let report = validate_schedule(&schedule, &EngineConfig::default());
        assert!(!report.is_valid());
        assert!(report.errors.iter().any(|e| e.contains("exceptions.2025-06-02")));
    }

    #[test]
    fn modified_exception_blocks_use_the_same_overlap_rule() {
        let mut schedule = empty_schedule();
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        schedule.set_exception(ScheduleException::modified(
            date,
            vec![TimeBlock::new(540, 720), TimeBlock::new(660, 840)],
        ));

        let report = validate_schedule(&schedule, &EngineConfig::default());
        assert!(!report.is_valid());
    }

    #[test]
    fn closed_exception_with_blocks_is_malformed() {
        let mut schedule = empty_schedule();
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let mut exception = ScheduleException::closed(date);
        exception.time_blocks = vec![TimeBlock::new(540, 720)];
        schedule.set_exception(exception);

        let report = validate_schedule(&schedule, &EngineConfig::default());
        assert!(!report.is_valid());
    }
}
