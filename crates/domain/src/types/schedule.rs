//! Schedule configuration types
//!
//! A professional's availability is a recurring weekly template
//! ([`WeekdaySchedule`]) plus date-specific overrides
//! ([`ScheduleException`]). All block times are minutes from midnight in
//! the canonical (UTC) zone, half-open `[start, end)`.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_DAY_END_MINUTE, DEFAULT_DAY_START_MINUTE, MINUTES_PER_DAY};
use crate::errors::{Result, SlotwiseError};

/// A half-open working window within one day, in minutes from midnight.
///
/// `[start_minute, end_minute)` - back-to-back blocks sharing an endpoint
/// do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub start_minute: u16,
    pub end_minute: u16,
}

impl TimeBlock {
    /// Create a block without validating it. Validation happens in the
    /// schedule validator so malformed input is reported, not panicked on.
    pub fn new(start_minute: u16, end_minute: u16) -> Self {
        Self { start_minute, end_minute }
    }

    /// Block length in minutes. Zero for malformed blocks.
    pub fn duration_minutes(&self) -> u16 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// `start < end` and both endpoints within the day.
    pub fn is_well_formed(&self) -> bool {
        self.start_minute < self.end_minute && self.end_minute <= MINUTES_PER_DAY
    }
}

/// Day of week for the recurring template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in template order (Monday first).
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Weekday of a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    /// Lowercase name, used for validation messages and storage keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

/// Recurring weekly template: each weekday maps to an ordered list of
/// non-overlapping working windows (a day may have several, e.g. a
/// morning/afternoon split).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdaySchedule {
    #[serde(default)]
    pub monday: Vec<TimeBlock>,
    #[serde(default)]
    pub tuesday: Vec<TimeBlock>,
    #[serde(default)]
    pub wednesday: Vec<TimeBlock>,
    #[serde(default)]
    pub thursday: Vec<TimeBlock>,
    #[serde(default)]
    pub friday: Vec<TimeBlock>,
    #[serde(default)]
    pub saturday: Vec<TimeBlock>,
    #[serde(default)]
    pub sunday: Vec<TimeBlock>,
}

impl WeekdaySchedule {
    /// Blocks for one weekday.
    pub fn blocks_for(&self, day: Weekday) -> &[TimeBlock] {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    /// Replace the blocks for one weekday, keeping them sorted by start.
    pub fn set_day(&mut self, day: Weekday, mut blocks: Vec<TimeBlock>) {
        blocks.sort_by_key(|b| b.start_minute);
        let slot = match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        };
        *slot = blocks;
    }

    /// Iterate weekdays with their blocks, Monday first.
    pub fn iter_days(&self) -> impl Iterator<Item = (Weekday, &[TimeBlock])> {
        Weekday::ALL.into_iter().map(move |day| (day, self.blocks_for(day)))
    }
}

/// Kind of date-specific schedule override.
///
/// `Closed` and `Vacation` are equivalent for availability (zero open
/// blocks); the distinction is kept for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionKind {
    Closed,
    Modified,
    Vacation,
}

impl ExceptionKind {
    /// True when the exception removes all availability for its date.
    pub fn closes_day(&self) -> bool {
        matches!(self, Self::Closed | Self::Vacation)
    }

    /// Lowercase tag, used for storage and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Modified => "modified",
            Self::Vacation => "vacation",
        }
    }
}

impl std::str::FromStr for ExceptionKind {
    type Err = SlotwiseError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "closed" => Ok(Self::Closed),
            "modified" => Ok(Self::Modified),
            "vacation" => Ok(Self::Vacation),
            other => Err(SlotwiseError::invalid_input(
                "kind",
                format!("unknown exception kind '{other}'"),
            )),
        }
    }
}

/// Date-specific override of the weekly template.
///
/// Takes precedence over the weekday schedule for its date. `time_blocks`
/// is meaningful only when `kind` is [`ExceptionKind::Modified`], in which
/// case the blocks fully replace (not merge with) the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleException {
    pub date: NaiveDate,
    pub kind: ExceptionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_blocks: Vec<TimeBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ScheduleException {
    /// Full-day closure.
    pub fn closed(date: NaiveDate) -> Self {
        Self { date, kind: ExceptionKind::Closed, time_blocks: Vec::new(), reason: None }
    }

    /// Vacation day (zero availability, tagged for reporting).
    pub fn vacation(date: NaiveDate) -> Self {
        Self { date, kind: ExceptionKind::Vacation, time_blocks: Vec::new(), reason: None }
    }

    /// Modified hours replacing the weekly template for one date.
    pub fn modified(date: NaiveDate, mut time_blocks: Vec<TimeBlock>) -> Self {
        time_blocks.sort_by_key(|b| b.start_minute);
        Self { date, kind: ExceptionKind::Modified, time_blocks, reason: None }
    }

    /// Attach a human-readable reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// A professional's complete schedule configuration.
///
/// Owned exclusively by one professional; mutated only through the
/// validated update path and never hard-deleted (updates supersede).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfiguration {
    pub professional_id: Uuid,
    pub weekday_schedule: WeekdaySchedule,
    /// At most one exception per date; the map key enforces it.
    #[serde(default)]
    pub exceptions: BTreeMap<NaiveDate, ScheduleException>,
    pub last_updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Uuid>,
}

impl ScheduleConfiguration {
    /// Create an empty configuration for a professional.
    pub fn new(professional_id: Uuid) -> Self {
        Self {
            professional_id,
            weekday_schedule: WeekdaySchedule::default(),
            exceptions: BTreeMap::new(),
            last_updated_at: Utc::now(),
            updated_by: None,
        }
    }

    /// System-default configuration: Mon-Fri 09:00-18:00.
    ///
    /// Substituted at the boundary when a professional has no stored
    /// configuration - "no stored schedule" is not "no availability".
    pub fn default_for(professional_id: Uuid) -> Self {
        let workday = vec![TimeBlock::new(DEFAULT_DAY_START_MINUTE, DEFAULT_DAY_END_MINUTE)];
        let mut schedule = WeekdaySchedule::default();
        for day in [
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
        ] {
            schedule.set_day(day, workday.clone());
        }
        Self {
            professional_id,
            weekday_schedule: schedule,
            exceptions: BTreeMap::new(),
            last_updated_at: Utc::now(),
            updated_by: None,
        }
    }

    /// Exception for a date, if one exists.
    pub fn exception_for(&self, date: NaiveDate) -> Option<&ScheduleException> {
        self.exceptions.get(&date)
    }

    /// Add an exception; fails if the date already has one.
    pub fn add_exception(&mut self, exception: ScheduleException) -> Result<()> {
        if self.exceptions.contains_key(&exception.date) {
            return Err(SlotwiseError::Validation(format!(
                "an exception already exists for {}",
                exception.date
            )));
        }
        self.exceptions.insert(exception.date, exception);
        Ok(())
    }

    /// Add or replace the exception for a date.
    pub fn set_exception(&mut self, exception: ScheduleException) {
        self.exceptions.insert(exception.date, exception);
    }

    /// Remove the exception for a date, returning it if present.
    pub fn remove_exception(&mut self, date: NaiveDate) -> Option<ScheduleException> {
        self.exceptions.remove(&date)
    }

    /// Record who performed the latest mutation and when.
    pub fn touch(&mut self, updated_by: Option<Uuid>) {
        self.last_updated_at = Utc::now();
        self.updated_by = updated_by;
    }
}
