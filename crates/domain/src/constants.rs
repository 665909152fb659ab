//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! scheduling engine. Times are minutes counted from midnight in the
//! canonical (UTC) zone.

// Minute-of-day bounds for schedule blocks
pub const MINUTES_PER_DAY: u16 = 1440;

// System-default weekly template (Mon-Fri 09:00-18:00), applied when a
// professional has no stored configuration
pub const DEFAULT_DAY_START_MINUTE: u16 = 9 * 60;
pub const DEFAULT_DAY_END_MINUTE: u16 = 18 * 60;

// Validation thresholds
pub const DEFAULT_MIN_BLOCK_MINUTES: u16 = 15;

// Availability computation
pub const DEFAULT_STEP_MINUTES: u16 = 30;
