//! Engine configuration
//!
//! Tunable knobs for the scheduling engine. All values have sensible
//! defaults; callers override them when a tenant needs different policy.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MIN_BLOCK_MINUTES, DEFAULT_STEP_MINUTES};

/// Configuration for schedule validation and availability computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Blocks shorter than this raise a validation warning (almost always a
    /// data-entry mistake). Warnings never block acceptance.
    pub min_block_minutes: u16,

    /// Slot-start granularity used when the caller does not supply one.
    pub default_step_minutes: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_block_minutes: DEFAULT_MIN_BLOCK_MINUTES,
            default_step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}
