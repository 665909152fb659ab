//! # Slotwise Core
//!
//! Pure availability and booking-conflict logic - no infrastructure
//! dependencies.
//!
//! This crate contains:
//! - Time interval primitives (half-open, minute-of-day)
//! - Schedule validation, exception resolution, availability computation
//! - The booking-conflict detector
//! - Port/adapter interfaces (traits) and the scheduling service facade
//!
//! ## Architecture Principles
//! - Only depends on `slotwise-domain`
//! - No database or platform code
//! - All external dependencies via traits
//! - Every computation is pure with respect to its explicit inputs, so
//!   parallel invocation needs no locking

pub mod interval;
pub mod scheduling;

// Re-export specific items to avoid ambiguity
pub use scheduling::availability::compute_slots;
pub use scheduling::conflict::check_conflict;
pub use scheduling::ports::{AppointmentRepository, ScheduleRepository};
pub use scheduling::resolver::resolve_day;
pub use scheduling::service::SchedulingService;
pub use scheduling::stats::calculate_stats;
pub use scheduling::validator::validate_schedule;
