//! # Slotwise Infrastructure
//!
//! Infrastructure implementations of the core scheduling ports.
//!
//! This crate contains:
//! - SQLite-backed repository adapters (schedules, appointments)
//! - The connection pool and schema manager
//! - The transactional booking path that makes check-then-write atomic
//!
//! ## Architecture
//! - Implements traits defined in `slotwise-core`
//! - Depends on `slotwise-domain` and `slotwise-core`
//! - Contains all "impure" code (I/O)

pub mod database;
pub mod errors;

// Re-export commonly used items
pub use database::appointment_repository::SqliteAppointmentRepository;
pub use database::manager::DatabaseManager;
pub use database::schedule_repository::SqliteScheduleRepository;
pub use errors::InfraError;
