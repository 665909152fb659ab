//! SQLite-backed persistence adapters.

pub mod appointment_repository;
pub mod manager;
pub mod schedule_repository;
