//! Domain types and models

pub mod appointment;
pub mod schedule;
pub mod stats;
pub mod validation;
