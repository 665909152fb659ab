//! Scheduling engine: validation, exception resolution, availability
//! computation, conflict detection, and the service facade over ports.

pub mod availability;
pub mod conflict;
pub mod ports;
pub mod resolver;
pub mod service;
pub mod stats;
pub mod validator;
