//! Infrastructure error conversions.
//!
//! Adapters convert driver errors into the domain error type at the
//! boundary, so core and callers only ever see `SlotwiseError`.

use slotwise_domain::SlotwiseError;
use thiserror::Error;

/// Wrapper carrying a domain error produced inside an adapter.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct InfraError(pub SlotwiseError);

impl From<rusqlite::Error> for InfraError {
    fn from(err: rusqlite::Error) -> Self {
        Self(SlotwiseError::Database(err.to_string()))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        Self(SlotwiseError::Database(format!("pool error: {err}")))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(err: serde_json::Error) -> Self {
        Self(SlotwiseError::Database(format!("stored payload is not valid JSON: {err}")))
    }
}

impl From<InfraError> for SlotwiseError {
    fn from(err: InfraError) -> Self {
        err.0
    }
}
