//! Error taxonomy for the back-office core.
//!
//! Three failure classes cover everything the screens need to distinguish:
//! local validation (never reaches the data layer), a stale id (the row was
//! deleted elsewhere), and everything else (network, server-side validation,
//! permissions).

use crate::types::RecordId;

/// Core error type shared by controllers, forms, and adapters.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required field was empty or malformed at submit time.
    /// Surfaced inline next to the offending field, never as a toast.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The record no longer exists server-side.
    #[error("{entity} {id} could not be found")]
    NotFound {
        entity: &'static str,
        id: RecordId,
    },

    /// Any other persistence or transport failure. Not retried automatically.
    #[error("Operation failed: {0}")]
    Operation(String),
}

impl CoreError {
    /// `true` for failures that indicate the record id is stale and the
    /// collection should be re-fetched to reconcile.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }
}
