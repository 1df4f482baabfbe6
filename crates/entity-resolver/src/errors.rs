//! Error types for entity resolution.

use thiserror::Error;

use cartcheck_core_types::CheckError;
use driver_port::DriverError;

#[derive(Debug, Error, Clone)]
pub enum ResolveError {
    /// No tier matched the query. Callers must not guess an index.
    #[error("no entity matches {query:?} under any tier")]
    NotFound { query: String },

    /// The render could not be snapshotted.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl ResolveError {
    pub fn not_found(query: impl Into<String>) -> Self {
        ResolveError::NotFound {
            query: query.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound { .. })
    }
}

impl From<ResolveError> for CheckError {
    fn from(err: ResolveError) -> Self {
        CheckError::new(err.to_string())
    }
}
