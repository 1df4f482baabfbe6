use thiserror::Error;

use cartcheck_core_types::CheckError;
use driver_port::DriverError;

#[derive(Debug, Error, Clone)]
pub enum ActionError {
    /// A bounded wait elapsed without the predicate holding.
    #[error("timed out after {waited_ms}ms waiting for {what}")]
    Timeout { what: String, waited_ms: u64 },

    #[error(transparent)]
    Driver(#[from] DriverError),

    /// The logical target could not be re-resolved.
    #[error("target resolution failed: {0}")]
    Resolve(String),
}

impl ActionError {
    pub fn timeout(what: impl Into<String>, waited_ms: u64) -> Self {
        ActionError::Timeout {
            what: what.into(),
            waited_ms,
        }
    }
}

impl From<ActionError> for CheckError {
    fn from(err: ActionError) -> Self {
        CheckError::new(err.to_string())
    }
}
