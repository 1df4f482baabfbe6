use thiserror::Error;

use cartcheck_core_types::CheckError;

#[derive(Debug, Error, Clone)]
pub enum DriverError {
    /// No element matches the selector in the current render.
    #[error("no element matches {0}")]
    NotFound(String),
    /// The element reference belongs to a previous render.
    #[error("stale element reference: {0}")]
    Stale(String),
    /// The action target is obstructed by an overlapping element.
    #[error("click intercepted: {0}")]
    Intercepted(String),
    /// Script execution inside the page failed.
    #[error("script failed: {0}")]
    Script(String),
    /// Underlying session transport failed.
    #[error("driver backend error: {0}")]
    Backend(String),
}

impl DriverError {
    pub fn is_stale(&self) -> bool {
        matches!(self, DriverError::Stale(_))
    }

    pub fn is_intercepted(&self) -> bool {
        matches!(self, DriverError::Intercepted(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DriverError::NotFound(_))
    }
}

impl From<DriverError> for CheckError {
    fn from(err: DriverError) -> Self {
        CheckError::new(err.to_string())
    }
}
