use thiserror::Error;

use action_exec::ActionError;
use cartcheck_core_types::money::AmountError;
use cartcheck_core_types::CheckError;
use driver_port::DriverError;
use entity_resolver::ResolveError;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Amount(#[from] AmountError),

    /// A numeric field held text that does not parse.
    #[error("field held non-numeric text {0:?}")]
    BadNumber(String),
}

impl FlowError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FlowError::Resolve(err) if err.is_not_found())
    }
}

impl From<FlowError> for CheckError {
    fn from(err: FlowError) -> Self {
        CheckError::new(err.to_string())
    }
}
