//! Outcome of one attempted UI mutation.

use serde::{Deserialize, Serialize};

/// Result of one attempted UI mutation.
///
/// `Inconclusive` is distinct from failure: no positive signal was observed
/// within the timeout, but no error was raised either. Callers decide
/// whether to treat it as success or propagate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// The primary completion signal was observed.
    Succeeded,
    /// The primary signal was absent; a corroborating signal confirmed the
    /// mutation instead.
    SucceededViaFallback,
    /// Neither signal confirmed the mutation within the timeout.
    Inconclusive,
}

impl Outcome {
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::Succeeded => "succeeded",
            Outcome::SucceededViaFallback => "succeeded-via-fallback",
            Outcome::Inconclusive => "inconclusive",
        }
    }

    /// True when some signal positively confirmed the mutation.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Outcome::Succeeded | Outcome::SucceededViaFallback)
    }
}
