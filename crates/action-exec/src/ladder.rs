//! Click fallback ladder.
//!
//! An explicit ordered sequence of named tiers, each attempted at most once
//! per call, each reporting a tri-state instead of nesting error handlers.

use driver_port::DriverError;
use serde::{Deserialize, Serialize};

/// One strategy in the click fallback ladder.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ClickTier {
    /// Native click on the freshly resolved handle.
    Native,
    /// Re-resolve the same logical target once after a stale reference.
    Reresolve,
    /// Script-invoked click when the target is obstructed.
    ScriptClick,
}

impl ClickTier {
    pub fn name(&self) -> &'static str {
        match self {
            ClickTier::Native => "native",
            ClickTier::Reresolve => "re-resolve",
            ClickTier::ScriptClick => "script-click",
        }
    }

    /// Fallback tiers in strict order, after the native attempt.
    pub fn fallback_chain() -> Vec<ClickTier> {
        vec![ClickTier::Reresolve, ClickTier::ScriptClick]
    }
}

/// How an action ultimately landed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ActionMode {
    Native,
    AfterReresolve,
    ScriptFallback,
}

/// Tri-state result of one tier attempt.
#[derive(Debug)]
pub enum TierOutcome {
    /// The tier performed the action.
    Success(ActionMode),
    /// The tier does not apply to this failure, or its single attempt
    /// failed with a failure the next tier may absorb.
    NeedsNextTier(DriverError),
    /// The tier failed in a way no later tier can absorb.
    Exhausted(DriverError),
}
