//! Synchronized action executor.
//!
//! Turns timing-sensitive element operations into deterministic, retryable
//! actions: every operation waits behind the same bounded poll primitive,
//! and clicks recover from transient failures through an explicit, ordered
//! fallback ladder.

pub mod errors;
pub mod executor;
pub mod ladder;
pub mod policy;
pub mod target;
pub mod wait;

pub use errors::ActionError;
pub use executor::Actions;
pub use ladder::{ActionMode, ClickTier, TierOutcome};
pub use policy::ActionTimeouts;
pub use target::{SelectorTarget, Target};
pub use wait::poll_until;
