//! cartcheck
//!
//! Resilient interaction and entity-resolution core for verifying a
//! shopping-cart workflow against a live, asynchronously rendering store.
//! The workspace crates do the work; this crate carries configuration,
//! tracing bootstrap, the failure-capture boundary and the public surface.

pub mod capture;
pub mod config;
pub mod telemetry;

pub use action_exec::{ActionMode, ActionTimeouts, Actions, SelectorTarget, Target};
pub use cartcheck_core_types::{money, ActionId, CheckError, Outcome, SessionId};
pub use driver_port::{DriverError, DriverPort, ElementHandle, Selector};
pub use entity_resolver::{
    resolve_by_name, CardFacts, CollectionSelectors, EntityResolver, MatchTier, Resolution,
    ResolveError,
};
pub use mutation_confirm::{confirm_mutation, Signal};
pub use page_flow::{CartPage, DetailPage, FlowError, ListingPage, StorePolicy};

pub use config::CheckConfig;
