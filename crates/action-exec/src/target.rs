use std::sync::Arc;

use async_trait::async_trait;

use driver_port::{DriverPort, ElementHandle, Selector};

use crate::errors::ActionError;

/// A logical action target.
///
/// Actions operate on logical targets rather than raw handles so that a
/// stale reference can be re-acquired: the view owns element identity, the
/// caller only owns the description of what to act on.
#[async_trait]
pub trait Target: Send + Sync {
    /// Resolve a fresh handle against the current render.
    async fn resolve(&self) -> Result<ElementHandle, ActionError>;

    /// Human-readable description for logs and errors.
    fn describe(&self) -> String;
}

/// Selector-addressed target.
pub struct SelectorTarget {
    port: Arc<dyn DriverPort>,
    selector: Selector,
}

impl SelectorTarget {
    pub fn new(port: Arc<dyn DriverPort>, selector: Selector) -> Self {
        Self { port, selector }
    }
}

#[async_trait]
impl Target for SelectorTarget {
    async fn resolve(&self) -> Result<ElementHandle, ActionError> {
        Ok(self.port.locate(&self.selector).await?)
    }

    fn describe(&self) -> String {
        self.selector.to_string()
    }
}
