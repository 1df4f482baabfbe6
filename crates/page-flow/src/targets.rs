//! Name-addressed logical targets.
//!
//! Re-resolution happens through the entity resolver, so the executor's
//! stale-reference tier lands on the same logical entity even after the
//! collection reorders.

use std::sync::Arc;

use async_trait::async_trait;

use action_exec::{ActionError, Target};
use driver_port::{DriverPort, ElementHandle, Selector};
use entity_resolver::{CollectionSelectors, EntityResolver, ResolveError};

/// A card resolved by entity name, or a child element inside it.
pub(crate) struct CardChildTarget {
    port: Arc<dyn DriverPort>,
    collection: CollectionSelectors,
    name: String,
    child: Option<Selector>,
}

impl CardChildTarget {
    pub(crate) fn new(
        port: Arc<dyn DriverPort>,
        collection: CollectionSelectors,
        name: impl Into<String>,
        child: Option<Selector>,
    ) -> Self {
        Self {
            port,
            collection,
            name: name.into(),
            child,
        }
    }
}

#[async_trait]
impl Target for CardChildTarget {
    async fn resolve(&self) -> Result<ElementHandle, ActionError> {
        let resolver = EntityResolver::new(self.port.clone(), self.collection.clone());
        let (card, _) = resolver.resolve(&self.name).await.map_err(|err| match err {
            ResolveError::Driver(driver) => ActionError::Driver(driver),
            other => ActionError::Resolve(other.to_string()),
        })?;
        match &self.child {
            Some(selector) => Ok(self.port.locate_within(&card, selector).await?),
            None => Ok(card),
        }
    }

    fn describe(&self) -> String {
        match &self.child {
            Some(selector) => format!("{} of entity {:?}", selector, self.name),
            None => format!("entity {:?}", self.name),
        }
    }
}
