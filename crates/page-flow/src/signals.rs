//! Completion signals observed by the confirmation heuristic.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use driver_port::{DriverError, DriverPort};
use entity_resolver::{resolve_by_name, CardFacts, CollectionSelectors, EntityResolver};
use mutation_confirm::Signal;

use crate::selectors;

/// Current value of the item counter badge.
///
/// An absent badge or empty text reads as zero, like the store renders an
/// empty cart; non-numeric text is warned about and read as zero.
pub async fn counter_value(port: &Arc<dyn DriverPort>) -> Result<u32, DriverError> {
    let handle = match port.locate(&selectors::cart_counter()).await {
        Ok(handle) => handle,
        Err(err) if err.is_not_found() => return Ok(0),
        Err(err) => return Err(err),
    };
    let text = port.text(&handle).await?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    match trimmed.parse::<u32>() {
        Ok(value) => Ok(value),
        Err(_) => {
            warn!(text = trimmed, "item counter held non-numeric text");
            Ok(0)
        }
    }
}

/// Primary signal: the notification region is visible.
pub struct NotifyVisible {
    port: Arc<dyn DriverPort>,
}

impl NotifyVisible {
    pub fn new(port: Arc<dyn DriverPort>) -> Self {
        Self { port }
    }
}

#[async_trait]
impl Signal for NotifyVisible {
    fn describe(&self) -> String {
        format!("{} visible", selectors::detail::notify())
    }

    async fn observe(&self) -> Result<bool, DriverError> {
        match self.port.locate(&selectors::detail::notify()).await {
            Ok(handle) => self.port.is_visible(&handle).await,
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Secondary signal: the item counter moved away from its pre-action value.
pub struct CounterChanged {
    port: Arc<dyn DriverPort>,
    baseline: u32,
}

impl CounterChanged {
    pub fn new(port: Arc<dyn DriverPort>, baseline: u32) -> Self {
        Self { port, baseline }
    }
}

#[async_trait]
impl Signal for CounterChanged {
    fn describe(&self) -> String {
        format!("item counter changed from {}", self.baseline)
    }

    async fn observe(&self) -> Result<bool, DriverError> {
        Ok(counter_value(&self.port).await? != self.baseline)
    }
}

/// Primary signal for removals: the entity no longer resolves.
pub struct EntityAbsent {
    port: Arc<dyn DriverPort>,
    collection: CollectionSelectors,
    name: String,
}

impl EntityAbsent {
    pub fn new(
        port: Arc<dyn DriverPort>,
        collection: CollectionSelectors,
        name: impl Into<String>,
    ) -> Self {
        Self {
            port,
            collection,
            name: name.into(),
        }
    }
}

#[async_trait]
impl Signal for EntityAbsent {
    fn describe(&self) -> String {
        format!("entity {:?} absent", self.name)
    }

    async fn observe(&self) -> Result<bool, DriverError> {
        let resolver = EntityResolver::new(self.port.clone(), self.collection.clone());
        let cards = match resolver.collect().await {
            Ok(cards) => cards,
            Err(entity_resolver::ResolveError::Driver(err)) => return Err(err),
            Err(_) => return Ok(false),
        };
        let facts: Vec<CardFacts> = cards.into_iter().map(|(_, f)| f).collect();
        Ok(resolve_by_name(&facts, &self.name).is_err())
    }
}

/// Primary signal for quantity edits: the row's field shows the expected
/// value.
pub struct QuantityShows {
    port: Arc<dyn DriverPort>,
    collection: CollectionSelectors,
    name: String,
    expected: u32,
}

impl QuantityShows {
    pub fn new(
        port: Arc<dyn DriverPort>,
        collection: CollectionSelectors,
        name: impl Into<String>,
        expected: u32,
    ) -> Self {
        Self {
            port,
            collection,
            name: name.into(),
            expected,
        }
    }
}

#[async_trait]
impl Signal for QuantityShows {
    fn describe(&self) -> String {
        format!("entity {:?} quantity shows {}", self.name, self.expected)
    }

    async fn observe(&self) -> Result<bool, DriverError> {
        let resolver = EntityResolver::new(self.port.clone(), self.collection.clone());
        let (row, _) = match resolver.resolve(&self.name).await {
            Ok(found) => found,
            Err(entity_resolver::ResolveError::Driver(err)) => return Err(err),
            Err(_) => return Ok(false),
        };
        let input = self
            .port
            .locate_within(&row, &selectors::cart::row_quantity())
            .await?;
        let value = self.port.attribute(&input, "value").await?.unwrap_or_default();
        Ok(value.trim() == self.expected.to_string())
    }
}
