//! Entry/listing view.

use std::sync::Arc;

use action_exec::{Actions, SelectorTarget};
use driver_port::DriverPort;
use entity_resolver::EntityResolver;

use crate::cart::CartPage;
use crate::detail::DetailPage;
use crate::errors::FlowError;
use crate::policy::StorePolicy;
use crate::selectors;
use crate::signals::counter_value;
use crate::targets::CardChildTarget;

/// The product listing.
pub struct ListingPage {
    port: Arc<dyn DriverPort>,
    policy: StorePolicy,
    actions: Actions,
}

impl ListingPage {
    pub fn new(port: Arc<dyn DriverPort>, policy: StorePolicy) -> Self {
        let actions = Actions::new(port.clone(), policy.timeouts.clone());
        Self {
            port,
            policy,
            actions,
        }
    }

    /// Navigate to the listing and wait for it to render.
    pub async fn open(&self) -> Result<(), FlowError> {
        self.port.navigate(&self.policy.url("/")).await?;
        let logo = SelectorTarget::new(self.port.clone(), selectors::listing::logo());
        self.actions.read(&logo).await?;
        Ok(())
    }

    /// Select an entity by display name and move to its detail view.
    pub async fn select_entity(&self, name: &str) -> Result<DetailPage, FlowError> {
        let resolver = EntityResolver::new(self.port.clone(), selectors::listing::cards());
        resolver.resolve(name).await?;

        let link = CardChildTarget::new(
            self.port.clone(),
            selectors::listing::cards(),
            name,
            Some(selectors::listing::card_link()),
        );
        self.actions.click(&link).await?;
        Ok(DetailPage::new(self.port.clone(), self.policy.clone()))
    }

    /// Item count shown by the store chrome; empty text reads as zero.
    pub async fn cart_count(&self) -> Result<u32, FlowError> {
        Ok(counter_value(&self.port).await?)
    }

    pub async fn go_to_cart(&self) -> Result<CartPage, FlowError> {
        let cart = CartPage::new(self.port.clone(), self.policy.clone());
        cart.open().await?;
        Ok(cart)
    }
}
