//! Cart view.
//!
//! Every by-name operation resolves the row against the current render; no
//! index survives across calls. The rendered collection is authoritative
//! over the item counter; a disagreement is logged, not raised.

use std::sync::Arc;

use tracing::{debug, warn};

use action_exec::{Actions, SelectorTarget};
use cartcheck_core_types::money::parse_amount;
use cartcheck_core_types::Outcome;
use driver_port::{DriverError, DriverPort, ElementHandle};
use entity_resolver::EntityResolver;
use mutation_confirm::confirm_mutation;

use crate::errors::FlowError;
use crate::policy::StorePolicy;
use crate::selectors;
use crate::signals::{counter_value, CounterChanged, EntityAbsent, QuantityShows};
use crate::targets::CardChildTarget;

/// The shopping cart.
pub struct CartPage {
    port: Arc<dyn DriverPort>,
    policy: StorePolicy,
    actions: Actions,
}

impl CartPage {
    pub fn new(port: Arc<dyn DriverPort>, policy: StorePolicy) -> Self {
        let actions = Actions::new(port.clone(), policy.timeouts.clone());
        Self {
            port,
            policy,
            actions,
        }
    }

    pub async fn open(&self) -> Result<(), FlowError> {
        self.port.navigate(&self.policy.url("/cart")).await?;
        Ok(())
    }

    fn rows(&self) -> EntityResolver {
        EntityResolver::new(self.port.clone(), selectors::cart::rows())
    }

    /// Number of distinct entities currently rendered.
    pub async fn entity_count(&self) -> Result<usize, FlowError> {
        let count = self.rows().count().await?;
        self.check_counter_agreement(count).await;
        Ok(count)
    }

    pub async fn is_empty(&self) -> Result<bool, FlowError> {
        Ok(self.entity_count().await? == 0)
    }

    /// Quantity shown for the named entity.
    pub async fn quantity_of(&self, name: &str) -> Result<u32, FlowError> {
        let (row, _) = self.rows().resolve(name).await?;
        let input = self
            .port
            .locate_within(&row, &selectors::cart::row_quantity())
            .await?;
        let value = self.port.attribute(&input, "value").await?.unwrap_or_default();
        value
            .trim()
            .parse::<u32>()
            .map_err(|_| FlowError::BadNumber(value))
    }

    /// Line total (unit price × quantity) shown for the named entity.
    pub async fn line_total_of(&self, name: &str) -> Result<f64, FlowError> {
        let (row, _) = self.rows().resolve(name).await?;
        let total = self.read_within(&row, selectors::cart::row_line_total()).await?;
        Ok(parse_amount(&total)?)
    }

    /// Unit price of the named entity, recovered from the rendered line
    /// total; the row displays no separate unit figure.
    pub async fn price_of(&self, name: &str) -> Result<f64, FlowError> {
        let quantity = self.quantity_of(name).await?.max(1);
        let line_total = self.line_total_of(name).await?;
        Ok((line_total / f64::from(quantity) * 100.0).round() / 100.0)
    }

    /// Remove the named entity and confirm: the row vanishing is the
    /// primary signal, a moved item counter the corroborating one.
    pub async fn remove(&self, name: &str) -> Result<Outcome, FlowError> {
        let baseline = counter_value(&self.port).await?;
        self.rows().resolve(name).await?;

        let delete = CardChildTarget::new(
            self.port.clone(),
            selectors::cart::rows(),
            name,
            Some(selectors::cart::row_delete()),
        );
        self.actions.click(&delete).await?;

        let primary = EntityAbsent::new(self.port.clone(), selectors::cart::rows(), name);
        let secondary = CounterChanged::new(self.port.clone(), baseline);
        Ok(confirm_mutation(&primary, &secondary, &self.policy.timeouts).await)
    }

    /// Write a new quantity for the named entity, clamped to the store
    /// maximum, and commit the edit through the row's form.
    pub async fn set_quantity(&self, name: &str, requested: u32) -> Result<Outcome, FlowError> {
        let quantity = self.policy.clamp_quantity(requested);
        if quantity != requested {
            warn!(requested, quantity, "requested quantity clamped to store maximum");
        }
        let baseline = counter_value(&self.port).await?;
        self.rows().resolve(name).await?;

        let field = CardChildTarget::new(
            self.port.clone(),
            selectors::cart::rows(),
            name,
            Some(selectors::cart::row_quantity()),
        );
        self.actions.type_text(&field, &quantity.to_string()).await?;
        self.actions.submit(&field).await?;

        let primary = QuantityShows::new(
            self.port.clone(),
            selectors::cart::rows(),
            name,
            quantity,
        );
        let secondary = CounterChanged::new(self.port.clone(), baseline);
        Ok(confirm_mutation(&primary, &secondary, &self.policy.timeouts).await)
    }

    /// Displayed grand total; parse failures propagate.
    pub async fn grand_total(&self) -> Result<f64, FlowError> {
        let target = SelectorTarget::new(self.port.clone(), selectors::cart::grand_total());
        let text = self.actions.read(&target).await?;
        Ok(parse_amount(&text)?)
    }

    /// Error banner text, when the store shows one.
    pub async fn error_banner(&self) -> Result<Option<String>, FlowError> {
        match self.port.locate(&selectors::cart::error_banner()).await {
            Ok(handle) => Ok(Some(self.port.text(&handle).await?)),
            Err(DriverError::NotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn read_within(
        &self,
        row: &ElementHandle,
        selector: driver_port::Selector,
    ) -> Result<String, FlowError> {
        let handle = self.port.locate_within(row, &selector).await?;
        Ok(self.port.text(&handle).await?)
    }

    async fn check_counter_agreement(&self, rendered: usize) {
        match counter_value(&self.port).await {
            Ok(counter) => {
                if (rendered == 0) != (counter == 0) {
                    warn!(
                        rendered,
                        counter,
                        "item counter disagrees with rendered collection; trusting the collection"
                    );
                }
            }
            Err(err) => debug!(error = %err, "item counter unreadable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use action_exec::ActionTimeouts;
    use driver_port::fake::FakeStore;

    use super::*;

    fn brief_policy() -> StorePolicy {
        StorePolicy {
            timeouts: ActionTimeouts::brief(),
            ..StorePolicy::default()
        }
    }

    async fn cart_with_camiseta() -> (Arc<FakeStore>, CartPage) {
        let store = Arc::new(FakeStore::new());
        store
            .navigate("http://localhost:1111/product/camiseta-basica")
            .await
            .unwrap();
        let detail = crate::detail::DetailPage::new(store.clone(), brief_policy());
        detail.commit().await.unwrap();
        let cart = CartPage::new(store.clone(), brief_policy());
        cart.open().await.unwrap();
        (store, cart)
    }

    #[tokio::test]
    async fn test_by_name_reads_resolve_against_current_render() {
        let (_store, cart) = cart_with_camiseta().await;
        assert_eq!(cart.quantity_of("Camiseta Basica").await.unwrap(), 1);
        assert_eq!(cart.line_total_of("Camiseta Basica").await.unwrap(), 19.99);
        assert_eq!(cart.price_of("Camiseta Basica").await.unwrap(), 19.99);
    }

    #[tokio::test]
    async fn test_absent_name_propagates_not_found() {
        let (_store, cart) = cart_with_camiseta().await;
        let err = cart.quantity_of("Zapatos Formales").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_counter_disagreement_is_logged_not_raised() {
        let (store, cart) = cart_with_camiseta().await;
        store.set_counter_skew(-10).await;
        assert_eq!(cart.entity_count().await.unwrap(), 1);
        assert!(!cart.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_error_banner_probe() {
        let (store, cart) = cart_with_camiseta().await;
        assert!(cart.error_banner().await.unwrap().is_none());
        store
            .set_error_banner(Some("Error del servidor: 500".to_string()))
            .await;
        let banner = cart.error_banner().await.unwrap().unwrap();
        assert!(banner.contains("500"));
    }
}
