//! Entity detail view.

use std::sync::Arc;

use tracing::warn;

use action_exec::{Actions, SelectorTarget};
use cartcheck_core_types::money::parse_amount;
use cartcheck_core_types::Outcome;
use driver_port::{DriverError, DriverPort};
use mutation_confirm::confirm_mutation;

use crate::cart::CartPage;
use crate::errors::FlowError;
use crate::policy::StorePolicy;
use crate::selectors;
use crate::signals::{counter_value, CounterChanged, NotifyVisible};

/// Detail view of one selected entity.
pub struct DetailPage {
    port: Arc<dyn DriverPort>,
    policy: StorePolicy,
    actions: Actions,
}

impl std::fmt::Debug for DetailPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailPage")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl DetailPage {
    pub fn new(port: Arc<dyn DriverPort>, policy: StorePolicy) -> Self {
        let actions = Actions::new(port.clone(), policy.timeouts.clone());
        Self {
            port,
            policy,
            actions,
        }
    }

    pub async fn title(&self) -> Result<String, FlowError> {
        let target = SelectorTarget::new(self.port.clone(), selectors::detail::title());
        Ok(self.actions.read(&target).await?)
    }

    /// Unit price as displayed; parse failures propagate.
    pub async fn unit_price(&self) -> Result<f64, FlowError> {
        let target = SelectorTarget::new(self.port.clone(), selectors::detail::price());
        let text = self.actions.read(&target).await?;
        Ok(parse_amount(&text)?)
    }

    /// Write the desired quantity, clamped to the store maximum. Returns
    /// the effective quantity.
    pub async fn configure_quantity(&self, requested: u32) -> Result<u32, FlowError> {
        let quantity = self.policy.clamp_quantity(requested);
        if quantity != requested {
            warn!(requested, quantity, "requested quantity clamped to store maximum");
        }
        let field = SelectorTarget::new(self.port.clone(), selectors::detail::quantity());
        self.actions.type_text(&field, &quantity.to_string()).await?;
        Ok(quantity)
    }

    /// Select a variant when the entity offers one. Absence of the variant
    /// control is not an error; returns whether a selection happened.
    pub async fn configure_variant(&self, label: &str) -> Result<bool, FlowError> {
        match self.port.locate(&selectors::detail::variant()).await {
            Err(DriverError::NotFound(_)) => Ok(false),
            Err(err) => Err(err.into()),
            Ok(_) => {
                let select = SelectorTarget::new(self.port.clone(), selectors::detail::variant());
                self.actions.select(&select, label).await?;
                Ok(true)
            }
        }
    }

    /// Trigger add-to-cart and confirm it: the notification region is the
    /// primary signal, a moved item counter the corroborating one.
    pub async fn commit(&self) -> Result<Outcome, FlowError> {
        let baseline = counter_value(&self.port).await?;
        let button = SelectorTarget::new(self.port.clone(), selectors::detail::add_button());
        self.actions.click(&button).await?;

        let primary = NotifyVisible::new(self.port.clone());
        let secondary = CounterChanged::new(self.port.clone(), baseline);
        Ok(confirm_mutation(&primary, &secondary, &self.policy.timeouts).await)
    }

    pub async fn go_to_cart(&self) -> Result<CartPage, FlowError> {
        let cart = CartPage::new(self.port.clone(), self.policy.clone());
        cart.open().await?;
        Ok(cart)
    }
}
