use std::sync::Arc;
use std::time::Instant;

use tokio::time::sleep;
use tracing::{debug, warn};

use driver_port::{DriverError, DriverPort, ElementHandle};

use crate::errors::ActionError;
use crate::ladder::{ActionMode, ClickTier, TierOutcome};
use crate::policy::ActionTimeouts;
use crate::target::Target;
use crate::wait::poll_until;

const SCRIPT_CLICK: &str = "arguments[0].click();";

/// Executes element operations against one driver session.
///
/// All operations wait behind the bounded poll primitive; callers must not
/// assume handles obtained before a call remain valid after it.
pub struct Actions {
    port: Arc<dyn DriverPort>,
    timeouts: ActionTimeouts,
}

impl Actions {
    pub fn new(port: Arc<dyn DriverPort>, timeouts: ActionTimeouts) -> Self {
        Self { port, timeouts }
    }

    pub fn timeouts(&self) -> &ActionTimeouts {
        &self.timeouts
    }

    /// Click a logical target.
    ///
    /// Ladder, in strict order and each tier at most once per call:
    /// native click, re-resolve after a stale reference, script-invoked
    /// click after an interception. Exhausting the ladder propagates the
    /// underlying failure.
    pub async fn click(&self, target: &dyn Target) -> Result<ActionMode, ActionError> {
        let handle = self.resolve_when_present(target).await?;
        self.await_interactable(&handle, target).await?;

        let mut handle = handle;
        let mut pending = match self.port.click(&handle).await {
            Ok(()) => return Ok(ActionMode::Native),
            Err(err) => err,
        };
        debug!(
            target = %target.describe(),
            error = %pending,
            "native click failed, entering fallback ladder"
        );

        for tier in ClickTier::fallback_chain() {
            match self.attempt_click_tier(tier, target, &mut handle, &pending).await? {
                TierOutcome::Success(mode) => {
                    warn!(
                        target = %target.describe(),
                        tier = tier.name(),
                        "click landed through fallback tier"
                    );
                    return Ok(mode);
                }
                TierOutcome::NeedsNextTier(err) => pending = err,
                TierOutcome::Exhausted(err) => return Err(ActionError::Driver(err)),
            }
        }
        Err(ActionError::Driver(pending))
    }

    /// Clear the target and write `text`.
    ///
    /// Committing the edit (e.g. a form submission) stays with the caller;
    /// pages that require explicit confirmation call [`Actions::submit`].
    pub async fn type_text(&self, target: &dyn Target, text: &str) -> Result<(), ActionError> {
        let handle = self.resolve_when_present(target).await?;
        self.await_visible(&handle, target).await?;
        self.port.clear(&handle).await?;
        self.port.send_keys(&handle, text).await?;
        Ok(())
    }

    /// Rendered text of the target.
    pub async fn read(&self, target: &dyn Target) -> Result<String, ActionError> {
        let handle = self.resolve_when_present(target).await?;
        self.await_visible(&handle, target).await?;
        Ok(self.port.text(&handle).await?)
    }

    /// Attribute of the target, waiting for visibility first.
    pub async fn read_attribute(
        &self,
        target: &dyn Target,
        name: &str,
    ) -> Result<Option<String>, ActionError> {
        let handle = self.resolve_when_present(target).await?;
        self.await_visible(&handle, target).await?;
        Ok(self.port.attribute(&handle, name).await?)
    }

    /// Commit a pending edit through the target's form.
    pub async fn submit(&self, target: &dyn Target) -> Result<(), ActionError> {
        let handle = self.resolve_when_present(target).await?;
        self.port.submit(&handle).await?;
        Ok(())
    }

    /// Select a dropdown option on the target by visible label.
    pub async fn select(&self, target: &dyn Target, label: &str) -> Result<(), ActionError> {
        let handle = self.resolve_when_present(target).await?;
        self.await_visible(&handle, target).await?;
        self.port.select_option(&handle, label).await?;
        Ok(())
    }

    /// Resolve a logical target, polling while the current render does not
    /// contain it yet. Exhausting the deadline propagates the resolution
    /// failure itself, never a guessed handle.
    async fn resolve_when_present(
        &self,
        target: &dyn Target,
    ) -> Result<ElementHandle, ActionError> {
        let deadline = Instant::now() + self.timeouts.wait();
        loop {
            let failure = match target.resolve().await {
                Ok(handle) => return Ok(handle),
                Err(ActionError::Driver(err)) if err.is_not_found() => ActionError::Driver(err),
                Err(err @ ActionError::Resolve(_)) => err,
                Err(err) => return Err(err),
            };
            if Instant::now() >= deadline {
                return Err(failure);
            }
            sleep(self.timeouts.poll()).await;
        }
    }

    async fn attempt_click_tier(
        &self,
        tier: ClickTier,
        target: &dyn Target,
        handle: &mut ElementHandle,
        pending: &DriverError,
    ) -> Result<TierOutcome, ActionError> {
        match tier {
            ClickTier::Native => Ok(TierOutcome::NeedsNextTier(pending.clone())),
            ClickTier::Reresolve => {
                if !pending.is_stale() {
                    return Ok(TierOutcome::NeedsNextTier(pending.clone()));
                }
                let fresh = self.resolve_when_present(target).await?;
                self.await_interactable(&fresh, target).await?;
                *handle = fresh;
                match self.port.click(&fresh).await {
                    Ok(()) => Ok(TierOutcome::Success(ActionMode::AfterReresolve)),
                    Err(err) => Ok(TierOutcome::NeedsNextTier(err)),
                }
            }
            ClickTier::ScriptClick => {
                if !pending.is_intercepted() {
                    return Ok(TierOutcome::NeedsNextTier(pending.clone()));
                }
                match self.port.execute_script(SCRIPT_CLICK, Some(handle)).await {
                    Ok(_) => Ok(TierOutcome::Success(ActionMode::ScriptFallback)),
                    Err(err) => Ok(TierOutcome::Exhausted(err)),
                }
            }
        }
    }

    async fn await_visible(
        &self,
        handle: &ElementHandle,
        target: &dyn Target,
    ) -> Result<(), ActionError> {
        let port = self.port.as_ref();
        let what = format!("{} visible", target.describe());
        poll_until(&self.timeouts, &what, || async move {
            port.is_visible(handle).await
        })
        .await
    }

    async fn await_interactable(
        &self,
        handle: &ElementHandle,
        target: &dyn Target,
    ) -> Result<(), ActionError> {
        let port = self.port.as_ref();
        let what = format!("{} interactable", target.describe());
        poll_until(&self.timeouts, &what, || async move {
            Ok(port.is_visible(handle).await? && port.is_interactable(handle).await?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use driver_port::fake::FakeStore;
    use driver_port::Selector;

    use super::*;
    use crate::target::SelectorTarget;

    async fn detail_page() -> (Arc<FakeStore>, Actions) {
        let store = Arc::new(FakeStore::new());
        store
            .navigate("http://localhost:1111/product/camiseta-basica")
            .await
            .unwrap();
        let actions = Actions::new(store.clone(), ActionTimeouts::brief());
        (store, actions)
    }

    fn add_button(store: &Arc<FakeStore>) -> SelectorTarget {
        SelectorTarget::new(store.clone(), Selector::css(".product-add-to-cart"))
    }

    #[tokio::test]
    async fn test_native_click() {
        let (store, actions) = detail_page().await;
        let mode = actions.click(&add_button(&store)).await.unwrap();
        assert_eq!(mode, ActionMode::Native);
    }

    #[tokio::test]
    async fn test_stale_reference_recovers_through_reresolve() {
        let (store, actions) = detail_page().await;
        store.stale_next_clicks(1).await;
        let mode = actions.click(&add_button(&store)).await.unwrap();
        assert_eq!(mode, ActionMode::AfterReresolve);
    }

    #[tokio::test]
    async fn test_interception_recovers_through_script_click() {
        let (store, actions) = detail_page().await;
        store.intercept_next_clicks(1).await;
        let mode = actions.click(&add_button(&store)).await.unwrap();
        assert_eq!(mode, ActionMode::ScriptFallback);
    }

    #[tokio::test]
    async fn test_full_ladder_stale_then_intercepted() {
        let (store, actions) = detail_page().await;
        store.stale_next_clicks(1).await;
        store.intercept_next_clicks(1).await;
        let mode = actions.click(&add_button(&store)).await.unwrap();
        assert_eq!(mode, ActionMode::ScriptFallback);
    }

    #[tokio::test]
    async fn test_tiers_attempted_at_most_once() {
        let (store, actions) = detail_page().await;
        store.stale_next_clicks(2).await;
        let err = actions.click(&add_button(&store)).await.unwrap_err();
        match err {
            ActionError::Driver(err) => assert!(err.is_stale()),
            other => panic!("expected the stale failure to propagate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_waits_then_extracts_text() {
        let (store, actions) = detail_page().await;
        let price = SelectorTarget::new(store.clone(), Selector::css(".product-price"));
        assert_eq!(actions.read(&price).await.unwrap(), "$19.99");
    }

    #[tokio::test]
    async fn test_type_text_clears_existing_content() {
        let (store, actions) = detail_page().await;
        let qty = SelectorTarget::new(store.clone(), Selector::css("#product_quantity"));
        actions.type_text(&qty, "3").await.unwrap();
        let value = actions.read_attribute(&qty, "value").await.unwrap();
        assert_eq!(value.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_missing_target_propagates_not_found() {
        let (store, actions) = detail_page().await;
        let missing = SelectorTarget::new(store.clone(), Selector::css("#no-such-element"));
        let err = actions.click(&missing).await.unwrap_err();
        match err {
            ActionError::Driver(err) => assert!(err.is_not_found()),
            other => panic!("expected not-found, got {other:?}"),
        }
    }
}
