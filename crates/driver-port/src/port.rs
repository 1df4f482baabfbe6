use async_trait::async_trait;
use serde_json::Value;

use crate::errors::DriverError;
use crate::model::{ElementHandle, Selector};

/// Browser session contract consumed by the interaction core.
///
/// Implementations own the underlying session. Element-level operations
/// return [`DriverError::Stale`] when the handle belongs to a previous
/// render and [`DriverError::Intercepted`] when a click target is
/// obstructed; the action executor's fallback ladder absorbs both.
#[async_trait]
pub trait DriverPort: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    /// First element matching the selector in render order.
    async fn locate(&self, selector: &Selector) -> Result<ElementHandle, DriverError>;

    /// Every element matching the selector, in render order.
    async fn locate_all(&self, selector: &Selector) -> Result<Vec<ElementHandle>, DriverError>;

    /// First element matching the selector inside `scope`.
    async fn locate_within(
        &self,
        scope: &ElementHandle,
        selector: &Selector,
    ) -> Result<ElementHandle, DriverError>;

    async fn is_visible(&self, element: &ElementHandle) -> Result<bool, DriverError>;

    async fn is_interactable(&self, element: &ElementHandle) -> Result<bool, DriverError>;

    /// Rendered text content.
    async fn text(&self, element: &ElementHandle) -> Result<String, DriverError>;

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    async fn click(&self, element: &ElementHandle) -> Result<(), DriverError>;

    async fn clear(&self, element: &ElementHandle) -> Result<(), DriverError>;

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> Result<(), DriverError>;

    /// Commit an edit through the enclosing form.
    async fn submit(&self, element: &ElementHandle) -> Result<(), DriverError>;

    /// Select a dropdown option by its visible label.
    async fn select_option(
        &self,
        element: &ElementHandle,
        label: &str,
    ) -> Result<(), DriverError>;

    /// Execute script in the page, optionally against a target element.
    async fn execute_script(
        &self,
        code: &str,
        target: Option<&ElementHandle>,
    ) -> Result<Value, DriverError>;
}
