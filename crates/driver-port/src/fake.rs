//! In-memory store page used as the driver double in tests.
//!
//! Models the listing / product-detail / cart views of a small storefront.
//! Handles are epoch-scoped: navigation and every mutating action bump the
//! epoch, after which outstanding handles report [`DriverError::Stale`].
//! Knobs simulate the transient failures the interaction core must absorb:
//! forced-stale clicks, intercepted clicks, a suppressed notification
//! banner, and a skewed item counter.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::DriverError;
use crate::model::{ElementHandle, Selector};
use crate::port::DriverPort;

#[derive(Clone, Debug)]
pub struct CatalogItem {
    pub name: String,
    pub price: f64,
    pub slug: String,
    pub variants: Vec<String>,
}

#[derive(Clone, Debug)]
struct CartLine {
    name: String,
    unit_price: f64,
    quantity: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum View {
    Listing,
    Detail(usize),
    Cart,
}

#[derive(Clone, Debug)]
enum Node {
    Logo,
    CountBadge,
    ListingCard(usize),
    ListingCardTitle(usize),
    ListingCardLink(usize),
    DetailTitle,
    DetailPrice,
    DetailQty,
    DetailVariant,
    DetailAddButton,
    NotifyRegion,
    CartRow(usize),
    CartRowTitle(usize),
    CartRowQty(usize),
    CartRowTotal(usize),
    CartRowDelete(usize),
    GrandTotal,
    EmptyCartMessage,
    ErrorBanner,
}

struct StoreState {
    catalog: Vec<CatalogItem>,
    cart: Vec<CartLine>,
    view: View,
    epoch: u64,
    next_id: u64,
    handles: HashMap<u64, (u64, Node)>,
    max_quantity: u32,
    shipping: f64,
    notify_visible: bool,
    detail_qty_text: String,
    selected_variant: Option<String>,
    pending_row_edit: Option<(usize, String)>,
    error_banner: Option<String>,
    // failure-injection knobs
    suppress_notify: bool,
    stale_clicks: u32,
    intercept_clicks: u32,
    counter_skew: i64,
}

/// In-memory storefront implementing [`DriverPort`].
pub struct FakeStore {
    state: Mutex<StoreState>,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeStore {
    pub fn new() -> Self {
        Self::with_catalog(default_catalog())
    }

    pub fn with_catalog(catalog: Vec<CatalogItem>) -> Self {
        Self {
            state: Mutex::new(StoreState {
                catalog,
                cart: Vec::new(),
                view: View::Listing,
                epoch: 0,
                next_id: 0,
                handles: HashMap::new(),
                max_quantity: 10,
                shipping: 4.99,
                notify_visible: false,
                detail_qty_text: "1".to_string(),
                selected_variant: None,
                pending_row_edit: None,
                error_banner: None,
                suppress_notify: false,
                stale_clicks: 0,
                intercept_clicks: 0,
                counter_skew: 0,
            }),
        }
    }

    /// Keep the notification region hidden after add-to-cart.
    pub async fn suppress_notification(&self, on: bool) {
        self.state.lock().await.suppress_notify = on;
    }

    /// Fail the next `n` native clicks with a stale-reference error.
    pub async fn stale_next_clicks(&self, n: u32) {
        self.state.lock().await.stale_clicks = n;
    }

    /// Obstruct the next `n` native clicks with an overlay.
    pub async fn intercept_next_clicks(&self, n: u32) {
        self.state.lock().await.intercept_clicks = n;
    }

    /// Skew the rendered item counter away from the cart contents.
    pub async fn set_counter_skew(&self, skew: i64) {
        self.state.lock().await.counter_skew = skew;
    }

    pub async fn set_error_banner(&self, message: Option<String>) {
        self.state.lock().await.error_banner = message;
    }

    /// Invalidate every outstanding handle without changing state.
    pub async fn force_rerender(&self) {
        self.state.lock().await.epoch += 1;
    }
}

fn default_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem {
            name: "Camiseta Básica".to_string(),
            price: 19.99,
            slug: "camiseta-basica".to_string(),
            variants: vec!["S".to_string(), "M".to_string(), "L".to_string()],
        },
        CatalogItem {
            name: "Pantalón Casual".to_string(),
            price: 39.99,
            slug: "pantalon-casual".to_string(),
            variants: Vec::new(),
        },
        CatalogItem {
            name: "Gorra Deportiva".to_string(),
            price: 14.99,
            slug: "gorra-deportiva".to_string(),
            variants: Vec::new(),
        },
    ]
}

impl StoreState {
    fn mint(&mut self, node: Node) -> ElementHandle {
        self.next_id += 1;
        self.handles.insert(self.next_id, (self.epoch, node));
        ElementHandle(self.next_id)
    }

    fn node(&self, handle: &ElementHandle) -> Result<Node, DriverError> {
        match self.handles.get(&handle.0) {
            Some((epoch, node)) if *epoch == self.epoch => Ok(node.clone()),
            Some(_) => Err(DriverError::Stale(format!("{handle}"))),
            None => Err(DriverError::Backend(format!("unknown handle {handle}"))),
        }
    }

    fn rerender(&mut self) {
        self.epoch += 1;
        self.pending_row_edit = None;
    }

    fn total_quantity(&self) -> u32 {
        self.cart.iter().map(|l| l.quantity).sum()
    }

    fn badge_text(&self) -> String {
        let shown = self.total_quantity() as i64 + self.counter_skew;
        shown.max(0).to_string()
    }

    fn grand_total_text(&self) -> String {
        if self.cart.is_empty() {
            return "$0.00".to_string();
        }
        let lines: f64 = self
            .cart
            .iter()
            .map(|l| l.unit_price * f64::from(l.quantity))
            .sum();
        format!("${:.2}", lines + self.shipping)
    }

    fn clamp_quantity(&self, requested: i64) -> u32 {
        requested.clamp(1, i64::from(self.max_quantity)) as u32
    }

    fn add_to_cart(&mut self, product: usize) {
        let requested = self.detail_qty_text.trim().parse::<i64>().unwrap_or(1);
        let quantity = self.clamp_quantity(requested);
        let item = self.catalog[product].clone();
        match self.cart.iter_mut().find(|l| l.name == item.name) {
            Some(line) => {
                line.quantity = (line.quantity + quantity).min(self.max_quantity);
            }
            None => self.cart.push(CartLine {
                name: item.name,
                unit_price: item.price,
                quantity,
            }),
        }
        self.notify_visible = !self.suppress_notify;
        self.rerender();
    }

    fn click_effect(&mut self, node: Node) -> Result<(), DriverError> {
        match node {
            Node::ListingCard(i) | Node::ListingCardLink(i) | Node::ListingCardTitle(i) => {
                self.view = View::Detail(i);
                self.detail_qty_text = "1".to_string();
                self.selected_variant = None;
                self.notify_visible = false;
                self.rerender();
                Ok(())
            }
            Node::DetailAddButton => {
                let View::Detail(i) = self.view else {
                    return Err(DriverError::Backend("add button outside detail".into()));
                };
                self.add_to_cart(i);
                Ok(())
            }
            Node::CartRowDelete(i) => {
                if i < self.cart.len() {
                    self.cart.remove(i);
                }
                self.rerender();
                Ok(())
            }
            // clicks on text/labels have no page effect
            _ => Ok(()),
        }
    }

    fn locate_nodes(&self, selector: &Selector) -> Vec<Node> {
        let css = selector.as_str();
        match css {
            "#cart-count" => return vec![Node::CountBadge],
            ".navbar-brand" => return vec![Node::Logo],
            ".error-message" => {
                return if self.error_banner.is_some() {
                    vec![Node::ErrorBanner]
                } else {
                    Vec::new()
                };
            }
            _ => {}
        }
        match self.view {
            View::Listing => match css {
                ".product-wrapper" => {
                    (0..self.catalog.len()).map(Node::ListingCard).collect()
                }
                ".product-title" => (0..self.catalog.len())
                    .map(Node::ListingCardTitle)
                    .collect(),
                _ => Vec::new(),
            },
            View::Detail(i) => match css {
                ".product-title" => vec![Node::DetailTitle],
                ".product-price" => vec![Node::DetailPrice],
                "#product_quantity" => vec![Node::DetailQty],
                "#product_variant" => {
                    if self.catalog[i].variants.is_empty() {
                        Vec::new()
                    } else {
                        vec![Node::DetailVariant]
                    }
                }
                ".product-add-to-cart" => vec![Node::DetailAddButton],
                "#notify_message" => vec![Node::NotifyRegion],
                _ => Vec::new(),
            },
            View::Cart => match css {
                ".cart-product" => (0..self.cart.len()).map(Node::CartRow).collect(),
                "#total-cart-amount" => vec![Node::GrandTotal],
                ".cart-empty-message" => {
                    if self.cart.is_empty() {
                        vec![Node::EmptyCartMessage]
                    } else {
                        Vec::new()
                    }
                }
                _ => Vec::new(),
            },
        }
    }

    fn locate_in_scope(&self, scope: &Node, selector: &Selector) -> Option<Node> {
        let css = selector.as_str();
        match scope {
            Node::ListingCard(i) => match css {
                ".product-title" => Some(Node::ListingCardTitle(*i)),
                "a" => Some(Node::ListingCardLink(*i)),
                _ => None,
            },
            Node::CartRow(i) => match css {
                "a" => Some(Node::CartRowTitle(*i)),
                "input[type='number']" => Some(Node::CartRowQty(*i)),
                "strong" => Some(Node::CartRowTotal(*i)),
                ".btn-delete-from-cart" => Some(Node::CartRowDelete(*i)),
                _ => None,
            },
            _ => None,
        }
    }

    fn text_of(&self, node: &Node) -> Result<String, DriverError> {
        let text = match node {
            Node::Logo => "expressCart".to_string(),
            Node::CountBadge => self.badge_text(),
            Node::ListingCardTitle(i) | Node::ListingCard(i) | Node::ListingCardLink(i) => {
                self.catalog[*i].name.clone()
            }
            Node::DetailTitle => match self.view {
                View::Detail(i) => self.catalog[i].name.clone(),
                _ => return Err(DriverError::Stale("detail title".into())),
            },
            Node::DetailPrice => match self.view {
                View::Detail(i) => format!("${:.2}", self.catalog[i].price),
                _ => return Err(DriverError::Stale("detail price".into())),
            },
            Node::NotifyRegion => "Cart successfully updated".to_string(),
            Node::CartRow(i) | Node::CartRowTitle(i) => self
                .cart
                .get(*i)
                .map(|l| l.name.clone())
                .ok_or_else(|| DriverError::Stale("cart row".into()))?,
            Node::CartRowTotal(i) => self
                .cart
                .get(*i)
                .map(|l| format!("${:.2}", l.unit_price * f64::from(l.quantity)))
                .ok_or_else(|| DriverError::Stale("cart row total".into()))?,
            Node::GrandTotal => self.grand_total_text(),
            Node::EmptyCartMessage => "The cart is currently empty".to_string(),
            Node::ErrorBanner => self.error_banner.clone().unwrap_or_default(),
            Node::DetailQty | Node::CartRowQty(_) => String::new(),
            Node::DetailVariant => self.selected_variant.clone().unwrap_or_default(),
            Node::DetailAddButton => "Add to cart".to_string(),
            Node::CartRowDelete(_) => "×".to_string(),
        };
        Ok(text)
    }

    fn attribute_of(&self, node: &Node, name: &str) -> Option<String> {
        match (node, name) {
            (Node::ListingCardLink(i) | Node::ListingCard(i), "href") => {
                Some(format!("/product/{}", self.catalog[*i].slug))
            }
            (Node::CartRowTitle(i), "href") => {
                let line = self.cart.get(*i)?;
                let item = self.catalog.iter().find(|c| c.name == line.name)?;
                Some(format!("/product/{}", item.slug))
            }
            (Node::DetailQty, "value") => Some(self.detail_qty_text.clone()),
            (Node::CartRowQty(i), "value") => match &self.pending_row_edit {
                Some((row, buffer)) if row == i => Some(buffer.clone()),
                _ => self.cart.get(*i).map(|l| l.quantity.to_string()),
            },
            _ => None,
        }
    }

    fn visible(&self, node: &Node) -> bool {
        match node {
            Node::NotifyRegion => self.notify_visible,
            Node::EmptyCartMessage => self.cart.is_empty(),
            Node::ErrorBanner => self.error_banner.is_some(),
            _ => true,
        }
    }
}

fn url_path(url: &str) -> &str {
    if let Some(rest) = url.strip_prefix("http://").or_else(|| url.strip_prefix("https://")) {
        match rest.find('/') {
            Some(idx) => &rest[idx..],
            None => "/",
        }
    } else {
        url
    }
}

#[async_trait]
impl DriverPort for FakeStore {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        let mut state = self.state.lock().await;
        let path = url_path(url);
        debug!(path, "fake store navigation");
        let view = match path.trim_end_matches('/') {
            "" => View::Listing,
            "/cart" => View::Cart,
            other => match other.strip_prefix("/product/") {
                Some(slug) => {
                    let idx = state
                        .catalog
                        .iter()
                        .position(|c| c.slug == slug)
                        .ok_or_else(|| DriverError::Backend(format!("no product at {path}")))?;
                    View::Detail(idx)
                }
                None => return Err(DriverError::Backend(format!("no route for {path}"))),
            },
        };
        state.view = view;
        state.notify_visible = false;
        state.detail_qty_text = "1".to_string();
        state.selected_variant = None;
        state.rerender();
        Ok(())
    }

    async fn locate(&self, selector: &Selector) -> Result<ElementHandle, DriverError> {
        let mut state = self.state.lock().await;
        let node = state
            .locate_nodes(selector)
            .into_iter()
            .next()
            .ok_or_else(|| DriverError::NotFound(selector.to_string()))?;
        Ok(state.mint(node))
    }

    async fn locate_all(&self, selector: &Selector) -> Result<Vec<ElementHandle>, DriverError> {
        let mut state = self.state.lock().await;
        let nodes = state.locate_nodes(selector);
        Ok(nodes.into_iter().map(|n| state.mint(n)).collect())
    }

    async fn locate_within(
        &self,
        scope: &ElementHandle,
        selector: &Selector,
    ) -> Result<ElementHandle, DriverError> {
        let mut state = self.state.lock().await;
        let scope_node = state.node(scope)?;
        let node = state
            .locate_in_scope(&scope_node, selector)
            .ok_or_else(|| DriverError::NotFound(format!("{selector} within {scope}")))?;
        Ok(state.mint(node))
    }

    async fn is_visible(&self, element: &ElementHandle) -> Result<bool, DriverError> {
        let state = self.state.lock().await;
        let node = state.node(element)?;
        Ok(state.visible(&node))
    }

    async fn is_interactable(&self, element: &ElementHandle) -> Result<bool, DriverError> {
        let state = self.state.lock().await;
        let node = state.node(element)?;
        Ok(state.visible(&node))
    }

    async fn text(&self, element: &ElementHandle) -> Result<String, DriverError> {
        let state = self.state.lock().await;
        let node = state.node(element)?;
        state.text_of(&node)
    }

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let state = self.state.lock().await;
        let node = state.node(element)?;
        Ok(state.attribute_of(&node, name))
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), DriverError> {
        let mut state = self.state.lock().await;
        let node = state.node(element)?;
        if state.stale_clicks > 0 {
            state.stale_clicks -= 1;
            return Err(DriverError::Stale(format!("{element} re-rendered")));
        }
        if state.intercept_clicks > 0 {
            state.intercept_clicks -= 1;
            return Err(DriverError::Intercepted(format!("overlay covers {element}")));
        }
        state.click_effect(node)
    }

    async fn clear(&self, element: &ElementHandle) -> Result<(), DriverError> {
        let mut state = self.state.lock().await;
        let node = state.node(element)?;
        match node {
            Node::DetailQty => {
                state.detail_qty_text.clear();
                Ok(())
            }
            Node::CartRowQty(i) => {
                state.pending_row_edit = Some((i, String::new()));
                Ok(())
            }
            _ => Err(DriverError::Backend(format!("{element} is not editable"))),
        }
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> Result<(), DriverError> {
        let mut state = self.state.lock().await;
        let node = state.node(element)?;
        match node {
            Node::DetailQty => {
                state.detail_qty_text.push_str(text);
                Ok(())
            }
            Node::CartRowQty(i) => {
                if let Some((row, buffer)) = state.pending_row_edit.as_mut() {
                    if *row == i {
                        buffer.push_str(text);
                        return Ok(());
                    }
                }
                state.pending_row_edit = Some((i, text.to_string()));
                Ok(())
            }
            _ => Err(DriverError::Backend(format!("{element} is not editable"))),
        }
    }

    async fn submit(&self, element: &ElementHandle) -> Result<(), DriverError> {
        let mut state = self.state.lock().await;
        let node = state.node(element)?;
        match node {
            Node::CartRowQty(i) => {
                let buffer = match &state.pending_row_edit {
                    Some((row, buffer)) if *row == i => buffer.clone(),
                    _ => String::new(),
                };
                if let Ok(requested) = buffer.trim().parse::<i64>() {
                    let quantity = state.clamp_quantity(requested);
                    if let Some(line) = state.cart.get_mut(i) {
                        line.quantity = quantity;
                    }
                }
                // invalid edits keep the previous quantity, like the store does
                state.rerender();
                Ok(())
            }
            // the detail quantity field commits through the add button
            Node::DetailQty => Ok(()),
            _ => Err(DriverError::Backend(format!("{element} has no form"))),
        }
    }

    async fn select_option(
        &self,
        element: &ElementHandle,
        label: &str,
    ) -> Result<(), DriverError> {
        let mut state = self.state.lock().await;
        let node = state.node(element)?;
        match node {
            Node::DetailVariant => {
                let View::Detail(i) = state.view else {
                    return Err(DriverError::Stale("variant select".into()));
                };
                if state.catalog[i].variants.iter().any(|v| v == label) {
                    state.selected_variant = Some(label.to_string());
                    Ok(())
                } else {
                    Err(DriverError::Backend(format!("no option {label:?}")))
                }
            }
            _ => Err(DriverError::Backend(format!("{element} is not a select"))),
        }
    }

    async fn execute_script(
        &self,
        code: &str,
        target: Option<&ElementHandle>,
    ) -> Result<Value, DriverError> {
        let mut state = self.state.lock().await;
        if let Some(handle) = target {
            let node = state.node(handle)?;
            if code.contains("click") {
                state.click_effect(node)?;
            }
        }
        Ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handles_go_stale_across_mutation() {
        let store = FakeStore::new();
        store.navigate("http://localhost:1111/").await.unwrap();
        let cards = store
            .locate_all(&Selector::css(".product-wrapper"))
            .await
            .unwrap();
        assert_eq!(cards.len(), 3);
        store.navigate("http://localhost:1111/cart").await.unwrap();
        let err = store.text(&cards[0]).await.unwrap_err();
        assert!(err.is_stale());
    }

    #[tokio::test]
    async fn test_add_clamps_to_maximum() {
        let store = FakeStore::new();
        store
            .navigate("http://localhost:1111/product/camiseta-basica")
            .await
            .unwrap();
        let qty = store.locate(&Selector::css("#product_quantity")).await.unwrap();
        store.clear(&qty).await.unwrap();
        store.send_keys(&qty, "20").await.unwrap();
        let add = store
            .locate(&Selector::css(".product-add-to-cart"))
            .await
            .unwrap();
        store.click(&add).await.unwrap();

        store.navigate("http://localhost:1111/cart").await.unwrap();
        let row = store.locate(&Selector::css(".cart-product")).await.unwrap();
        let input = store
            .locate_within(&row, &Selector::css("input[type='number']"))
            .await
            .unwrap();
        assert_eq!(store.attribute(&input, "value").await.unwrap().unwrap(), "10");
    }

    #[tokio::test]
    async fn test_intercepted_click_bypassed_by_script() {
        let store = FakeStore::new();
        store
            .navigate("http://localhost:1111/product/gorra-deportiva")
            .await
            .unwrap();
        store.intercept_next_clicks(1).await;
        let add = store
            .locate(&Selector::css(".product-add-to-cart"))
            .await
            .unwrap();
        let err = store.click(&add).await.unwrap_err();
        assert!(err.is_intercepted());
        store
            .execute_script("arguments[0].click();", Some(&add))
            .await
            .unwrap();
        store.navigate("http://localhost:1111/cart").await.unwrap();
        let rows = store.locate_all(&Selector::css(".cart-product")).await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
