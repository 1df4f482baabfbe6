//! Transient-failure scenarios: the core must absorb stale references,
//! intercepted clicks and suppressed completion signals without false
//! negatives, and must not invent success when no signal corroborates.

use std::sync::Arc;

use cartcheck::{ActionTimeouts, ListingPage, Outcome, StorePolicy};
use driver_port::fake::FakeStore;

fn policy() -> StorePolicy {
    StorePolicy {
        timeouts: ActionTimeouts::brief(),
        ..StorePolicy::default()
    }
}

async fn open_listing() -> (Arc<FakeStore>, ListingPage) {
    cartcheck::telemetry::init_tracing("warn");
    let store = Arc::new(FakeStore::new());
    let listing = ListingPage::new(store.clone(), policy());
    listing.open().await.unwrap();
    (store, listing)
}

#[tokio::test]
async fn test_stale_reference_during_selection_is_absorbed() {
    let (store, listing) = open_listing().await;
    store.stale_next_clicks(1).await;
    let detail = listing.select_entity("Camiseta Basica").await.unwrap();
    assert_eq!(detail.title().await.unwrap(), "Camiseta Básica");
}

#[tokio::test]
async fn test_intercepted_add_to_cart_is_absorbed() {
    let (store, listing) = open_listing().await;
    let detail = listing.select_entity("Gorra Deportiva").await.unwrap();
    store.intercept_next_clicks(1).await;
    let outcome = detail.commit().await.unwrap();
    assert!(outcome.is_confirmed());

    let cart = detail.go_to_cart().await.unwrap();
    assert_eq!(cart.quantity_of("Gorra Deportiva").await.unwrap(), 1);
}

#[tokio::test]
async fn test_suppressed_notification_confirmed_by_counter() {
    let (store, listing) = open_listing().await;
    store.suppress_notification(true).await;
    let detail = listing.select_entity("Camiseta Basica").await.unwrap();
    let outcome = detail.commit().await.unwrap();
    assert_eq!(outcome, Outcome::SucceededViaFallback);
}

#[tokio::test]
async fn test_no_signal_at_all_is_inconclusive_not_success() {
    let (store, listing) = open_listing().await;
    let detail = listing.select_entity("Camiseta Basica").await.unwrap();
    store.suppress_notification(true).await;
    // counter appears unchanged: the one added item is skewed away
    store.set_counter_skew(-1).await;
    let outcome = detail.commit().await.unwrap();
    assert_eq!(outcome, Outcome::Inconclusive);
}

#[tokio::test]
async fn test_mutations_invalidate_outstanding_references() {
    let (store, listing) = open_listing().await;
    let detail = listing.select_entity("Camiseta Basica").await.unwrap();
    assert!(detail.commit().await.unwrap().is_confirmed());
    let cart = detail.go_to_cart().await.unwrap();

    // a forced re-render between operations must not break by-name access
    store.force_rerender().await;
    assert_eq!(cart.quantity_of("Camiseta Basica").await.unwrap(), 1);
    store.force_rerender().await;
    assert!(cart.remove("Camiseta Basica").await.unwrap().is_confirmed());
}

#[tokio::test]
async fn test_counter_skew_does_not_flip_emptiness() {
    let (store, listing) = open_listing().await;
    let detail = listing.select_entity("Camiseta Basica").await.unwrap();
    assert!(detail.commit().await.unwrap().is_confirmed());
    let cart = detail.go_to_cart().await.unwrap();

    store.set_counter_skew(-10).await;
    // rendered collection wins over the counter
    assert!(!cart.is_empty().await.unwrap());
    assert_eq!(cart.entity_count().await.unwrap(), 1);
}
