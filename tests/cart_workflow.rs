//! End-to-end cart workflow scenarios against the in-memory store.

use std::sync::Arc;

use cartcheck::money::approx_eq;
use cartcheck::{ActionTimeouts, CartPage, ListingPage, StorePolicy};
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

async fn add_product(listing: &ListingPage, name: &str, quantity: u32) {
    let detail = listing.select_entity(name).await.unwrap();
    detail.configure_quantity(quantity).await.unwrap();
    let outcome = detail.commit().await.unwrap();
    assert!(outcome.is_confirmed(), "add-to-cart was not confirmed");
}

#[tokio::test]
async fn test_empty_cart_reports_empty() {
    let (_store, listing) = open_listing().await;
    let cart = listing.go_to_cart().await.unwrap();
    assert!(cart.is_empty().await.unwrap());
    assert_eq!(cart.entity_count().await.unwrap(), 0);
    assert_eq!(cart.grand_total().await.unwrap(), 0.0);
}

#[tokio::test]
async fn test_add_single_product() {
    let (_store, listing) = open_listing().await;
    add_product(&listing, "Camiseta Basica", 1).await;

    let cart = listing.go_to_cart().await.unwrap();
    assert!(!cart.is_empty().await.unwrap());
    assert_eq!(cart.entity_count().await.unwrap(), 1);
    assert_eq!(cart.quantity_of("Camiseta Basica").await.unwrap(), 1);
}

#[tokio::test]
async fn test_line_total_is_unit_price_times_quantity() {
    let (_store, listing) = open_listing().await;

    let detail = listing.select_entity("Camiseta Basica").await.unwrap();
    let unit_price = detail.unit_price().await.unwrap();
    detail.configure_quantity(2).await.unwrap();
    assert!(detail.commit().await.unwrap().is_confirmed());

    let cart = detail.go_to_cart().await.unwrap();
    assert_eq!(cart.quantity_of("Camiseta Basica").await.unwrap(), 2);

    let line_total = cart.line_total_of("Camiseta Basica").await.unwrap();
    assert!(
        approx_eq(line_total, unit_price * 2.0),
        "line total {line_total} differs from {unit_price} x 2"
    );

    // the grand total also carries the shipping charge
    let grand_total = cart.grand_total().await.unwrap();
    assert!(grand_total > line_total);
}

#[tokio::test]
async fn test_quantity_request_beyond_maximum_is_clamped() {
    let (_store, listing) = open_listing().await;

    let detail = listing.select_entity("Camiseta Basica").await.unwrap();
    let effective = detail.configure_quantity(20).await.unwrap();
    assert_eq!(effective, 10);
    assert!(detail.commit().await.unwrap().is_confirmed());

    let cart = detail.go_to_cart().await.unwrap();
    assert_eq!(cart.quantity_of("Camiseta Basica").await.unwrap(), 10);
}

#[tokio::test]
async fn test_set_quantity_on_cart_clamps_too() {
    let (_store, listing) = open_listing().await;
    add_product(&listing, "Gorra Deportiva", 1).await;

    let cart = listing.go_to_cart().await.unwrap();
    let outcome = cart.set_quantity("Gorra Deportiva", 20).await.unwrap();
    assert!(outcome.is_confirmed());
    assert_eq!(cart.quantity_of("Gorra Deportiva").await.unwrap(), 10);
}

#[tokio::test]
async fn test_remove_only_product_empties_cart() {
    let (_store, listing) = open_listing().await;
    add_product(&listing, "Camiseta Basica", 1).await;

    let cart = listing.go_to_cart().await.unwrap();
    let outcome = cart.remove("Camiseta Basica").await.unwrap();
    assert!(outcome.is_confirmed());
    assert!(cart.is_empty().await.unwrap());
    assert_eq!(cart.entity_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_remove_one_of_two_products() {
    let (_store, listing) = open_listing().await;
    add_product(&listing, "Camiseta Basica", 1).await;
    listing.open().await.unwrap();
    add_product(&listing, "Pantalon Casual", 1).await;

    let cart = listing.go_to_cart().await.unwrap();
    assert_eq!(cart.entity_count().await.unwrap(), 2);

    assert!(cart.remove("Camiseta Basica").await.unwrap().is_confirmed());
    assert_eq!(cart.entity_count().await.unwrap(), 1);
    assert_eq!(cart.quantity_of("Pantalon Casual").await.unwrap(), 1);
}

#[tokio::test]
async fn test_sequential_by_name_mutations_without_caller_reresolution() {
    let (_store, listing) = open_listing().await;
    add_product(&listing, "Camiseta Basica", 1).await;
    listing.open().await.unwrap();
    add_product(&listing, "Pantalon Casual", 1).await;

    let cart = listing.go_to_cart().await.unwrap();
    // each call resolves against the render the previous mutation produced
    assert!(cart.set_quantity("Pantalon Casual", 3).await.unwrap().is_confirmed());
    assert!(cart.remove("Camiseta Basica").await.unwrap().is_confirmed());
    assert_eq!(cart.quantity_of("Pantalon Casual").await.unwrap(), 3);
    assert_eq!(cart.entity_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_variant_configuration() {
    let (_store, listing) = open_listing().await;

    let detail = listing.select_entity("Camiseta Basica").await.unwrap();
    assert!(detail.configure_variant("M").await.unwrap());

    listing.open().await.unwrap();
    let detail = listing.select_entity("Pantalon Casual").await.unwrap();
    // this entity has no variant control; absence is not an error
    assert!(!detail.configure_variant("M").await.unwrap());
}

#[tokio::test]
async fn test_cart_reachable_directly_from_listing() {
    let (_store, listing) = open_listing().await;
    assert_eq!(listing.cart_count().await.unwrap(), 0);
    let cart: CartPage = listing.go_to_cart().await.unwrap();
    assert!(cart.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_missing_product_on_listing_propagates_not_found() {
    let (_store, listing) = open_listing().await;
    let err = listing.select_entity("Zapatos Formales").await.unwrap_err();
    assert!(err.is_not_found());
}
