//! Store markup selectors, grouped per view.

use driver_port::Selector;
use entity_resolver::CollectionSelectors;

pub mod listing {
    use super::*;

    pub fn logo() -> Selector {
        Selector::css(".navbar-brand")
    }

    pub fn cards() -> CollectionSelectors {
        CollectionSelectors {
            card: Selector::css(".product-wrapper"),
            label: Selector::css(".product-title"),
            link: Selector::css("a"),
        }
    }

    pub fn card_link() -> Selector {
        Selector::css("a")
    }
}

pub mod detail {
    use super::*;

    pub fn title() -> Selector {
        Selector::css(".product-title")
    }

    pub fn price() -> Selector {
        Selector::css(".product-price")
    }

    pub fn quantity() -> Selector {
        Selector::css("#product_quantity")
    }

    pub fn variant() -> Selector {
        Selector::css("#product_variant")
    }

    pub fn add_button() -> Selector {
        Selector::css(".product-add-to-cart")
    }

    pub fn notify() -> Selector {
        Selector::css("#notify_message")
    }
}

pub mod cart {
    use super::*;

    pub fn rows() -> CollectionSelectors {
        CollectionSelectors {
            card: Selector::css(".cart-product"),
            label: Selector::css("a"),
            link: Selector::css("a"),
        }
    }

    pub fn row_quantity() -> Selector {
        Selector::css("input[type='number']")
    }

    pub fn row_line_total() -> Selector {
        Selector::css("strong")
    }

    pub fn row_delete() -> Selector {
        Selector::css(".btn-delete-from-cart")
    }

    pub fn grand_total() -> Selector {
        Selector::css("#total-cart-amount")
    }

    pub fn empty_message() -> Selector {
        Selector::css(".cart-empty-message")
    }

    pub fn error_banner() -> Selector {
        Selector::css(".error-message")
    }
}

/// Item counter badge, present in the store chrome on every view.
pub fn cart_counter() -> Selector {
    Selector::css("#cart-count")
}
