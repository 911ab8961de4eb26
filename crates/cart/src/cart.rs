//! Cart data model.
//!
//! A [`Cart`] is an ordered sequence of [`LineItem`]s, unique by product ID,
//! with insertion order preserved. Updates are value-returning: helpers like
//! [`Cart::with_amount`] build the next cart instead of mutating lines in
//! place, so a failed persist never leaves a half-applied change behind.

use copper_kettle_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// A catalog product as the cart sees it.
///
/// Everything besides the ID is an opaque payload carried along for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
}

/// Available stock for a product, authoritative at fetch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

/// One product entry in the cart with its requested quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl LineItem {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.amount)
    }
}

/// Ordered collection of cart line items, unique by product ID.
///
/// Serializes transparently as a JSON array of line items, so the persisted
/// form round-trips exactly with the in-memory value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Current quantity for a product, if present.
    #[must_use]
    pub fn amount_of(&self, id: ProductId) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.product.id == id)
            .map(|item| item.amount)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.amount_of(id).is_some()
    }

    /// A new cart with the product's quantity set to `amount`.
    ///
    /// Updates the existing line in place (positionally) when the product is
    /// already in the cart, otherwise appends a new line. The receiver is
    /// left untouched.
    #[must_use]
    pub fn with_amount(&self, product: Product, amount: u32) -> Self {
        let mut items: Vec<LineItem> = self
            .items
            .iter()
            .map(|item| {
                if item.product.id == product.id {
                    LineItem {
                        product: item.product.clone(),
                        amount,
                    }
                } else {
                    item.clone()
                }
            })
            .collect();

        if !self.contains(product.id) {
            items.push(LineItem { product, amount });
        }

        Self { items }
    }

    /// A new cart without the given product.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.product.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Sum of all line subtotals.
    ///
    /// The currency is taken from the first line; an empty cart totals zero
    /// in the default currency.
    #[must_use]
    pub fn total(&self) -> Price {
        let currency = self
            .items
            .first()
            .map_or_else(Default::default, |item| item.product.price.currency_code);

        let amount = self.items.iter().map(|item| item.subtotal().amount).sum();
        Price::new(amount, currency)
    }

    /// Sanitize a cart loaded from untrusted storage.
    ///
    /// Drops zero-amount lines and collapses duplicate product IDs to the
    /// first occurrence, preserving order otherwise.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let mut seen: Vec<ProductId> = Vec::new();
        let items = self
            .items
            .into_iter()
            .filter(|item| {
                if item.amount == 0 || seen.contains(&item.product.id) {
                    return false;
                }
                seen.push(item.product.id);
                true
            })
            .collect();
        Self { items }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use copper_kettle_core::CurrencyCode;
    use rust_decimal::Decimal;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(cents, CurrencyCode::USD),
            image: format!("https://cdn.example.com/{id}.jpg"),
        }
    }

    #[test]
    fn test_with_amount_appends_new_line() {
        let cart = Cart::empty().with_amount(product(1, 1000), 1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(ProductId::new(1)), Some(1));
    }

    #[test]
    fn test_with_amount_updates_existing_line_in_place() {
        let cart = Cart::empty()
            .with_amount(product(1, 1000), 1)
            .with_amount(product(2, 500), 2)
            .with_amount(product(1, 1000), 4);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.amount_of(ProductId::new(1)), Some(4));
        // Insertion order is preserved across updates
        assert_eq!(cart.items()[0].product.id, ProductId::new(1));
    }

    #[test]
    fn test_with_amount_leaves_receiver_untouched() {
        let original = Cart::empty().with_amount(product(1, 1000), 1);
        let _updated = original.with_amount(product(1, 1000), 5);
        assert_eq!(original.amount_of(ProductId::new(1)), Some(1));
    }

    #[test]
    fn test_without_removes_exactly_one_line() {
        let cart = Cart::empty()
            .with_amount(product(1, 1000), 1)
            .with_amount(product(2, 500), 2)
            .without(ProductId::new(1));

        assert_eq!(cart.len(), 1);
        assert!(!cart.contains(ProductId::new(1)));
        assert!(cart.contains(ProductId::new(2)));
    }

    #[test]
    fn test_subtotal_and_total() {
        let cart = Cart::empty()
            .with_amount(product(1, 1000), 2) // $20.00
            .with_amount(product(2, 550), 3); // $16.50

        assert_eq!(cart.items()[0].subtotal().amount, Decimal::new(2000, 2));
        assert_eq!(cart.total().amount, Decimal::new(3650, 2));
        assert_eq!(cart.total().currency_code, CurrencyCode::USD);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(Cart::empty().total().amount, Decimal::ZERO);
    }

    #[test]
    fn test_serde_roundtrip_is_a_plain_array() {
        let cart = Cart::empty().with_amount(product(1, 1000), 2);
        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));

        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_line_item_serializes_flattened() {
        let cart = Cart::empty().with_amount(product(1, 1000), 2);
        let value = serde_json::to_value(&cart).unwrap();
        let line = &value[0];
        assert_eq!(line["id"], 1);
        assert_eq!(line["amount"], 2);
        assert!(line["title"].is_string());
    }

    #[test]
    fn test_sanitized_drops_zero_amounts_and_duplicates() {
        let json = serde_json::to_string(&vec![
            LineItem {
                product: product(1, 1000),
                amount: 2,
            },
            LineItem {
                product: product(2, 500),
                amount: 0,
            },
            LineItem {
                product: product(1, 1000),
                amount: 9,
            },
        ])
        .unwrap();

        let cart: Cart = serde_json::from_str(&json).unwrap();
        let cart = cart.sanitized();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(ProductId::new(1)), Some(2));
    }
}
