//! The cart store: stock-validated mutations with durable persistence.
//!
//! [`CartStore`] owns the cart and its three collaborators. Every mutation
//! follows the same shape: look up what the catalog currently says, validate
//! the requested change, build the next cart value, persist it, and only
//! then replace the in-memory cart. Failures along the way surface as a
//! notification and leave both the in-memory cart and the slot exactly as
//! they were.
//!
//! Mutations take `&mut self`, so the borrow checker enforces single-writer
//! access; two operations can never interleave on one store.

use tracing::{instrument, warn};

use copper_kettle_core::ProductId;

use crate::cart::Cart;
use crate::catalog::ProductSource;
use crate::error::CartError;
use crate::notify::NotificationSink;
use crate::storage::StorageSlot;

/// Fixed namespaced key for the persisted cart.
pub const CART_SLOT_KEY: &str = "copper-kettle:cart";

const OUT_OF_STOCK: &str = "Requested quantity out of stock";
const ADD_FAILED: &str = "Failed to add product";
const REMOVE_FAILED: &str = "Failed to remove product";
const UPDATE_FAILED: &str = "Failed to update product quantity";

/// Cart state machine with stock validation and durable persistence.
///
/// Collaborators are explicit constructor parameters; there is no ambient
/// context. Public operations return `()` and report failures through the
/// notification sink, so callers only ever observe the cart snapshot.
pub struct CartStore<S, K, N> {
    catalog: S,
    slot: K,
    notifier: N,
    cart: Cart,
}

impl<S, K, N> CartStore<S, K, N>
where
    S: ProductSource,
    K: StorageSlot,
    N: NotificationSink,
{
    /// Create a store, loading the persisted cart from the slot.
    ///
    /// An absent slot yields an empty cart. Unreadable or malformed slot
    /// content also falls back to empty (with a warning) rather than
    /// failing construction; parsed content is sanitized so zero-amount
    /// lines and duplicate products never enter the store.
    pub fn new(catalog: S, slot: K, notifier: N) -> Self {
        let cart = load_cart(&slot);
        Self {
            catalog,
            slot,
            notifier,
            cart,
        }
    }

    /// Read-only snapshot of the current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a product to the cart.
    ///
    /// Increments the existing line's amount, or appends a new line with
    /// amount 1. Rejected with an out-of-stock notification when the target
    /// amount exceeds available stock; any lookup or persistence failure
    /// collapses to a generic failure notification. The cart is unchanged
    /// on every failure path.
    #[instrument(skip(self))]
    pub async fn add_product(&mut self, product_id: ProductId) {
        if let Err(e) = self.try_add_product(product_id).await {
            self.report(&e, ADD_FAILED);
        }
    }

    /// Remove a product's line from the cart.
    ///
    /// Removing a product that is not in the cart emits a failure
    /// notification and changes nothing.
    #[instrument(skip(self))]
    pub fn remove_product(&mut self, product_id: ProductId) {
        if let Err(e) = self.try_remove_product(product_id) {
            self.report(&e, REMOVE_FAILED);
        }
    }

    /// Set a product's quantity to exactly `amount`.
    ///
    /// A zero amount is a silent no-op: no notification, no persistence.
    /// Updating a product that is not in the cart, requesting more than the
    /// available stock, or failing the stock lookup all notify and leave
    /// the cart unchanged.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&mut self, product_id: ProductId, amount: u32) {
        if amount == 0 {
            return;
        }
        if let Err(e) = self.try_update_amount(product_id, amount).await {
            self.report(&e, UPDATE_FAILED);
        }
    }

    async fn try_add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        // Two independent lookups; details first, then stock
        let product = self.catalog.product(product_id).await?;
        let stock = self.catalog.stock(product_id).await?;

        let target = self.cart.amount_of(product_id).map_or(1, |amount| amount + 1);
        if target > stock.amount {
            return Err(CartError::OutOfStock {
                requested: target,
                available: stock.amount,
            });
        }

        let next = self.cart.with_amount(product, target);
        self.commit(next)
    }

    fn try_remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if !self.cart.contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }
        let next = self.cart.without(product_id);
        self.commit(next)
    }

    async fn try_update_amount(
        &mut self,
        product_id: ProductId,
        amount: u32,
    ) -> Result<(), CartError> {
        let Some(product) = self
            .cart
            .items()
            .iter()
            .find(|item| item.product.id == product_id)
            .map(|item| item.product.clone())
        else {
            return Err(CartError::NotFound(product_id));
        };

        let stock = self.catalog.stock(product_id).await?;
        if amount > stock.amount {
            return Err(CartError::OutOfStock {
                requested: amount,
                available: stock.amount,
            });
        }

        let next = self.cart.with_amount(product, amount);
        self.commit(next)
    }

    /// Persist `next`, then make it the current cart.
    ///
    /// Persist-before-replace means a failed write leaves the in-memory
    /// cart untouched; on success the slot and memory agree exactly.
    fn commit(&mut self, next: Cart) -> Result<(), CartError> {
        let json = serde_json::to_string(&next)?;
        self.slot.write(CART_SLOT_KEY, &json)?;
        self.cart = next;
        Ok(())
    }

    fn report(&self, error: &CartError, fallback: &str) {
        warn!(%error, "cart mutation rejected");
        let message = match error {
            CartError::OutOfStock { .. } => OUT_OF_STOCK,
            _ => fallback,
        };
        self.notifier.notify_error(message);
    }
}

/// Load and sanitize the persisted cart, falling back to empty.
fn load_cart<K: StorageSlot>(slot: &K) -> Cart {
    let raw = match slot.read(CART_SLOT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::empty(),
        Err(error) => {
            warn!(%error, "failed to read persisted cart, starting empty");
            return Cart::empty();
        }
    };

    match serde_json::from_str::<Cart>(&raw) {
        Ok(cart) => cart.sanitized(),
        Err(error) => {
            warn!(%error, "persisted cart is malformed, starting empty");
            Cart::empty()
        }
    }
}
