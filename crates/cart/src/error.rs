//! Cart error taxonomy.

use copper_kettle_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::storage::SlotError;

/// Errors that can occur during a cart mutation.
///
/// These never escape the store's public operations; they are translated
/// into user-visible notifications. The variants exist so the translation
/// (and the log line behind it) can distinguish a stock rejection from an
/// infrastructure failure.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested amount exceeds the currently available stock.
    #[error("requested {requested} but only {available} in stock")]
    OutOfStock { requested: u32, available: u32 },

    /// The product is not in the cart.
    #[error("product not in cart: {0}")]
    NotFound(ProductId),

    /// Product or stock lookup failed.
    #[error("catalog lookup failed: {0}")]
    Lookup(#[from] CatalogError),

    /// Writing the cart to the durable slot failed.
    #[error("cart persistence failed: {0}")]
    Storage(#[from] SlotError),

    /// Serializing the cart for persistence failed.
    #[error("cart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::OutOfStock {
            requested: 6,
            available: 5,
        };
        assert_eq!(err.to_string(), "requested 6 but only 5 in stock");

        let err = CartError::NotFound(ProductId::new(9));
        assert_eq!(err.to_string(), "product not in cart: 9");
    }

    #[test]
    fn test_lookup_error_wraps_catalog_error() {
        let err = CartError::from(CatalogError::NotFound(ProductId::new(3)));
        assert!(matches!(err, CartError::Lookup(_)));
        assert_eq!(err.to_string(), "catalog lookup failed: Product not found: 3");
    }
}
