//! Copper Kettle Cart - cart state management and catalog access.
//!
//! The centerpiece is [`CartStore`]: it owns an ordered sequence of cart
//! line items, validates every mutation against authoritative stock data,
//! persists the cart to a durable slot after each successful change, and
//! surfaces failures through a notification sink instead of returning errors
//! to the caller.
//!
//! Collaborators are explicit constructor parameters rather than ambient
//! context, each behind a trait with one production implementation:
//!
//! - [`ProductSource`] / [`CatalogClient`] - product and stock lookups over
//!   the catalog's REST API
//! - [`StorageSlot`] / [`FileSlot`] - the durable key-value slot holding the
//!   serialized cart
//! - [`NotificationSink`] / [`TracingSink`] - fire-and-forget user-visible
//!   error messages
//!
//! # Example
//!
//! ```rust,ignore
//! use copper_kettle_cart::{CartConfig, CartStore, CatalogClient, FileSlot, TracingSink};
//! use copper_kettle_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let catalog = CatalogClient::new(&config.catalog)?;
//! let slot = FileSlot::new(&config.storage_dir);
//!
//! let mut store = CartStore::new(catalog, slot, TracingSink);
//! store.add_product(ProductId::new(1)).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;
pub mod store;

pub use cart::{Cart, LineItem, Product, Stock};
pub use catalog::{CatalogClient, CatalogError, ProductSource};
pub use config::{CartConfig, CatalogConfig, ConfigError};
pub use error::CartError;
pub use notify::{NotificationSink, TracingSink};
pub use storage::{FileSlot, SlotError, StorageSlot};
pub use store::CartStore;
