//! Cart management commands.
//!
//! Each command wires up a fresh [`CartStore`] from environment
//! configuration, applies one mutation, and exits. The store persists the
//! cart to the durable slot, so state carries over between invocations.

use copper_kettle_cart::{
    CartConfig, CartStore, CatalogClient, CatalogError, ConfigError, FileSlot, NotificationSink,
};
use copper_kettle_core::ProductId;
use thiserror::Error;

/// Errors that can occur while setting up a cart command.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog client could not be constructed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Notification sink that prints to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    #[allow(clippy::print_stderr)]
    fn notify_error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

type Store = CartStore<CatalogClient, FileSlot, TerminalSink>;

fn open_store() -> Result<Store, CartCommandError> {
    let config = CartConfig::from_env()?;
    let catalog = CatalogClient::new(&config.catalog)?;
    let slot = FileSlot::new(&config.storage_dir);
    Ok(CartStore::new(catalog, slot, TerminalSink))
}

/// Add one unit of a product to the cart.
pub async fn add(product_id: i32) -> Result<(), CartCommandError> {
    let mut store = open_store()?;
    store.add_product(ProductId::new(product_id)).await;
    print_cart(&store);
    Ok(())
}

/// Remove a product from the cart.
pub fn remove(product_id: i32) -> Result<(), CartCommandError> {
    let mut store = open_store()?;
    store.remove_product(ProductId::new(product_id));
    print_cart(&store);
    Ok(())
}

/// Set a product's quantity to an exact amount.
pub async fn set(product_id: i32, amount: u32) -> Result<(), CartCommandError> {
    let mut store = open_store()?;
    store
        .update_product_amount(ProductId::new(product_id), amount)
        .await;
    print_cart(&store);
    Ok(())
}

/// Show the cart contents.
pub fn show() -> Result<(), CartCommandError> {
    let store = open_store()?;
    print_cart(&store);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_cart(store: &Store) {
    let cart = store.cart();
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in cart.items() {
        println!(
            "{:>6}  {:<32} x{:<3} {:>10} {:>10}",
            item.product.id,
            item.product.title,
            item.amount,
            item.product.price.display(),
            item.subtotal().display(),
        );
    }
    println!("{:>66}", format!("total {}", cart.total().display()));
}
