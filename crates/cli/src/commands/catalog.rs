//! Catalog browsing commands.

use copper_kettle_cart::{CartConfig, CatalogClient, CatalogError, ConfigError, ProductSource};
use copper_kettle_core::ProductId;
use thiserror::Error;

/// Errors that can occur while browsing the catalog.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    /// Configuration loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

fn client() -> Result<CatalogClient, CatalogCommandError> {
    let config = CartConfig::from_env()?;
    Ok(CatalogClient::new(&config.catalog)?)
}

/// List all products in the catalog.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), CatalogCommandError> {
    let client = client()?;
    let products = client.products().await?;

    for product in products {
        println!(
            "{:>6}  {:<32} {:>10}",
            product.id,
            product.title,
            product.price.display()
        );
    }
    Ok(())
}

/// Show one product with its available stock.
#[allow(clippy::print_stdout)]
pub async fn show(product_id: i32) -> Result<(), CatalogCommandError> {
    let client = client()?;
    let id = ProductId::new(product_id);

    let product = client.product(id).await?;
    let stock = client.stock(id).await?;

    println!("id:     {}", product.id);
    println!("title:  {}", product.title);
    println!("price:  {}", product.price.display());
    println!("image:  {}", product.image);
    println!("stock:  {}", stock.amount);
    Ok(())
}
