//! Copper Kettle CLI - drive the cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of product 3 to the cart
//! ck-cli cart add 3
//!
//! # Set product 3 to exactly 5 units
//! ck-cli cart set 3 5
//!
//! # Remove product 3
//! ck-cli cart remove 3
//!
//! # Show the cart with line subtotals and the total
//! ck-cli cart show
//!
//! # Browse the catalog
//! ck-cli catalog list
//! ck-cli catalog show 3
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_BASE_URL` - Base URL of the product/stock catalog API
//! - `CART_STORAGE_DIR` - Directory for the durable cart slot (default: ./data)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ck-cli")]
#[command(author, version, about = "Copper Kettle cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product to the cart
    Add {
        /// Product ID
        product_id: i32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: i32,
    },
    /// Set a product's quantity to an exact amount
    Set {
        /// Product ID
        product_id: i32,

        /// New quantity (0 is ignored)
        amount: u32,
    },
    /// Show the cart contents
    Show,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all products in the catalog
    List,
    /// Show one product with its available stock
    Show {
        /// Product ID
        product_id: i32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add { product_id } => commands::cart::add(product_id).await?,
            CartAction::Remove { product_id } => commands::cart::remove(product_id)?,
            CartAction::Set { product_id, amount } => {
                commands::cart::set(product_id, amount).await?;
            }
            CartAction::Show => commands::cart::show()?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list().await?,
            CatalogAction::Show { product_id } => commands::catalog::show(product_id).await?,
        },
    }
    Ok(())
}
