//! Catalog API client for product and stock lookups.
//!
//! The catalog is the authoritative source for product details and available
//! stock. Lookups go through the [`ProductSource`] trait so the cart store
//! can be exercised against an in-memory source in tests.
//!
//! [`CatalogClient`] talks JSON over the catalog's REST endpoints:
//!
//! - `GET /products` - full product listing
//! - `GET /products/{id}` - one product
//! - `GET /stock/{id}` - available stock for one product
//!
//! Product lookups are cached via `moka` with a configurable TTL. Stock is
//! never cached: every validation call sees the catalog's current answer.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use copper_kettle_core::ProductId;

use crate::cart::{Product, Stock};
use crate::config::CatalogConfig;

/// Errors that can occur when interacting with the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Failed to parse a response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Source of product and stock data.
///
/// Implemented by [`CatalogClient`] for production; tests provide in-memory
/// implementations.
#[allow(async_fn_in_trait)]
pub trait ProductSource {
    /// Fetch product details by ID.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch the currently available stock for a product.
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError>;

    /// Fetch the full product listing.
    async fn products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Client for the catalog API.
///
/// Cheaply cloneable via `Arc`. Product responses are cached; stock
/// responses are not.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    product_cache: Cache<ProductId, Product>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the API token
    /// is not a valid header value.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let auth_value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&auth_value)
                .map_err(|e| CatalogError::Parse(format!("Invalid API token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert("Authorization", value);
        }

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        // moka rejects a zero TTL; one second is close enough to "disabled"
        let ttl = config.product_cache_ttl_secs.max(1);
        let product_cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(ttl))
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                product_cache,
            }),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    /// Execute a GET request and decode the JSON body.
    ///
    /// A 404 is reported as [`CatalogError::NotFound`] when the request was
    /// scoped to a single product.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        subject: Option<ProductId>,
    ) -> Result<T, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND
            && let Some(id) = subject
        {
            return Err(CatalogError::NotFound(id));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %message.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

impl ProductSource for CatalogClient {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.inner.product_cache.get(&id).await {
            debug!(%id, "product cache hit");
            return Ok(product);
        }

        let url = self.endpoint(&format!("products/{id}"));
        let product: Product = self.get_json(&url, Some(id)).await?;
        self.inner.product_cache.insert(id, product.clone()).await;
        Ok(product)
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        let url = self.endpoint(&format!("stock/{id}"));
        self.get_json(&url, Some(id)).await
    }

    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint("products");
        self.get_json(&url, None).await
    }
}
