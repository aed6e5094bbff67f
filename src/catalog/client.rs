//! HTTP client for the catalog GraphQL endpoint using wreq for browser emulation.

use crate::catalog::headers::{catalog_header_map, USER_AGENT};
use crate::catalog::query::ProductDetailRequest;
use crate::config::Config;
use crate::error::{CatalogError, Result};
use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;
use wreq::Client;
use wreq_util::Emulation;

/// Raw response of a successful (2xx) catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogResponse {
    pub status: u16,
    pub body: String,
}

impl CatalogResponse {
    /// Decodes the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.body).map_err(CatalogError::Decode)
    }
}

/// Trait for catalog lookups - enables mocking for tests.
#[async_trait]
pub trait CatalogFetch: Send + Sync {
    /// Posts the product detail query for one SKU.
    ///
    /// Non-2xx statuses are returned as [`CatalogError::Status`].
    async fn product_detail(&self, sku: &str) -> Result<CatalogResponse>;

    /// Returns the endpoint requests are sent to.
    fn endpoint(&self) -> &str;
}

/// Catalog HTTP client. One instance keeps one connection pool for the whole run.
pub struct CatalogClient {
    client: Client,
    endpoint: String,
}

impl CatalogClient {
    /// Creates a new client from the configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_endpoint(config, config.endpoint.clone())
    }

    /// Creates a new client pointed at a specific endpoint (for testing).
    pub fn with_endpoint(config: &Config, endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let mut builder = Client::builder().cookie_store(true).gzip(true).brotli(true);

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;
        debug!("Catalog client using user-agent: {}", USER_AGENT);

        Ok(Self { client, endpoint: endpoint.into() })
    }
}

#[async_trait]
impl CatalogFetch for CatalogClient {
    async fn product_detail(&self, sku: &str) -> Result<CatalogResponse> {
        let body = ProductDetailRequest::new(sku).to_json().map_err(CatalogError::Encode)?;

        debug!("POST {} (sku {})", self.endpoint, sku);

        // Fixed headers replace the emulation defaults rather than adding to them.
        let response = self
            .client
            .post(self.endpoint.as_str())
            .emulation(Emulation::Chrome131)
            .headers(catalog_header_map())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.text().await?;
        Ok(CatalogResponse { status: status.as_u16(), body })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
