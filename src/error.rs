//! Error taxonomy for catalog requests.

use thiserror::Error;

/// Errors raised while talking to the catalog endpoint.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Connection, TLS, or body read failure.
    #[error("request failed: {0}")]
    Request(#[from] wreq::Error),

    /// Endpoint answered with a non-2xx status.
    #[error("{status} error for url: {url}")]
    Status { status: u16, url: String },

    /// A 2xx response whose body is not valid JSON.
    #[error("invalid JSON in response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request envelope could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CatalogError {
    /// True for failures that are logged per SKU without stopping the run.
    pub fn is_request_error(&self) -> bool {
        matches!(self, CatalogError::Request(_) | CatalogError::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
