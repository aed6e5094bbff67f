//! Catalog endpoint modules: HTTP client, headers, and the GraphQL request.

pub mod client;
pub mod headers;
pub mod query;

pub use client::{CatalogClient, CatalogFetch, CatalogResponse};
pub use query::ProductDetailRequest;
