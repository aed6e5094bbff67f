//! catalog-poller - Sequential product catalog poller
//!
//! Posts a fixed GraphQL product query for each configured SKU to the
//! retailer's catalog endpoint and reports the outcome of every request.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;

pub use catalog::{CatalogClient, CatalogFetch, CatalogResponse};
pub use commands::{PollCommand, PollReport, SkuOutcome};
pub use config::Config;
pub use error::CatalogError;
