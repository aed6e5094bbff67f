//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::catalog::headers::DEFAULT_ENDPOINT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// SKUs polled when no list is configured.
pub const DEFAULT_SKUS: &[&str] = &[
    "PCM-Pichau-Gamer-50695",
    "100-100000927BOX",
    "BX8071514400",
    "BX8071514100",
    "100-100001488BOX",
    "100-100001503WOF",
    "BX8071512400F-BR",
    "CMK16GX4M2D3000C16",
    "CMW16GX4M2D3600C18W",
    "CMT16GX4M2D3600C18W",
    "GV-N4060WF2OC-8GD",
    "GV-N406TWF2OC-8GD",
    "VCG40608DFXPB1-O",
    "912-V515-098",
];

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog GraphQL endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// SKUs to poll, in order
    #[serde(default = "default_skus")]
    pub skus: Vec<String>,

    /// Pause after each SKU in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to the pause (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_skus() -> Vec<String> {
    DEFAULT_SKUS.iter().map(|s| s.to_string()).collect()
}

fn default_delay_ms() -> u64 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            skus: default_skus(),
            delay_ms: default_delay_ms(),
            delay_jitter_ms: 0,
            proxy: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("catalog-poller.toml");
        if local_config.exists() {
            debug!("Found catalog-poller.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("catalog-poller").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparseable values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("CATALOG_ENDPOINT") {
            self.endpoint = endpoint;
        }

        if let Ok(proxy) = std::env::var("CATALOG_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("CATALOG_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        self
    }

    /// Checks that the endpoint is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            anyhow::bail!("Catalog endpoint must not be empty");
        }
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            anyhow::bail!("Catalog endpoint must be an http(s) URL, got: {}", endpoint);
        }
        Ok(())
    }

    /// Fixed part of the pause taken after each SKU.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}
