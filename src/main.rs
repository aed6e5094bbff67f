//! catalog-poller - Sequential product catalog poller
//!
//! Queries the retailer's catalog GraphQL endpoint once per SKU and prints the outcome.

use anyhow::Result;
use catalog_poller::commands::PollCommand;
use catalog_poller::config::Config;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "catalog-poller",
    version,
    about = "Poll a retailer's product catalog endpoint for a list of SKUs",
    long_about = "Posts the product detail GraphQL query for each SKU, in order, pausing between requests."
)]
struct Cli {
    /// SKUs to poll (defaults to the configured list)
    skus: Vec<String>,

    /// Catalog GraphQL endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Pause after each request in milliseconds
    #[arg(long)]
    delay: Option<u64>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long)]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Applies command-line flags on top of file and environment settings.
fn apply_cli_overrides(mut config: Config, cli: Cli) -> Config {
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if !cli.skus.is_empty() {
        config.skus = cli.skus;
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Environment overrides are applied by Config::with_env only, never by clap.
    let config = Config::load(cli.config.as_deref())?.with_env();
    let config = apply_cli_overrides(config, cli);

    config.validate()?;

    PollCommand::new(config).execute().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "catalog-poller",
            "--delay",
            "10",
            "--endpoint",
            "http://localhost:9000/api/catalog",
            "BX8071514400",
            "912-V515-098",
        ])
        .unwrap();

        let config = apply_cli_overrides(Config::default(), cli);
        assert_eq!(config.delay_ms, 10);
        assert_eq!(config.endpoint, "http://localhost:9000/api/catalog");
        assert_eq!(config.skus, vec!["BX8071514400", "912-V515-098"]);
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_no_args_keeps_config() {
        let cli = Cli::try_parse_from(["catalog-poller"]).unwrap();
        let config = apply_cli_overrides(Config::default(), cli);
        assert_eq!(config.delay_ms, 5000);
        assert_eq!(config.skus.len(), 14);
    }

    #[test]
    fn test_invalid_env_delay_is_ignored() {
        let orig_delay = std::env::var("CATALOG_DELAY").ok();
        std::env::set_var("CATALOG_DELAY", "abc");

        let cli = Cli::try_parse_from(["catalog-poller"]);
        let config = Config::new().with_env();

        match orig_delay {
            Some(v) => std::env::set_var("CATALOG_DELAY", v),
            None => std::env::remove_var("CATALOG_DELAY"),
        }

        let cli = cli.unwrap();
        assert!(cli.delay.is_none());
        assert_eq!(apply_cli_overrides(config, cli).delay_ms, 5000);
    }
}
