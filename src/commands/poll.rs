//! Catalog poll command: one request per SKU, in order, with a pause after each.

use crate::catalog::{CatalogClient, CatalogFetch};
use crate::config::Config;
use anyhow::{Context, Result};
use rand::Rng;
use std::fmt;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of polling a single SKU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkuOutcome {
    Success { sku: String, status: u16 },
    Failed { sku: String, error: String },
}

impl SkuOutcome {
    pub fn sku(&self) -> &str {
        match self {
            SkuOutcome::Success { sku, .. } | SkuOutcome::Failed { sku, .. } => sku,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SkuOutcome::Success { .. })
    }
}

impl fmt::Display for SkuOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkuOutcome::Success { sku, status } => {
                write!(f, "Success for SKU {}: {}", sku, status)
            }
            SkuOutcome::Failed { sku, error } => {
                write!(f, "Request error for SKU {}: {}", sku, error)
            }
        }
    }
}

/// Outcomes of a full run, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    pub outcomes: Vec<SkuOutcome>,
}

impl PollReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Polls every configured SKU against the catalog endpoint.
pub struct PollCommand {
    config: Config,
}

impl PollCommand {
    /// Creates a new poll command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the poll against the configured endpoint, printing one line per SKU to stdout.
    pub async fn execute(&self) -> Result<PollReport> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, &mut std::io::stdout()).await
    }

    /// Runs the poll with a provided client and output sink (for testing).
    ///
    /// Request errors are reported and skipped. A 2xx response whose body is
    /// not JSON aborts the run after its success line has been written.
    pub async fn execute_with_client<W: Write>(
        &self,
        client: &impl CatalogFetch,
        out: &mut W,
    ) -> Result<PollReport> {
        let mut report = PollReport::default();

        if self.config.skus.is_empty() {
            debug!("No SKUs configured, nothing to poll");
            return Ok(report);
        }

        info!("Polling {} SKUs against {}", self.config.skus.len(), client.endpoint());

        for sku in &self.config.skus {
            let outcome = match client.product_detail(sku).await {
                Ok(response) => {
                    let outcome = SkuOutcome::Success { sku: sku.clone(), status: response.status };
                    writeln!(out, "{}", outcome)?;

                    // Payload is decoded but not used.
                    response
                        .json()
                        .with_context(|| format!("Failed to decode response for SKU {}", sku))?;
                    debug!("SKU {} returned {} bytes of JSON", sku, response.body.len());
                    outcome
                }
                Err(e) if e.is_request_error() => {
                    warn!("Request for SKU {} failed: {}", sku, e);
                    let outcome = SkuOutcome::Failed { sku: sku.clone(), error: e.to_string() };
                    writeln!(out, "{}", outcome)?;
                    outcome
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to poll SKU {}", sku));
                }
            };

            report.outcomes.push(outcome);
            self.pause().await;
        }

        info!("Poll finished: {} succeeded, {} failed", report.succeeded(), report.failed());
        Ok(report)
    }

    /// Pause length for one gap: fixed delay plus optional jitter.
    fn pause_duration(&self) -> Duration {
        let jitter = if self.config.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.config.delay_jitter_ms)
        } else {
            0
        };

        self.config.delay() + Duration::from_millis(jitter)
    }

    async fn pause(&self) {
        let pause = self.pause_duration();
        if pause.is_zero() {
            return;
        }

        debug!("Pausing {}ms", pause.as_millis());
        tokio::time::sleep(pause).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogResponse;
    use crate::error::CatalogError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Clone)]
    enum Reply {
        Ok(&'static str),
        Status(u16),
    }

    /// Mock catalog client recording every requested SKU.
    struct MockCatalogClient {
        replies: HashMap<String, Reply>,
        default: Reply,
        calls: Mutex<Vec<String>>,
    }

    impl MockCatalogClient {
        fn new(default: Reply) -> Self {
            Self { replies: HashMap::new(), default, calls: Mutex::new(Vec::new()) }
        }

        fn with_reply(mut self, sku: &str, reply: Reply) -> Self {
            self.replies.insert(sku.to_string(), reply);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogFetch for MockCatalogClient {
        async fn product_detail(&self, sku: &str) -> crate::error::Result<CatalogResponse> {
            self.calls.lock().unwrap().push(sku.to_string());
            match self.replies.get(sku).unwrap_or(&self.default) {
                Reply::Ok(body) => Ok(CatalogResponse { status: 200, body: body.to_string() }),
                Reply::Status(status) => Err(CatalogError::Status {
                    status: *status,
                    url: "http://mock/api/catalog".to_string(),
                }),
            }
        }

        fn endpoint(&self) -> &str {
            "http://mock/api/catalog"
        }
    }

    fn make_test_config(skus: &[&str]) -> Config {
        Config {
            skus: skus.iter().map(|s| s.to_string()).collect(),
            delay_ms: 0,
            ..Config::default()
        }
    }

    fn lines(out: &[u8]) -> Vec<String> {
        String::from_utf8(out.to_vec()).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn test_outcome_display() {
        let ok = SkuOutcome::Success { sku: "BX8071514400".into(), status: 200 };
        assert_eq!(ok.to_string(), "Success for SKU BX8071514400: 200");

        let failed = SkuOutcome::Failed { sku: "BX8071514400".into(), error: "boom".into() };
        assert_eq!(failed.to_string(), "Request error for SKU BX8071514400: boom");
    }

    #[tokio::test]
    async fn test_requests_in_list_order() {
        let client = MockCatalogClient::new(Reply::Ok("{}"));
        let cmd = PollCommand::new(make_test_config(&["A", "B", "C"]));
        let mut out = Vec::new();

        let report = cmd.execute_with_client(&client, &mut out).await.unwrap();

        assert_eq!(client.calls(), vec!["A", "B", "C"]);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(
            lines(&out),
            vec!["Success for SKU A: 200", "Success for SKU B: 200", "Success for SKU C: 200"]
        );
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_run() {
        let client = MockCatalogClient::new(Reply::Ok("{}")).with_reply("B", Reply::Status(503));
        let cmd = PollCommand::new(make_test_config(&["A", "B", "C"]));
        let mut out = Vec::new();

        let report = cmd.execute_with_client(&client, &mut out).await.unwrap();

        assert_eq!(client.calls(), vec!["A", "B", "C"]);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);

        let lines = lines(&out);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Request error for SKU B: "));
        assert!(lines[1].contains("503"));
        assert_eq!(lines[2], "Success for SKU C: 200");
    }

    #[tokio::test]
    async fn test_empty_list_makes_no_requests() {
        let client = MockCatalogClient::new(Reply::Ok("{}"));
        let cmd = PollCommand::new(make_test_config(&[]));
        let mut out = Vec::new();

        let report = cmd.execute_with_client(&client, &mut out).await.unwrap();

        assert!(report.is_empty());
        assert!(client.calls().is_empty());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_duplicates_are_requested_twice() {
        let client = MockCatalogClient::new(Reply::Ok("{}"));
        let cmd = PollCommand::new(make_test_config(&["A", "A"]));
        let mut out = Vec::new();

        cmd.execute_with_client(&client, &mut out).await.unwrap();

        assert_eq!(client.calls(), vec!["A", "A"]);
        assert_eq!(lines(&out).len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_json_aborts_after_success_line() {
        let client = MockCatalogClient::new(Reply::Ok("{}")).with_reply("B", Reply::Ok("<html>"));
        let cmd = PollCommand::new(make_test_config(&["A", "B", "C"]));
        let mut out = Vec::new();

        let err = cmd.execute_with_client(&client, &mut out).await.unwrap_err();

        assert!(err.to_string().contains("Failed to decode response for SKU B"));
        assert_eq!(client.calls(), vec!["A", "B"]);
        assert_eq!(lines(&out), vec!["Success for SKU A: 200", "Success for SKU B: 200"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_after_every_sku() {
        let client = MockCatalogClient::new(Reply::Ok("{}")).with_reply("B", Reply::Status(404));
        let mut config = make_test_config(&["A", "B", "C"]);
        config.delay_ms = 5000;
        let cmd = PollCommand::new(config);
        let mut out = Vec::new();

        let start = tokio::time::Instant::now();
        cmd.execute_with_client(&client, &mut out).await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(15));
    }

    #[test]
    fn test_pause_duration_with_jitter() {
        let mut config = make_test_config(&[]);
        config.delay_ms = 100;
        config.delay_jitter_ms = 50;
        let cmd = PollCommand::new(config);

        for _ in 0..20 {
            let pause = cmd.pause_duration();
            assert!(pause >= Duration::from_millis(100));
            assert!(pause <= Duration::from_millis(150));
        }
    }

    #[test]
    fn test_pause_duration_fixed_by_default() {
        let cmd = PollCommand::new(Config::default());
        assert_eq!(cmd.pause_duration(), Duration::from_secs(5));
    }
}
