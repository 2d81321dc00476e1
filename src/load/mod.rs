//! Load generator
//!
//! Fires a fixed number of `POST /models` submissions at a target with a
//! bounded number in flight, and tallies the `host` field of every response
//! to show how a balancer in front of several instances spread the work.

pub mod distribution;

pub use distribution::HostDistribution;

use crate::error::{BrickError, Result};
use crate::models::{Difficulty, Item};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

pub const DEFAULT_URL: &str = "http://localhost:8080/models";
pub const DEFAULT_TOTAL_REQUESTS: usize = 20_000;
pub const DEFAULT_CONCURRENCY: usize = 10_000;

/// Key used for responses that carry no `host` string
pub const MISSING_HOST: &str = "unknown";

/// Load run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Target endpoint
    pub url: String,
    /// Requests to send in total
    pub total_requests: usize,
    /// Maximum requests in flight
    pub concurrency: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            total_requests: DEFAULT_TOTAL_REQUESTS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl LoadConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.url)
            .map_err(|e| BrickError::config(format!("Invalid target URL '{}': {e}", self.url)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(BrickError::config("Target URL must use http or https scheme"));
        }

        if self.concurrency == 0 {
            return Err(BrickError::config("Concurrency must be at least 1"));
        }

        if self.concurrency > Semaphore::MAX_PERMITS {
            return Err(BrickError::config(format!(
                "Concurrency must not exceed {}",
                Semaphore::MAX_PERMITS
            )));
        }

        Ok(())
    }
}

/// The submission every request sends
pub fn sample_item() -> Item {
    Item {
        name: "Starship Enterprise".to_string(),
        pieces: 1599,
        year: 2001,
        theme: "Sci-Fi".to_string(),
        difficulty: Difficulty::Easy,
        price_us: 199.99,
    }
}

/// Outcome of a load run
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Requests attempted
    pub requests_sent: usize,
    /// Requests that produced no parseable response
    pub failed: usize,
    /// Responses per host identifier, busiest first
    pub distribution: Vec<(String, u64)>,
    pub elapsed: Duration,
}

impl LoadReport {
    /// Requests that returned a parseable response
    pub fn completed(&self) -> u64 {
        self.distribution.iter().map(|(_, count)| count).sum()
    }

    /// Human readable summary
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n Current host distribution:")?;
        for (host, count) in &self.distribution {
            writeln!(f, "    - {host}: {count}")?;
        }
        writeln!(f, "\n Load Balancer Host Distribution ")?;
        writeln!(f, "    - total request sent {}", self.requests_sent)?;
        writeln!(f, "    - total request completed {}", self.completed())
    }
}

/// Drives a load run against one target
pub struct LoadGenerator {
    config: LoadConfig,
    client: reqwest::Client,
}

impl LoadGenerator {
    pub fn new(config: LoadConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self { config, client })
    }

    /// Send every request and collect the distribution
    pub async fn run(&self) -> Result<LoadReport> {
        let started = Instant::now();
        let distribution = Arc::new(HostDistribution::new());
        let failed = Arc::new(AtomicUsize::new(0));
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let payload = Arc::new(sample_item());
        let url: Arc<str> = Arc::from(self.config.url.as_str());
        let mut join_set = JoinSet::new();

        info!(
            "🚀 Sending {} requests to {} ({} concurrent)",
            self.config.total_requests, self.config.url, self.config.concurrency
        );

        for i in 0..self.config.total_requests {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| BrickError::load_run(format!("Worker pool closed: {e}")))?;
            let client = self.client.clone();
            let url = url.clone();
            let payload = payload.clone();
            let distribution = distribution.clone();
            let failed = failed.clone();

            join_set.spawn(async move {
                let _permit = permit;
                match send_request(&client, &url, &payload).await {
                    Ok(host) => distribution.record(&host),
                    Err(e) => {
                        warn!("Request {} failed: {}", i, e);
                        failed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }

        while let Some(joined) = join_set.join_next().await {
            if let Err(e) = joined {
                warn!("Request task aborted: {}", e);
                failed.fetch_add(1, Ordering::Relaxed);
            }
        }

        let report = LoadReport {
            requests_sent: self.config.total_requests,
            failed: failed.load(Ordering::Relaxed),
            distribution: distribution.snapshot(),
            elapsed: started.elapsed(),
        };

        info!(
            "✅ Load run finished in {:?}: {} completed, {} failed",
            report.elapsed,
            report.completed(),
            report.failed
        );

        Ok(report)
    }
}

/// Send one submission and return the responding host identifier.
///
/// Any parseable JSON response counts, including 400 rejections.
pub async fn send_request(client: &reqwest::Client, url: &str, item: &Item) -> Result<String> {
    let response = client.post(url).json(item).send().await?;
    let status = response.status();
    let body: serde_json::Value = response.json().await?;

    let host = body
        .get("host")
        .and_then(|h| h.as_str())
        .unwrap_or(MISSING_HOST)
        .to_string();

    debug!("{} from {}", status, host);
    Ok(host)
}
