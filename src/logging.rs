//! Logging setup shared by the server and the load generator

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default level when `RUST_LOG` is not set
    pub level: Level,

    /// Ignore `RUST_LOG` and log at `level`
    pub force_level: bool,

    /// Emit JSON lines instead of the compact format
    pub json: bool,

    /// Include thread IDs
    pub thread_ids: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            force_level: false,
            json: false,
            thread_ids: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(json) = std::env::var("BRICK_LOG_JSON") {
            config.json = json.eq_ignore_ascii_case("true") || json == "1";
        }

        config
    }

    /// Force debug logging regardless of `RUST_LOG`
    pub fn debug(mut self, enabled: bool) -> Self {
        if enabled {
            self.level = Level::DEBUG;
            self.force_level = true;
        }
        self
    }

    fn filter(&self) -> EnvFilter {
        if self.force_level {
            EnvFilter::new(self.level.as_str().to_lowercase())
        } else {
            EnvFilter::builder()
                .with_default_directive(self.level.into())
                .from_env_lossy()
        }
    }
}

/// Initialize logging with the given configuration
pub fn init_logging(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = config.filter();

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_thread_ids(config.thread_ids),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_thread_ids(config.thread_ids),
            )
            .try_init()?;
    }

    Ok(())
}
