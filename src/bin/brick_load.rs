//! Load generator for the brick models service
//!
//! Sends the same submission many times and prints how responses were
//! distributed across the instances that served them.

use brick_models::{
    load::{self, LoadConfig, LoadGenerator},
    logging::{init_logging, LogConfig},
    BrickError, Result,
};
use clap::Parser;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "brick-load")]
#[command(about = "Fire concurrent model submissions and report the host distribution")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Target endpoint
    #[arg(long, default_value = load::DEFAULT_URL)]
    url: String,

    /// Total requests to send
    #[arg(short = 'n', long, default_value_t = load::DEFAULT_TOTAL_REQUESTS)]
    requests: usize,

    /// Requests in flight at once
    #[arg(short, long, default_value_t = load::DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&LogConfig::from_env().debug(args.debug))
        .map_err(|e| BrickError::config(format!("Failed to initialize logging: {e}")))?;

    let generator = LoadGenerator::new(LoadConfig {
        url: args.url,
        total_requests: args.requests,
        concurrency: args.concurrency,
    })?;

    let report = match generator.run().await {
        Ok(report) => report,
        Err(e) => {
            error!(category = e.category(), "Load run failed: {}", e);
            return Err(e);
        }
    };
    print!("{}", report.render());

    Ok(())
}
