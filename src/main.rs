//! Brick Models Server - Main Entry Point

use brick_models::{
    http_transport::HttpTransportServer,
    logging::{init_logging, LogConfig},
    BrickError, Result, ServerConfig,
};

use clap::Parser;
use std::net::IpAddr;
use tracing::{error, info};

/// Brick models server configuration
#[derive(Parser, Debug)]
#[command(name = "brick-models-server")]
#[command(about = "Validates LEGO model submissions over HTTP")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Config {
    /// Address to bind
    #[arg(long, env = "BRICK_BIND", default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "BRICK_PORT", default_value_t = brick_models::config::DEFAULT_PORT)]
    port: u16,

    /// Instance tag reported in every response
    #[arg(long, env = "HOST_TAG", default_value = "")]
    host_tag: String,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Config {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind: self.bind,
            port: self.port,
            host_tag: self.host_tag.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logging(&LogConfig::from_env().debug(config.debug))
        .map_err(|e| BrickError::config(format!("Failed to initialize logging: {e}")))?;

    let server_config = config.server_config();

    info!(
        "🚀 Starting brick models server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let server = HttpTransportServer::new(server_config);
    if let Err(e) = server.start().await {
        error!(category = e.category(), "Server failed: {}", e);
        return Err(e);
    }

    Ok(())
}
