//! HTTP transport for the brick models service
//!
//! Two routes: `GET /` returns a greeting and `POST /models` validates a
//! model submission. Every request is independent; the only shared state is
//! the read-only [`HostIdentity`].

pub mod handlers;
pub mod request_trace;

use crate::config::ServerConfig;
use crate::error::{BrickError, Result};
use crate::host::HostIdentity;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::info;

/// Application state shared across all HTTP handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Builds the `host` field of every response
    pub identity: HostIdentity,
}

/// Build the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/models", post(handlers::create_model))
        .layer(ServiceBuilder::new().layer(request_trace::trace_layer()))
        .with_state(state)
}

/// HTTP server
pub struct HttpTransportServer {
    config: ServerConfig,
    identity: HostIdentity,
}

impl HttpTransportServer {
    /// Server whose host identifier resolves through the system resolver
    pub fn new(config: ServerConfig) -> Self {
        let identity = HostIdentity::system(config.host_tag.clone());
        Self { config, identity }
    }

    /// Server with a caller-provided identity
    pub fn with_identity(config: ServerConfig, identity: HostIdentity) -> Self {
        Self { config, identity }
    }

    pub fn router(&self) -> Router {
        create_router(AppState {
            identity: self.identity.clone(),
        })
    }

    /// Bind the configured address
    pub async fn bind(&self) -> Result<TcpListener> {
        let addr = self.config.socket_addr();
        TcpListener::bind(addr)
            .await
            .map_err(|e| BrickError::server(format!("Failed to bind to {addr}: {e}")))
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(&self) -> Result<()> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` completes
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local: SocketAddr = listener.local_addr()?;

        info!("🌐 HTTP server listening on {}", local);
        info!("📬 Model endpoint: http://{}/models", local);
        info!("🏷️ Host tag: {:?}", self.identity.tag());

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| BrickError::server(format!("HTTP server error: {e}")))?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            tracing::warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
