//! Configuration for the brick models server
//!
//! Values are supplied by the server binary's command line (with
//! `BRICK_BIND`, `BRICK_PORT` and `HOST_TAG` as environment fallbacks).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default listen port; the load generator targets it by default too
pub const DEFAULT_PORT: u16 = 8080;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind
    pub bind: IpAddr,

    /// Port to listen on
    pub port: u16,

    /// Instance tag embedded verbatim in every response's `host` field
    pub host_tag: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            host_tag: String::new(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
