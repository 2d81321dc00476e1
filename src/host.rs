//! Host identifier for responses
//!
//! Each response carries `tag: <HOST_TAG> - <address>` so that a caller
//! hitting several replicas behind a balancer can tell them apart. The
//! address comes from resolving the machine's own hostname on every request;
//! a failed lookup is never an error and is reported as `unknown`.

use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

/// Placeholder used when the address cannot be resolved
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// Looks up the address this instance is reachable at
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Best-effort lookup; `None` on any failure
    async fn resolve(&self) -> Option<IpAddr>;
}

/// Resolves the local hostname through the system resolver.
///
/// IPv4 results are preferred, matching what a plain `gethostbyname` of the
/// hostname would return.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

#[async_trait]
impl AddressResolver for SystemResolver {
    async fn resolve(&self) -> Option<IpAddr> {
        let name = match hostname::get() {
            Ok(name) => name,
            Err(e) => {
                debug!("Failed to read hostname: {}", e);
                return None;
            }
        };
        let Some(name) = name.to_str().map(str::to_string) else {
            debug!("Hostname is not valid UTF-8");
            return None;
        };

        let addrs: Vec<IpAddr> = match tokio::net::lookup_host((name.as_str(), 0)).await {
            Ok(addrs) => addrs.map(|a| a.ip()).collect(),
            Err(e) => {
                debug!("Failed to resolve hostname '{}': {}", name, e);
                return None;
            }
        };

        addrs
            .iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
    }
}

/// Resolver with a fixed answer, for deployments that know their address
/// up front and for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedResolver(pub Option<IpAddr>);

#[async_trait]
impl AddressResolver for FixedResolver {
    async fn resolve(&self) -> Option<IpAddr> {
        self.0
    }
}

/// Builds the host identifier string for each request
#[derive(Clone)]
pub struct HostIdentity {
    tag: String,
    resolver: Arc<dyn AddressResolver>,
}

impl HostIdentity {
    pub fn new(tag: impl Into<String>, resolver: Arc<dyn AddressResolver>) -> Self {
        Self {
            tag: tag.into(),
            resolver,
        }
    }

    /// Identity backed by the system resolver
    pub fn system(tag: impl Into<String>) -> Self {
        Self::new(tag, Arc::new(SystemResolver))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Resolve the address (uncached) and format the identifier
    pub async fn identify(&self) -> String {
        let addr = self.resolver.resolve().await;
        Self::format(&self.tag, addr)
    }

    pub fn format(tag: &str, addr: Option<IpAddr>) -> String {
        match addr {
            Some(ip) => format!("tag: {tag} - {ip}"),
            None => format!("tag: {tag} - {UNKNOWN_ADDRESS}"),
        }
    }
}

impl std::fmt::Debug for HostIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostIdentity")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}
