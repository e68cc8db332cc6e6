use crate::adapters::{SocksProxyResolver, SystemDnsResolver};
use crate::domain::{
    has_onion_suffix, is_onion_host, split_host_port, AddressFormatError, NetworkEndpoint,
    OnionAddr, ResolutionError, ResolveError, TransportBackend, DEFAULT_PEER_PORT,
};
use crate::ports::{HostResolver, PeerAddressResolver, ProxyResolver};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

/// Turns peer address strings into dialable endpoints.
///
/// Literals never hit the network: onion names become onion endpoints under
/// any backend, IP literals become TCP endpoints directly. Only hostnames are
/// looked up, through DNS on clear-net or through the proxy on the overlay.
/// Malformed `.onion` names are rejected rather than looked up.
///
/// # Example
///
/// ```rust
/// use peer_identity::{AddressResolver, TransportBackend};
///
/// let resolver = AddressResolver::system();
/// let endpoint = resolver.resolve("127.0.0.1", &TransportBackend::ClearNet).unwrap();
/// assert_eq!(endpoint.to_string(), "127.0.0.1:9735");
/// ```
#[derive(Clone)]
pub struct AddressResolver {
    dns: Arc<dyn HostResolver>,
    proxy: Arc<dyn ProxyResolver>,
    default_port: u16,
}

impl AddressResolver {
    /// Create a resolver over the given lookup ports.
    pub fn new(dns: Arc<dyn HostResolver>, proxy: Arc<dyn ProxyResolver>) -> Self {
        Self {
            dns,
            proxy,
            default_port: DEFAULT_PEER_PORT,
        }
    }

    /// Resolver backed by the system DNS and a SOCKS5 overlay proxy.
    pub fn system() -> Self {
        Self::new(
            Arc::new(SystemDnsResolver::new()),
            Arc::new(SocksProxyResolver::new()),
        )
    }

    /// Override the port applied when an address omits one.
    #[must_use]
    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    /// Resolve one address literal.
    ///
    /// # Errors
    ///
    /// - `ResolveError::Format` for malformed input, including `.onion`
    ///   names that are not valid service names (no lookup attempted)
    /// - `ResolveError::Resolution` when a lookup fails or finds nothing;
    ///   the message is the resolver's own
    pub fn resolve(
        &self,
        address: &str,
        backend: &TransportBackend,
    ) -> Result<NetworkEndpoint, ResolveError> {
        let parsed = split_host_port(address)?;
        let port = parsed.port.unwrap_or(self.default_port);

        if is_onion_host(parsed.host) {
            let endpoint = NetworkEndpoint::Onion(OnionAddr::new(parsed.host, port));
            debug!(address, %endpoint, "parsed onion address");
            return Ok(endpoint);
        }
        if has_onion_suffix(parsed.host) {
            return Err(AddressFormatError::InvalidOnionHost(parsed.host.to_string()).into());
        }

        if let Some(ip) = parsed.ip() {
            return Ok(NetworkEndpoint::Tcp(SocketAddr::new(ip, port)));
        }

        let ips = match backend {
            TransportBackend::ClearNet => self.dns.lookup_host(parsed.host)?,
            TransportBackend::Overlay(proxy) => self.proxy.lookup_host(proxy, parsed.host)?,
        };
        let ip = ips
            .first()
            .copied()
            .ok_or_else(|| ResolutionError::no_such_host(parsed.host))?;

        let endpoint = NetworkEndpoint::Tcp(SocketAddr::new(ip, port));
        debug!(
            address,
            %endpoint,
            overlay = backend.is_overlay(),
            candidates = ips.len(),
            "resolved peer hostname"
        );
        Ok(endpoint)
    }

    /// Resolve a list of addresses, stopping at the first failure.
    pub fn resolve_all<S: AsRef<str>>(
        &self,
        addresses: &[S],
        backend: &TransportBackend,
    ) -> Result<Vec<NetworkEndpoint>, ResolveError> {
        addresses
            .iter()
            .map(|address| self.resolve(address.as_ref(), backend))
            .collect()
    }
}

impl PeerAddressResolver for AddressResolver {
    fn resolve(
        &self,
        address: &str,
        backend: &TransportBackend,
    ) -> Result<NetworkEndpoint, ResolveError> {
        AddressResolver::resolve(self, address, backend)
    }
}

impl std::fmt::Debug for AddressResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressResolver")
            .field("default_port", &self.default_port)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "runtime")]
mod deadline {
    use super::*;
    use std::time::Duration;
    use thiserror::Error;

    /// Failure of a deadline-bounded resolution.
    #[derive(Debug, Error)]
    pub enum DeadlineError {
        /// The resolution itself failed
        #[error(transparent)]
        Resolve(#[from] ResolveError),

        /// The deadline passed first; the blocking lookup is abandoned
        #[error("resolving {address} exceeded deadline of {deadline:?}")]
        Elapsed {
            /// Address being resolved
            address: String,
            /// Deadline that expired
            deadline: Duration,
        },

        /// The blocking task panicked or was cancelled
        #[error("resolution task failed: {0}")]
        Task(String),
    }

    impl AddressResolver {
        /// Run [`AddressResolver::resolve`] on tokio's blocking pool with a
        /// deadline.
        ///
        /// The lookup itself cannot be cancelled; on timeout the caller stops
        /// waiting and the blocking thread finishes in the background.
        pub async fn resolve_with_deadline(
            &self,
            address: &str,
            backend: &TransportBackend,
            deadline: Duration,
        ) -> Result<NetworkEndpoint, DeadlineError> {
            let resolver = self.clone();
            let owned_address = address.to_string();
            let backend = backend.clone();
            let task = tokio::task::spawn_blocking(move || resolver.resolve(&owned_address, &backend));

            match tokio::time::timeout(deadline, task).await {
                Ok(Ok(result)) => result.map_err(DeadlineError::from),
                Ok(Err(join_err)) => Err(DeadlineError::Task(join_err.to_string())),
                Err(_) => Err(DeadlineError::Elapsed {
                    address: address.to_string(),
                    deadline,
                }),
            }
        }
    }
}

#[cfg(feature = "runtime")]
pub use deadline::DeadlineError;
