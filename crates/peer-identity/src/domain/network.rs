//! Network selection and transport backend.
//!
//! `NetworkConfig` is the resolved view of which chain network is active and
//! how outbound lookups are routed. It is pure data; loading it from a file is
//! the job of a `ConfigProvider` adapter.

use std::net::SocketAddr;
use std::time::Duration;

/// Port used when a peer address omits one.
pub const DEFAULT_PEER_PORT: u16 = 9735;

/// Default Tor SOCKS listener.
pub const DEFAULT_SOCKS_PORT: u16 = 9050;

/// Chain networks a node can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainNetwork {
    /// Production network
    MainNet,
    /// Public test network
    TestNet,
    /// Local simulation network
    SimNet,
    /// Local regression-test network
    RegTest,
    /// Signed test network
    SigNet,
}

impl ChainNetwork {
    /// Developer networks have no public discovery infrastructure.
    pub fn is_dev_network(&self) -> bool {
        matches!(self, Self::SimNet | Self::RegTest | Self::SigNet)
    }
}

impl std::fmt::Display for ChainNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MainNet => write!(f, "mainnet"),
            Self::TestNet => write!(f, "testnet"),
            Self::SimNet => write!(f, "simnet"),
            Self::RegTest => write!(f, "regtest"),
            Self::SigNet => write!(f, "signet"),
        }
    }
}

/// Raw network-selection flags as they come out of configuration.
///
/// Valid configuration has at most one network flag set. The bootstrap policy
/// tolerates violations deterministically; [`NetworkSelection::active`] is the
/// strict check for callers that want to reject them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkSelection {
    pub mainnet: bool,
    pub testnet: bool,
    pub simnet: bool,
    pub regtest: bool,
    pub signet: bool,
    /// Operator override disabling automated peer discovery
    pub no_auto_bootstrap: bool,
}

impl NetworkSelection {
    /// Selection with exactly one network flag set.
    pub fn for_network(network: ChainNetwork) -> Self {
        let mut selection = Self::default();
        match network {
            ChainNetwork::MainNet => selection.mainnet = true,
            ChainNetwork::TestNet => selection.testnet = true,
            ChainNetwork::SimNet => selection.simnet = true,
            ChainNetwork::RegTest => selection.regtest = true,
            ChainNetwork::SigNet => selection.signet = true,
        }
        selection
    }

    /// Builder-style toggle for the bootstrap override.
    #[must_use]
    pub fn with_no_auto_bootstrap(mut self, disabled: bool) -> Self {
        self.no_auto_bootstrap = disabled;
        self
    }

    /// All set network flags, in declaration order.
    pub fn selected(&self) -> Vec<ChainNetwork> {
        [
            (self.mainnet, ChainNetwork::MainNet),
            (self.testnet, ChainNetwork::TestNet),
            (self.simnet, ChainNetwork::SimNet),
            (self.regtest, ChainNetwork::RegTest),
            (self.signet, ChainNetwork::SigNet),
        ]
        .into_iter()
        .filter_map(|(set, network)| set.then_some(network))
        .collect()
    }

    /// The single active network.
    ///
    /// Returns `Ok(None)` when no flag is set and `Err` with every selected
    /// network when more than one is.
    pub fn active(&self) -> Result<Option<ChainNetwork>, Vec<ChainNetwork>> {
        let selected = self.selected();
        match selected.as_slice() {
            [] => Ok(None),
            [network] => Ok(Some(*network)),
            _ => Err(selected),
        }
    }
}

/// Settings for reaching the overlay network through its SOCKS proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
    /// SOCKS5 listener of the overlay daemon
    pub socks_addr: SocketAddr,
    /// Connect/read/write timeout for a single proxy round trip
    pub timeout: Duration,
}

impl OverlayConfig {
    pub fn new(socks_addr: SocketAddr) -> Self {
        Self {
            socks_addr,
            timeout: Duration::from_secs(10),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], DEFAULT_SOCKS_PORT)))
    }
}

/// How hostnames are turned into IP addresses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransportBackend {
    /// Direct DNS and direct TCP
    #[default]
    ClearNet,
    /// Everything goes through the overlay proxy
    Overlay(OverlayConfig),
}

impl TransportBackend {
    pub fn is_overlay(&self) -> bool {
        matches!(self, Self::Overlay(_))
    }
}

/// Resolved network configuration shared by the resolver and bootstrap gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub selection: NetworkSelection,
    pub backend: TransportBackend,
    pub default_peer_port: u16,
}

impl NetworkConfig {
    pub fn new(selection: NetworkSelection, backend: TransportBackend) -> Self {
        Self {
            selection,
            backend,
            default_peer_port: DEFAULT_PEER_PORT,
        }
    }

    #[must_use]
    pub fn with_default_peer_port(mut self, port: u16) -> Self {
        self.default_peer_port = port;
        self
    }

    /// Whether automated peer discovery may start.
    pub fn should_bootstrap(&self) -> bool {
        super::bootstrap::should_peer_bootstrap(&self.selection)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new(
            NetworkSelection::for_network(ChainNetwork::MainNet),
            TransportBackend::ClearNet,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_single_network() {
        let selection = NetworkSelection::for_network(ChainNetwork::RegTest);
        assert_eq!(selection.active(), Ok(Some(ChainNetwork::RegTest)));
    }

    #[test]
    fn test_active_rejects_multiple_networks() {
        let selection = NetworkSelection {
            mainnet: true,
            simnet: true,
            ..Default::default()
        };
        assert_eq!(
            selection.active(),
            Err(vec![ChainNetwork::MainNet, ChainNetwork::SimNet])
        );
    }

    #[test]
    fn test_active_none_selected() {
        assert_eq!(NetworkSelection::default().active(), Ok(None));
    }

    #[test]
    fn test_dev_networks() {
        assert!(!ChainNetwork::MainNet.is_dev_network());
        assert!(!ChainNetwork::TestNet.is_dev_network());
        assert!(ChainNetwork::SimNet.is_dev_network());
        assert!(ChainNetwork::RegTest.is_dev_network());
        assert!(ChainNetwork::SigNet.is_dev_network());
    }

    #[test]
    fn test_overlay_config_defaults() {
        let config = OverlayConfig::default();
        assert_eq!(config.socks_addr.to_string(), "127.0.0.1:9050");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_network_config_defaults() {
        let config = NetworkConfig::default();
        assert_eq!(config.default_peer_port, DEFAULT_PEER_PORT);
        assert_eq!(config.backend, TransportBackend::ClearNet);
        assert!(config.should_bootstrap());
    }
}
