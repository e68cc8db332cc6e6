use crate::domain::NetworkConfig;
use crate::ports::ConfigProvider;
use thiserror::Error;

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider with hardcoded values.
///
/// Useful for testing and embedding. For files, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: NetworkConfig,
    peers: Vec<String>,
}

impl StaticConfigProvider {
    /// Mainnet, clear-net, default port, no peers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: NetworkConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_peers(mut self, peers: Vec<String>) -> Self {
        self.peers = peers;
        self
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn network_config(&self) -> NetworkConfig {
        self.config.clone()
    }

    fn peer_addresses(&self) -> Vec<String> {
        self.peers.clone()
    }
}

/// Errors that can occur during config loading.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },

    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// More than one chain network flag set.
    #[error("the {0} params can't be used together -- choose one")]
    ConflictingNetworks(String),

    /// `tor.socks` is not a socket address.
    #[error("invalid tor.socks address {0:?}")]
    InvalidSocksAddress(String),
}

// ============================================================================
// TomlConfigProvider - File Config Loading (requires "config" feature)
// ============================================================================

#[cfg(feature = "config")]
mod toml_config {
    use super::*;
    use crate::domain::{NetworkSelection, OverlayConfig, TransportBackend, DEFAULT_PEER_PORT};
    use serde::Deserialize;
    use std::fs;
    use std::net::SocketAddr;
    use std::path::Path;
    use std::time::Duration;
    use tracing::debug;

    /// Configuration file structure.
    #[derive(Debug, Deserialize)]
    struct ConfigFile {
        #[serde(default)]
        no_net_bootstrap: bool,
        default_peer_port: Option<u16>,
        #[serde(default)]
        peers: Vec<String>,
        #[serde(default)]
        chain: ChainFile,
        #[serde(default)]
        tor: TorFile,
    }

    #[derive(Debug, Deserialize, Default)]
    struct ChainFile {
        #[serde(default)]
        mainnet: bool,
        #[serde(default)]
        testnet: bool,
        #[serde(default)]
        simnet: bool,
        #[serde(default)]
        regtest: bool,
        #[serde(default)]
        signet: bool,
    }

    #[derive(Debug, Deserialize, Default)]
    struct TorFile {
        #[serde(default)]
        active: bool,
        socks: Option<String>,
        timeout_secs: Option<u64>,
    }

    /// TOML-based configuration provider.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// no_net_bootstrap = false
    /// default_peer_port = 9735
    /// peers = ["127.0.0.1:9735", "example.com"]
    ///
    /// [chain]
    /// mainnet = true
    ///
    /// [tor]
    /// active = true
    /// socks = "127.0.0.1:9050"
    /// timeout_secs = 10
    /// ```
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        config: NetworkConfig,
        peers: Vec<String>,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if the file cannot be read, parsed or validated.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

            let selection = NetworkSelection {
                mainnet: file.chain.mainnet,
                testnet: file.chain.testnet,
                simnet: file.chain.simnet,
                regtest: file.chain.regtest,
                signet: file.chain.signet,
                no_auto_bootstrap: file.no_net_bootstrap,
            };
            // The bootstrap policy assumes at most one network; enforce it here.
            if let Err(networks) = selection.active() {
                let names: Vec<String> = networks.iter().map(ToString::to_string).collect();
                return Err(ConfigError::ConflictingNetworks(names.join(", ")));
            }

            let backend = if file.tor.active {
                let mut overlay = match file.tor.socks {
                    Some(socks) => OverlayConfig::new(
                        socks
                            .parse::<SocketAddr>()
                            .map_err(|_| ConfigError::InvalidSocksAddress(socks.clone()))?,
                    ),
                    None => OverlayConfig::default(),
                };
                if let Some(secs) = file.tor.timeout_secs {
                    overlay = overlay.with_timeout(Duration::from_secs(secs));
                }
                TransportBackend::Overlay(overlay)
            } else {
                TransportBackend::ClearNet
            };

            let config = NetworkConfig::new(selection, backend)
                .with_default_peer_port(file.default_peer_port.unwrap_or(DEFAULT_PEER_PORT));

            debug!(
                overlay = config.backend.is_overlay(),
                bootstrap = config.should_bootstrap(),
                peers = file.peers.len(),
                "loaded network configuration"
            );

            Ok(Self {
                config,
                peers: file.peers,
            })
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn network_config(&self) -> NetworkConfig {
            self.config.clone()
        }

        fn peer_addresses(&self) -> Vec<String> {
            self.peers.clone()
        }
    }
}

#[cfg(feature = "config")]
pub use toml_config::TomlConfigProvider;
