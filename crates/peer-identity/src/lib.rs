//! # Peer Identity Subsystem
//!
//! How the node finds peers and how it presents itself to them:
//!
//! - **Address resolution:** peer address strings (`host`, `host:port`,
//!   `[v6]:port`, onion names) become dialable endpoints, through plain DNS
//!   on clear-net or through the overlay proxy so lookups never leak.
//! - **Bootstrap policy:** whether the node should discover peers on its own
//!   for the selected chain network.
//! - **Node announcement:** the signed, self-describing record gossiped to
//!   the network, regenerated transactionally so a signing failure never
//!   changes what is advertised.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** endpoints, network selection, announcement records
//! - **Ports Layer:** resolver, signer, clock and config traits
//! - **Service Layer:** [`AddressResolver`] and [`AnnouncementManager`]
//! - **Adapters Layer:** system DNS, SOCKS5 proxy, key-ring signer, TOML config
//!
//! ## Features
//!
//! - `config` - TOML configuration loading (serde, toml)
//! - `runtime` - deadline-bounded resolution on tokio
//! - `test-utils` - deterministic port implementations
//!
//! ## Example
//!
//! ```rust
//! use peer_identity::{
//!     should_peer_bootstrap, AddressResolver, ChainNetwork, NetworkSelection, TransportBackend,
//! };
//!
//! let selection = NetworkSelection::for_network(ChainNetwork::RegTest);
//! assert!(!should_peer_bootstrap(&selection));
//!
//! let resolver = AddressResolver::system();
//! let endpoint = resolver.resolve("[::1]:9736", &TransportBackend::ClearNet).unwrap();
//! assert_eq!(endpoint.to_string(), "[::1]:9736");
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Test utilities.
/// Requires feature: `test-utils`
#[cfg(feature = "test-utils")]
pub mod test_utils;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use domain::{
    should_peer_bootstrap, AddressFormatError, ChainNetwork, KeyLocator, NetworkConfig,
    NetworkEndpoint, NetworkSelection, NodeAlias, NodeAnnouncement, NodeAnnouncementConfig,
    OnionAddr, OverlayConfig, PayloadError, PublicKey, ResolutionError, ResolveError, RgbColor,
    Signature, SigningError, TransportBackend, DEFAULT_PEER_PORT,
};
pub use ports::{
    AnnouncementSource, ConfigProvider, HostResolver, MessageSigner, PeerAddressResolver,
    ProxyResolver, TimeSource,
};
pub use service::{AddressResolver, AnnouncementManager};

#[cfg(feature = "runtime")]
pub use service::DeadlineError;

pub use adapters::{KeyRingSigner, SocksProxyResolver, SystemDnsResolver, SystemTimeSource};
