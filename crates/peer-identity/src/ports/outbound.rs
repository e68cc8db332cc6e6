//! # Driven Ports (Outbound SPI)
//!
//! These are the interfaces this subsystem **requires** the host application
//! to implement (or take from `adapters`).

use crate::domain::{
    KeyLocator, NetworkConfig, OverlayConfig, ResolutionError, Signature, SigningError,
};
use std::net::IpAddr;

/// Direct DNS lookups.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a resolver is shared by every
/// caller of the address resolver.
pub trait HostResolver: Send + Sync {
    /// Resolve `host` to its addresses.
    ///
    /// Failures carry the resolver's own message; it is forwarded to callers
    /// unchanged. An empty `Ok` vector is treated as "no such host".
    fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError>;
}

/// DNS lookups performed by the overlay proxy, so the query never leaves
/// the node in the clear.
pub trait ProxyResolver: Send + Sync {
    /// Resolve `host` through the proxy described by `proxy`.
    fn lookup_host(&self, proxy: &OverlayConfig, host: &str)
        -> Result<Vec<IpAddr>, ResolutionError>;
}

/// Message signing with keys held outside this subsystem.
///
/// Any `Err` is a total signing failure.
///
/// # Example Implementation
///
/// ```rust,ignore
/// struct HsmSigner { /* ... */ }
///
/// impl MessageSigner for HsmSigner {
///     fn sign_message(&self, key: KeyLocator, msg: &[u8], double_hash: bool)
///         -> Result<Signature, SigningError> {
///         // hash msg (once or twice) and ask the device to sign the digest
///         todo!()
///     }
///     // ...
/// }
/// ```
pub trait MessageSigner: Send + Sync {
    /// Sign `sha256(msg)` (or `sha256(sha256(msg))` with `double_hash`)
    /// using the key at `key_locator`.
    fn sign_message(
        &self,
        key_locator: KeyLocator,
        msg: &[u8],
        double_hash: bool,
    ) -> Result<Signature, SigningError>;

    /// Recoverable 65-byte signature with the node identity key.
    fn sign_message_compact(&self, msg: &[u8], double_hash: bool)
        -> Result<Vec<u8>, SigningError>;
}

/// Abstract interface for time-related operations.
///
/// Enables deterministic testing by injecting controllable time sources.
pub trait TimeSource: Send + Sync {
    /// Current Unix time in seconds.
    fn now_secs(&self) -> u64;
}

/// Abstract interface for configuration loading.
pub trait ConfigProvider: Send + Sync {
    /// Network selection, transport backend and default port.
    fn network_config(&self) -> NetworkConfig;

    /// Manually configured peer addresses, unresolved.
    fn peer_addresses(&self) -> Vec<String>;
}
