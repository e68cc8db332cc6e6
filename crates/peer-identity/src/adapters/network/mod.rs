//! # Network Adapters
//!
//! Production implementations of the lookup, clock and configuration ports.
//!
//! ## Adapters Provided
//!
//! - `SystemDnsResolver` - clear-net DNS through the OS resolver
//! - `SocksProxyResolver` - overlay DNS through a SOCKS5 proxy (Tor RESOLVE)
//! - `SystemTimeSource` - system clock
//! - `StaticConfigProvider` - in-memory configuration
//! - `TomlConfigProvider` - config file loading (requires "config" feature)

// Semantic submodules
/// Configuration providers
pub mod config;
/// Clear-net DNS
pub mod dns;
/// Overlay DNS
pub mod socks;
/// Time source adapters
pub mod time;

// Re-export public API
pub use config::{ConfigError, StaticConfigProvider};
pub use dns::SystemDnsResolver;
pub use socks::SocksProxyResolver;
pub use time::SystemTimeSource;

#[cfg(feature = "config")]
pub use config::TomlConfigProvider;
