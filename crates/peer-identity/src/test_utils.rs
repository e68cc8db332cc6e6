//! Test utilities for peer identity.
//!
//! Deterministic implementations of the outbound ports. Enable with the
//! `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust
//! use peer_identity::test_utils::FixedTimeSource;
//! use peer_identity::ports::TimeSource;
//!
//! let time_source = FixedTimeSource::new(1000);
//! assert_eq!(time_source.now_secs(), 1000);
//! time_source.advance(5);
//! assert_eq!(time_source.now_secs(), 1005);
//! ```

use crate::domain::{KeyLocator, OverlayConfig, ResolutionError, Signature, SigningError};
use crate::ports::{HostResolver, MessageSigner, ProxyResolver, TimeSource};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// A time source that returns a settable timestamp.
#[derive(Debug, Default)]
pub struct FixedTimeSource {
    timestamp: AtomicU64,
}

impl FixedTimeSource {
    /// Create a new fixed time source with the given timestamp (in seconds).
    pub fn new(timestamp: u64) -> Self {
        Self {
            timestamp: AtomicU64::new(timestamp),
        }
    }

    pub fn set(&self, timestamp: u64) {
        self.timestamp.store(timestamp, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.timestamp.fetch_add(secs, Ordering::SeqCst);
    }
}

impl TimeSource for FixedTimeSource {
    fn now_secs(&self) -> u64 {
        self.timestamp.load(Ordering::SeqCst)
    }
}

/// Host table lookups for both the DNS and the proxy port.
///
/// Unknown hosts fail with `lookup <host>: no such host`. Every call is
/// recorded so tests can assert which backend was consulted.
#[derive(Debug, Default)]
pub struct StaticHostResolver {
    hosts: HashMap<String, Result<Vec<IpAddr>, String>>,
    lookups: AtomicUsize,
    proxies: Mutex<Vec<OverlayConfig>>,
}

impl StaticHostResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_host(mut self, host: &str, ips: Vec<IpAddr>) -> Self {
        self.hosts.insert(host.to_string(), Ok(ips));
        self
    }

    /// Make lookups of `host` fail with exactly `message`.
    #[must_use]
    pub fn with_failure(mut self, host: &str, message: &str) -> Self {
        self.hosts.insert(host.to_string(), Err(message.to_string()));
        self
    }

    /// Total lookups, through either port.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Proxy configurations seen by `ProxyResolver::lookup_host`.
    pub fn proxies(&self) -> Vec<OverlayConfig> {
        self.proxies.lock().clone()
    }

    fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match self.hosts.get(host) {
            Some(Ok(ips)) => Ok(ips.clone()),
            Some(Err(message)) => Err(ResolutionError(message.clone())),
            None => Err(ResolutionError::no_such_host(host)),
        }
    }
}

impl HostResolver for StaticHostResolver {
    fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        self.lookup(host)
    }
}

impl ProxyResolver for StaticHostResolver {
    fn lookup_host(
        &self,
        proxy: &OverlayConfig,
        host: &str,
    ) -> Result<Vec<IpAddr>, ResolutionError> {
        self.proxies.lock().push(proxy.clone());
        self.lookup(host)
    }
}

/// Signer that always fails with the configured message.
#[derive(Debug, Clone)]
pub struct FailingSigner {
    message: String,
}

impl FailingSigner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingSigner {
    fn default() -> Self {
        Self::new("fail")
    }
}

impl MessageSigner for FailingSigner {
    fn sign_message(
        &self,
        _key_locator: KeyLocator,
        _msg: &[u8],
        _double_hash: bool,
    ) -> Result<Signature, SigningError> {
        Err(SigningError::new(self.message.clone()))
    }

    fn sign_message_compact(&self, _msg: &[u8], _double_hash: bool) -> Result<Vec<u8>, SigningError> {
        Err(SigningError::new(self.message.clone()))
    }
}
