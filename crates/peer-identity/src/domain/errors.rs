//! Domain Errors for Peer Identity
//!
//! Three failure families cross the subsystem boundary:
//! - [`AddressFormatError`]: malformed address text, rejected before any I/O
//! - [`ResolutionError`]: DNS or proxy lookup failure, message kept verbatim
//! - [`SigningError`]: produced by the injected signer, propagated unchanged

use thiserror::Error;

/// Malformed peer address literal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressFormatError {
    /// Address string is empty or whitespace
    #[error("address is empty")]
    Empty,

    /// Opening `[` without a matching `]`, or garbage after the `]`
    #[error("malformed bracketed address: {0}")]
    MalformedBrackets(String),

    /// Port component is not a number in 0..=65535
    #[error("invalid port {port:?} in address {address}")]
    InvalidPort {
        /// Full address as supplied
        address: String,
        /// Offending port text
        port: String,
    },

    /// Host component is empty (e.g. `:9735`)
    #[error("missing host in address {0}")]
    MissingHost(String),

    /// Host ends in `.onion` but is not a valid v2 or v3 service name
    #[error("invalid onion service name {0:?}")]
    InvalidOnionHost(String),
}

/// A lookup failed or returned no addresses.
///
/// Displays the underlying resolver message exactly as it was produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ResolutionError(pub String);

impl ResolutionError {
    /// Error for a lookup that succeeded but returned zero addresses.
    pub fn no_such_host(host: &str) -> Self {
        Self(format!("lookup {host}: no such host"))
    }

    /// The wrapped resolver message.
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Any failure from `AddressResolver::resolve`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Input could not be parsed
    #[error(transparent)]
    Format(#[from] AddressFormatError),

    /// Lookup failed
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// Failure reported by a `MessageSigner`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct SigningError(pub String);

impl SigningError {
    /// Build from any displayable cause.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Announcement field too large for its `u16` length prefix.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("feature vector too long: {0} bytes")]
    FeaturesTooLong(usize),

    #[error("address list too long: {0} bytes")]
    AddressesTooLong(usize),
}

/// Invalid node alias.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AliasError {
    /// Alias exceeds the fixed 32-byte width
    #[error("node alias has too many bytes: {0} > 32")]
    TooLong(usize),

    /// Raw alias bytes are not UTF-8
    #[error("node alias is not valid utf-8")]
    InvalidUtf8,
}

/// Invalid `#rrggbb` colour string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("color must be specified using a hexadecimal value in the form #RRGGBB, got {0:?}")]
pub struct ColorError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_displays_message_verbatim() {
        let err = ResolutionError("lookup 500.0.0.0: no such host".to_string());
        assert_eq!(err.to_string(), "lookup 500.0.0.0: no such host");

        let wrapped: ResolveError = err.into();
        assert_eq!(wrapped.to_string(), "lookup 500.0.0.0: no such host");
    }

    #[test]
    fn test_no_such_host_message() {
        assert_eq!(
            ResolutionError::no_such_host("example.invalid").message(),
            "lookup example.invalid: no such host"
        );
    }

    #[test]
    fn test_signing_error_passthrough() {
        assert_eq!(SigningError::new("signing failed").to_string(), "signing failed");
    }
}
