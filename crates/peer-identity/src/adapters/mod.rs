//! # Adapters
//!
//! Concrete implementations of the driven ports:
//! - `network`: DNS, SOCKS proxy, clock and configuration
//! - `signer`: in-process secp256k1 key ring

pub mod network;
pub mod signer;

pub use network::*;
pub use signer::KeyRingSigner;
