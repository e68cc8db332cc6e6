//! Domain Layer - Pure logic with no I/O
//!
//! This module contains:
//! - Network selection and transport backend description
//! - Address-literal parsing and typed endpoints (clear-net and onion)
//! - The peer bootstrap policy
//! - Node announcement records, keys and signatures

pub mod announcement;
pub mod bootstrap;
pub mod endpoint;
pub mod errors;
pub mod network;

pub use announcement::*;
pub use bootstrap::should_peer_bootstrap;
pub use endpoint::*;
pub use errors::*;
pub use network::*;
