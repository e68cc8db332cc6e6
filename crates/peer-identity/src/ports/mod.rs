//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** APIs this subsystem exposes to consumers
//! - **Driven Ports (Outbound):** SPIs this subsystem requires from adapters
//!
//! The signer, both resolvers and the clock are injected through these traits
//! so tests can substitute failing or deterministic implementations.

pub mod inbound;
pub mod outbound;

pub use inbound::{AnnouncementSource, PeerAddressResolver};
pub use outbound::{ConfigProvider, HostResolver, MessageSigner, ProxyResolver, TimeSource};
