//! # Driving Ports (Inbound API)
//!
//! APIs this subsystem exposes to the rest of the node.

use crate::domain::{NetworkEndpoint, NodeAnnouncement, ResolveError, TransportBackend};
use std::sync::Arc;

/// Resolution of configured peer address strings.
///
/// Consumed by the connection manager before dialing.
pub trait PeerAddressResolver {
    /// Turn `address` into a dialable endpoint using `backend` for lookups.
    fn resolve(&self, address: &str, backend: &TransportBackend)
        -> Result<NetworkEndpoint, ResolveError>;
}

/// Read side of the node announcement, consumed by gossip/broadcast.
pub trait AnnouncementSource {
    /// Snapshot of the committed announcement.
    ///
    /// Never a partially written value; the snapshot stays valid after later
    /// regenerations replace the committed one.
    fn current_announcement(&self) -> Arc<NodeAnnouncement>;
}
