//! # Node Announcements
//!
//! The signed record a node gossips about itself: identity key, reachable
//! addresses, alias, colour and feature bits, stamped with a timestamp that
//! only moves forward.
//!
//! ## Security Properties
//!
//! - Signed by the node identity key over `sha256(data_to_sign)`
//! - Timestamp ordering lets peers drop stale replays

// Semantic submodules
mod alias;
mod features;
mod record;
mod security;

// Re-export public API
pub use alias::{NodeAlias, RgbColor, NODE_ALIAS_LEN};
pub use features::FeatureVector;
pub use record::{NodeAnnouncement, NodeAnnouncementConfig};
pub use security::{KeyLocator, PublicKey, Signature, NODE_KEY_FAMILY};

#[cfg(test)]
mod tests;
