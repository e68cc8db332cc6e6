//! Node announcement record.

use super::alias::{NodeAlias, RgbColor};
use super::features::FeatureVector;
use super::security::{PublicKey, Signature};
use crate::domain::endpoint::{NetworkEndpoint, OnionAddr, ONION_SUFFIX};
use crate::domain::errors::PayloadError;
use std::net::SocketAddr;

/// Address type tags in the signed payload.
const ADDR_IPV4: u8 = 1;
const ADDR_IPV6: u8 = 2;
const ADDR_ONION_V2: u8 = 3;
const ADDR_ONION_V3: u8 = 4;

/// The node's signed self-announcement.
///
/// Committed values are never mutated: a new announcement is built, signed and
/// swapped in whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAnnouncement {
    /// Signature over [`NodeAnnouncement::data_to_sign`]
    pub signature: Signature,
    /// Advertised feature bits
    pub features: FeatureVector,
    /// Unix seconds; must increase for peers to accept a replacement
    pub timestamp: u32,
    /// Identity key of the announcing node
    pub node_id: PublicKey,
    pub rgb_color: RgbColor,
    pub alias: NodeAlias,
    /// Reachable addresses, in preference order
    pub addresses: Vec<NetworkEndpoint>,
}

/// Inputs for a fresh, unsigned announcement.
#[derive(Debug, Clone, Default)]
pub struct NodeAnnouncementConfig {
    pub node_id: Option<PublicKey>,
    pub alias: NodeAlias,
    pub rgb_color: RgbColor,
    pub features: FeatureVector,
    pub addresses: Vec<NetworkEndpoint>,
    pub timestamp: u32,
}

impl NodeAnnouncement {
    /// Create an unsigned announcement (startup state before the first sign).
    pub fn new_unsigned(config: NodeAnnouncementConfig) -> Self {
        Self {
            signature: Signature::empty(),
            features: config.features,
            timestamp: config.timestamp,
            node_id: config.node_id.unwrap_or_else(PublicKey::empty),
            rgb_color: config.rgb_color,
            alias: config.alias,
            addresses: config.addresses,
        }
    }

    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    /// Serialize every field except the signature.
    ///
    /// Layout: features (u16 length + bytes), timestamp (u32), node id (33),
    /// colour (3), alias (32), addresses (u16 length + tagged entries). All
    /// integers big-endian.
    ///
    /// # Errors
    ///
    /// Fails when the feature or address encoding does not fit its length
    /// prefix.
    pub fn data_to_sign(&self) -> Result<Vec<u8>, PayloadError> {
        let features = self.features.encode();
        let features_len = u16::try_from(features.len())
            .map_err(|_| PayloadError::FeaturesTooLong(features.len()))?;
        let addresses = encode_addresses(&self.addresses);
        let addresses_len = u16::try_from(addresses.len())
            .map_err(|_| PayloadError::AddressesTooLong(addresses.len()))?;

        let mut payload = Vec::with_capacity(2 + features.len() + 4 + 33 + 3 + 32 + 2 + addresses.len());
        payload.extend_from_slice(&features_len.to_be_bytes());
        payload.extend_from_slice(&features);
        payload.extend_from_slice(&self.timestamp.to_be_bytes());
        payload.extend_from_slice(self.node_id.as_bytes());
        payload.extend_from_slice(&self.rgb_color.to_bytes());
        payload.extend_from_slice(self.alias.as_bytes());
        payload.extend_from_slice(&addresses_len.to_be_bytes());
        payload.extend_from_slice(&addresses);
        Ok(payload)
    }

    /// Check the signature against `node_id`.
    pub fn verify_signature(&self) -> bool {
        if !self.is_signed() {
            return false;
        }
        self.data_to_sign()
            .is_ok_and(|payload| self.node_id.verify(&payload, &self.signature))
    }
}

fn encode_addresses(addresses: &[NetworkEndpoint]) -> Vec<u8> {
    let mut out = Vec::new();
    for address in addresses {
        match address {
            NetworkEndpoint::Tcp(SocketAddr::V4(v4)) => {
                out.push(ADDR_IPV4);
                out.extend_from_slice(&v4.ip().octets());
                out.extend_from_slice(&v4.port().to_be_bytes());
            }
            NetworkEndpoint::Tcp(SocketAddr::V6(v6)) => {
                out.push(ADDR_IPV6);
                out.extend_from_slice(&v6.ip().octets());
                out.extend_from_slice(&v6.port().to_be_bytes());
            }
            NetworkEndpoint::Onion(onion) => encode_onion(onion, &mut out),
        }
    }
    out
}

fn encode_onion(onion: &OnionAddr, out: &mut Vec<u8>) {
    let tag = if onion.is_v3() { ADDR_ONION_V3 } else { ADDR_ONION_V2 };
    let label = onion
        .service
        .strip_suffix(ONION_SUFFIX)
        .unwrap_or(&onion.service);
    out.push(tag);
    out.extend_from_slice(label.as_bytes());
    out.extend_from_slice(&onion.port.to_be_bytes());
}
