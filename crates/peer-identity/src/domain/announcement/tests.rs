//! Tests for node announcement records

use super::*;
use crate::domain::endpoint::{NetworkEndpoint, OnionAddr};
use crate::domain::errors::PayloadError;
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature as EcdsaSignature, SigningKey};
use sha2::{Digest, Sha256};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

fn make_key(byte: u8) -> SigningKey {
    SigningKey::from_bytes((&[byte; 32]).into()).unwrap()
}

fn make_announcement(key: &SigningKey) -> NodeAnnouncement {
    NodeAnnouncement::new_unsigned(NodeAnnouncementConfig {
        node_id: Some(PublicKey::from(key.verifying_key())),
        alias: NodeAlias::new("test-node").unwrap(),
        rgb_color: RgbColor::new(0x33, 0x99, 0xff),
        features: FeatureVector::from_bits([1, 5]),
        addresses: vec![NetworkEndpoint::Tcp("192.0.2.1:9735".parse().unwrap())],
        timestamp: 1_700_000_000,
    })
}

fn sign(key: &SigningKey, ann: &mut NodeAnnouncement) {
    let digest = Sha256::digest(ann.data_to_sign().unwrap());
    let sig: EcdsaSignature = key.sign_prehash(&digest).unwrap();
    ann.signature = Signature::from(&sig);
}

// =============================================================================
// TEST GROUP 1: Construction
// =============================================================================

#[test]
fn test_new_unsigned_has_empty_signature() {
    let ann = make_announcement(&make_key(1));
    assert!(!ann.is_signed());
    assert!(!ann.verify_signature());
}

#[test]
fn test_default_config_uses_empty_node_id() {
    let ann = NodeAnnouncement::new_unsigned(NodeAnnouncementConfig::default());
    assert_eq!(ann.node_id, PublicKey::empty());
    assert!(ann.addresses.is_empty());
}

// =============================================================================
// TEST GROUP 2: Signing payload
// =============================================================================

#[test]
fn test_payload_covers_every_field() {
    let base = make_announcement(&make_key(1));
    let payload = base.data_to_sign().unwrap();

    let mut changed = base.clone();
    changed.timestamp += 1;
    assert_ne!(changed.data_to_sign().unwrap(), payload);

    let mut changed = base.clone();
    changed.alias = NodeAlias::new("other").unwrap();
    assert_ne!(changed.data_to_sign().unwrap(), payload);

    let mut changed = base.clone();
    changed.features.set(7);
    assert_ne!(changed.data_to_sign().unwrap(), payload);

    let mut changed = base.clone();
    changed.rgb_color = RgbColor::default();
    assert_ne!(changed.data_to_sign().unwrap(), payload);

    let mut changed = base.clone();
    changed.addresses.push(NetworkEndpoint::Tcp("[2001:db8::1]:1234".parse().unwrap()));
    assert_ne!(changed.data_to_sign().unwrap(), payload);
}

#[test]
fn test_payload_excludes_signature() {
    let key = make_key(1);
    let mut ann = make_announcement(&key);
    let unsigned = ann.data_to_sign().unwrap();
    sign(&key, &mut ann);
    assert_eq!(ann.data_to_sign().unwrap(), unsigned);
}

#[test]
fn test_payload_encodes_onion_addresses() {
    let mut ann = make_announcement(&make_key(1));
    ann.addresses = vec![NetworkEndpoint::Onion(OnionAddr::new(
        "3g2upl4pq6kufc4m.onion",
        9735,
    ))];
    let payload = ann.data_to_sign().unwrap();
    // tag + 16 label bytes + port
    let tail = &payload[payload.len() - 19..];
    assert_eq!(tail[0], 3);
    assert_eq!(&tail[1..17], b"3g2upl4pq6kufc4m");
    assert_eq!(&tail[17..], &9735u16.to_be_bytes());
}

#[test]
fn test_oversized_address_list_is_rejected() {
    let mut ann = make_announcement(&make_key(1));
    // 19 bytes per IPv6 entry; 3450 entries overflow the u16 length prefix
    ann.addresses = (0..3450u16)
        .map(|i| NetworkEndpoint::Tcp(SocketAddr::new(IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, i)), 9735)))
        .collect();

    assert_eq!(ann.data_to_sign(), Err(PayloadError::AddressesTooLong(3450 * 19)));
    assert!(!ann.verify_signature());
}

#[test]
fn test_address_list_at_prefix_limit_encodes() {
    let mut ann = make_announcement(&make_key(1));
    // 7 bytes per IPv4 entry; 9362 entries fit in 65534 bytes
    ann.addresses = (0..9362u32)
        .map(|i| NetworkEndpoint::Tcp(SocketAddr::new(IpAddr::V4(Ipv4Addr::from(0x0a00_0000 + i)), 9735)))
        .collect();

    let payload = ann.data_to_sign().unwrap();
    let prefix_at = payload.len() - 9362 * 7 - 2;
    assert_eq!(&payload[prefix_at..prefix_at + 2], &65534u16.to_be_bytes());
}

// =============================================================================
// TEST GROUP 3: Verification
// =============================================================================

#[test]
fn test_signed_announcement_verifies() {
    let key = make_key(1);
    let mut ann = make_announcement(&key);
    sign(&key, &mut ann);

    assert!(ann.is_signed());
    assert!(ann.verify_signature());
}

#[test]
fn test_modified_announcement_fails_verification() {
    let key = make_key(1);
    let mut ann = make_announcement(&key);
    sign(&key, &mut ann);

    ann.alias = NodeAlias::new("impostor").unwrap();
    assert!(!ann.verify_signature());
}

#[test]
fn test_wrong_key_fails_verification() {
    let mut ann = make_announcement(&make_key(1));
    sign(&make_key(2), &mut ann);
    assert!(!ann.verify_signature());
}

#[test]
fn test_node_key_locator() {
    let loc = KeyLocator::node_key();
    assert_eq!(loc.family, NODE_KEY_FAMILY);
    assert_eq!(loc.index, 0);
    assert_eq!(loc.to_string(), "family=6 index=0");
}
