//! Identity key material referenced by node announcements.
//!
//! SECURITY-CRITICAL: signature verification lives here.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{Signature as EcdsaSignature, VerifyingKey};
use sha2::{Digest, Sha256};

/// Key family of the node identity key.
pub const NODE_KEY_FAMILY: u32 = 6;

/// Opaque reference to a key held by the signer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyLocator {
    pub family: u32,
    pub index: u32,
}

impl KeyLocator {
    pub fn new(family: u32, index: u32) -> Self {
        Self { family, index }
    }

    /// Locator of the node identity key.
    pub fn node_key() -> Self {
        Self::new(NODE_KEY_FAMILY, 0)
    }
}

impl std::fmt::Display for KeyLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "family={} index={}", self.family, self.index)
    }
}

/// Compressed secp256k1 public key (33 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 33]);

impl PublicKey {
    pub fn new(bytes: [u8; 33]) -> Self {
        Self(bytes)
    }

    pub fn empty() -> Self {
        Self([0u8; 33])
    }

    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Verify a compact signature over `sha256(message)`.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(key) = VerifyingKey::from_sec1_bytes(&self.0) else {
            return false;
        };
        let Ok(sig) = EcdsaSignature::from_slice(&signature.0) else {
            return false;
        };
        let digest = Sha256::digest(message);
        key.verify_prehash(&digest, &sig).is_ok()
    }
}

impl From<&VerifyingKey> for PublicKey {
    fn from(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(point.as_bytes());
        Self(bytes)
    }
}

/// ECDSA signature in compact `r || s` form (64 bytes).
///
/// All zeroes marks an announcement that has never been signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    pub fn new(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn empty() -> Self {
        Self([0u8; 64])
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&EcdsaSignature> for Signature {
    fn from(sig: &EcdsaSignature) -> Self {
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&sig.to_bytes());
        Self(bytes)
    }
}
