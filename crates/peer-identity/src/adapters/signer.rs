//! In-process secp256k1 signer.
//!
//! SECURITY-CRITICAL: holds private keys in memory. `SigningKey` zeroizes on
//! drop; keys are never printed.

use crate::domain::{KeyLocator, PublicKey, Signature, SigningError};
use crate::ports::MessageSigner;
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature as EcdsaSignature, SigningKey};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Header byte offset for compact signatures over compressed keys.
const COMPACT_HEADER_COMPRESSED: u8 = 27 + 4;

/// Message signer over a fixed set of secp256k1 keys.
///
/// Signatures are RFC 6979 deterministic and low-S normalized.
pub struct KeyRingSigner {
    keys: HashMap<KeyLocator, SigningKey>,
    node_key: KeyLocator,
}

impl KeyRingSigner {
    /// Key ring holding only the node identity key at `KeyLocator::node_key()`.
    pub fn new(node_secret: [u8; 32]) -> Result<Self, SigningError> {
        let node_key = KeyLocator::node_key();
        let mut keys = HashMap::new();
        keys.insert(node_key, parse_secret(&node_secret)?);
        Ok(Self { keys, node_key })
    }

    /// Add another key.
    pub fn with_key(mut self, locator: KeyLocator, secret: [u8; 32]) -> Result<Self, SigningError> {
        self.keys.insert(locator, parse_secret(&secret)?);
        Ok(self)
    }

    pub fn public_key(&self, locator: KeyLocator) -> Option<PublicKey> {
        self.keys
            .get(&locator)
            .map(|key| PublicKey::from(key.verifying_key()))
    }

    pub fn node_public_key(&self) -> PublicKey {
        // The node key is inserted by the only constructor.
        self.public_key(self.node_key).unwrap_or_else(PublicKey::empty)
    }

    fn key(&self, locator: KeyLocator) -> Result<&SigningKey, SigningError> {
        self.keys
            .get(&locator)
            .ok_or_else(|| SigningError(format!("unknown key locator ({locator})")))
    }
}

impl MessageSigner for KeyRingSigner {
    fn sign_message(
        &self,
        key_locator: KeyLocator,
        msg: &[u8],
        double_hash: bool,
    ) -> Result<Signature, SigningError> {
        let key = self.key(key_locator)?;
        let sig: EcdsaSignature = key
            .sign_prehash(&digest(msg, double_hash))
            .map_err(|e| SigningError(format!("can't sign the message: {e}")))?;
        Ok(Signature::from(&sig))
    }

    fn sign_message_compact(&self, msg: &[u8], double_hash: bool) -> Result<Vec<u8>, SigningError> {
        let key = self.key(self.node_key)?;
        let (sig, recovery_id) = key
            .sign_prehash_recoverable(&digest(msg, double_hash))
            .map_err(|e| SigningError(format!("can't sign the message: {e}")))?;

        let mut compact = Vec::with_capacity(65);
        compact.push(COMPACT_HEADER_COMPRESSED + recovery_id.to_byte());
        compact.extend_from_slice(&sig.to_bytes());
        Ok(compact)
    }
}

impl std::fmt::Debug for KeyRingSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut locators: Vec<_> = self.keys.keys().collect();
        locators.sort();
        f.debug_struct("KeyRingSigner")
            .field("locators", &locators)
            .finish_non_exhaustive()
    }
}

fn parse_secret(secret: &[u8; 32]) -> Result<SigningKey, SigningError> {
    SigningKey::from_bytes(secret.into()).map_err(|_| SigningError::new("invalid private key"))
}

fn digest(msg: &[u8], double_hash: bool) -> [u8; 32] {
    let once: [u8; 32] = Sha256::digest(msg).into();
    if double_hash {
        Sha256::digest(once).into()
    } else {
        once
    }
}
