//! Feature-bit vector advertised in node announcements.

use std::collections::BTreeSet;

/// Set of feature bits.
///
/// Encoded big-endian: bit `i` lives in byte `len - 1 - i / 8` under mask
/// `1 << (i % 8)`, with the shortest length that holds the highest set bit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FeatureVector {
    bits: BTreeSet<u16>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bits(bits: impl IntoIterator<Item = u16>) -> Self {
        Self {
            bits: bits.into_iter().collect(),
        }
    }

    pub fn set(&mut self, bit: u16) {
        self.bits.insert(bit);
    }

    pub fn unset(&mut self, bit: u16) {
        self.bits.remove(&bit);
    }

    pub fn is_set(&self, bit: u16) -> bool {
        self.bits.contains(&bit)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.bits.iter().copied()
    }

    /// Number of bytes needed by [`FeatureVector::encode`].
    pub fn serialized_len(&self) -> usize {
        self.bits
            .last()
            .map_or(0, |highest| usize::from(*highest) / 8 + 1)
    }

    pub fn encode(&self) -> Vec<u8> {
        let len = self.serialized_len();
        let mut bytes = vec![0u8; len];
        for bit in &self.bits {
            let bit = usize::from(*bit);
            bytes[len - 1 - bit / 8] |= 1 << (bit % 8);
        }
        bytes
    }
}
