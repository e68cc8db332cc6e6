//! Human-facing announcement fields: alias and display colour.

use crate::domain::errors::{AliasError, ColorError};
use std::fmt;

/// Width of the alias field.
pub const NODE_ALIAS_LEN: usize = 32;

/// Fixed-width UTF-8 node alias, zero padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeAlias([u8; NODE_ALIAS_LEN]);

impl NodeAlias {
    /// Alias from a string of at most 32 bytes.
    pub fn new(alias: &str) -> Result<Self, AliasError> {
        let bytes = alias.as_bytes();
        if bytes.len() > NODE_ALIAS_LEN {
            return Err(AliasError::TooLong(bytes.len()));
        }
        let mut raw = [0u8; NODE_ALIAS_LEN];
        raw[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(raw))
    }

    /// Alias from its raw field, as received from a peer.
    pub fn from_bytes(raw: [u8; NODE_ALIAS_LEN]) -> Result<Self, AliasError> {
        let alias = Self(raw);
        std::str::from_utf8(alias.trimmed()).map_err(|_| AliasError::InvalidUtf8)?;
        Ok(alias)
    }

    pub fn as_bytes(&self) -> &[u8; NODE_ALIAS_LEN] {
        &self.0
    }

    /// Alias text without the zero padding.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.trimmed()).unwrap_or_default()
    }

    fn trimmed(&self) -> &[u8] {
        let end = self.0.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        &self.0[..end]
    }
}

impl fmt::Display for NodeAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node colour shown by explorers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse `#rrggbb` (either case).
    pub fn from_hex(color: &str) -> Result<Self, ColorError> {
        let err = || ColorError(color.to_string());
        let hex = color.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}
