//! Fixed-width chain values: addresses and 32-byte words.
//!
//! Both render as lowercase `0x`-prefixed hex, which is also the form the
//! store and the query API expose.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IndexerError;

/// Decodes a `0x`-prefixed hex string into exactly `N` bytes.
fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], IndexerError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| IndexerError::Decode(format!("'{s}' is missing the 0x prefix")))?;
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out).map_err(|e| {
        IndexerError::Decode(format!("'{s}' is not a {N}-byte hex value: {e}"))
    })?;
    Ok(out)
}

/// A 20-byte account or contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = IndexerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed::<20>(s.trim()).map(Self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A 32-byte word: transaction hashes and access-control role identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bytes32([u8; 32]);

impl Bytes32 {
    /// Creates a word from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Bytes32 {
    type Err = IndexerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed::<32>(s.trim()).map(Self)
    }
}

impl Serialize for Bytes32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn address_display_is_lowercase_hex() {
        let mut bytes = [0u8; 20];
        bytes[19] = 0xAB;
        let addr = Address::from_bytes(bytes);
        assert_eq!(
            addr.to_string(),
            "0x00000000000000000000000000000000000000ab"
        );
    }

    #[test]
    fn address_parses_mixed_case() {
        let Ok(addr) = "0x1234567890ABCDEF1234567890abcdef12345678".parse::<Address>() else {
            panic!("valid address");
        };
        assert_eq!(
            addr.to_string(),
            "0x1234567890abcdef1234567890abcdef12345678"
        );
    }

    #[test]
    fn address_rejects_wrong_length_and_prefix() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("1234567890123456789012345678901234567890".parse::<Address>().is_err());
        assert!("0xzz34567890123456789012345678901234567890".parse::<Address>().is_err());
    }

    #[test]
    fn bytes32_serde_uses_hex_string() {
        let word = Bytes32::from_bytes([0x11; 32]);
        let json = serde_json::to_string(&word).unwrap_or_default();
        assert_eq!(json, format!("\"0x{}\"", "11".repeat(32)));

        let Ok(back) = serde_json::from_str::<Bytes32>(&json) else {
            panic!("deserialization failed");
        };
        assert_eq!(back, word);
    }

    #[test]
    fn bytes32_rejects_address_sized_input() {
        let json = "\"0x0000000000000000000000000000000000000001\"";
        assert!(serde_json::from_str::<Bytes32>(json).is_err());
    }
}
