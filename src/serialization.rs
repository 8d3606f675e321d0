//! `serde` helpers for chain scalars.
//!
//! Big integers travel as base-10 strings so that 256-bit values survive
//! JSON consumers that parse numbers as `f64`. Decimals are strings for the
//! same reason.

/// `BigUint` as a base-10 string.
///
/// Deserialization also accepts `0x`-prefixed hex strings and non-negative
/// JSON integers, since decoders differ in how they render `uint256`.
pub mod uint {
    use std::fmt;

    use num_bigint::BigUint;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    /// Serializes a `BigUint` as a decimal string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    /// Deserializes a `BigUint` from a decimal string, hex string, or
    /// unsigned integer.
    ///
    /// # Errors
    ///
    /// Fails on negative numbers, floats, or non-numeric strings.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(UintVisitor)
    }

    /// Parses a decimal or `0x` hex string into a `BigUint`.
    #[must_use]
    pub fn parse(s: &str) -> Option<BigUint> {
        let s = s.trim();
        // `parse_bytes` tolerates `_` separators and a leading `+`.
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            BigUint::parse_bytes(hex.as_bytes(), 16)
        } else {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            BigUint::parse_bytes(s.as_bytes(), 10)
        }
    }

    struct UintVisitor;

    impl Visitor<'_> for UintVisitor {
        type Value = BigUint;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unsigned integer as a decimal string, 0x hex string, or number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigUint, E> {
            Ok(BigUint::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigUint, E> {
            u64::try_from(v)
                .map(BigUint::from)
                .map_err(|_| E::custom(format!("negative value {v} for unsigned integer")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<BigUint, E> {
            parse(v).ok_or_else(|| E::custom(format!("invalid unsigned integer '{v}'")))
        }
    }
}

/// `BigDecimal` as a string.
pub mod decimal {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes a `BigDecimal` with its `Display` form.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    /// Deserializes a `BigDecimal` from a string.
    ///
    /// # Errors
    ///
    /// Fails if the string is not a valid decimal.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BigDecimal::from_str(&s).map_err(serde::de::Error::custom)
    }
}
