use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered, growable sequence of bits.
///
/// Used both for the per-symbol codes in a code table and for whole encoded
/// payloads. Renders as `'0'`/`'1'` text, and serializes as that text so it
/// can sit inside JSON reports and binary table blocks alike. Packing to bytes
/// happens only at the container boundary.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new() -> Self {
        BitString::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        BitString {
            bits: Vec::with_capacity(bits),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Appends every bit of `other`, preserving order.
    pub fn extend_from(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn starts_with(&self, prefix: &BitString) -> bool {
        self.bits.starts_with(&prefix.bits)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({self})")
    }
}

/// A character other than `'0'` or `'1'` in bit text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseBitsError(char);

impl fmt::Display for ParseBitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid bit character {:?}", self.0)
    }
}

impl std::error::Error for ParseBitsError {}

impl FromStr for BitString {
    type Err = ParseBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = Vec::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                other => return Err(ParseBitsError(other)),
            }
        }
        Ok(BitString { bits })
    }
}

impl Serialize for BitString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BitString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BitsVisitor;

        impl Visitor<'_> for BitsVisitor {
            type Value = BitString;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string of '0' and '1' characters")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<BitString, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(BitsVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn text_roundtrip() {
        let bits: BitString = "101111000".parse().unwrap();
        assert_eq!(bits.len(), 9);
        assert_eq!(bits.to_string(), "101111000");
        assert_eq!(bits.get(0), Some(true));
        assert_eq!(bits.get(1), Some(false));
        assert_eq!(bits.get(9), None);
    }

    #[test]
    fn rejects_foreign_characters() {
        assert_eq!("0102".parse::<BitString>(), Err(ParseBitsError('2')));
    }

    #[test]
    fn extend_concatenates_in_order() {
        let mut bits: BitString = "10".parse().unwrap();
        let tail: BitString = "01".parse().unwrap();
        bits.extend_from(&tail);
        assert_eq!(bits.to_string(), "1001");
    }

    #[test]
    fn serde_uses_the_text_form() {
        let bits: BitString = "0101".parse().unwrap();
        let json = serde_json::to_string(&bits).unwrap();
        assert_eq!(json, "\"0101\"");
        let back: BitString = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bits);
    }
}
