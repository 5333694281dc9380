//! Chain hash type for transaction and block identification.
//!
//! Provides a `Hash` type: a 32-byte array stored in wire (little-endian)
//! order and displayed as byte-reversed hex, matching the form explorers use
//! for transaction ids and block hashes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PrimitivesError;

/// Size of a Hash in bytes.
pub const HASH_SIZE: usize = 32;

/// Length of the display hex form of a Hash.
pub const HASH_STRING_SIZE: usize = HASH_SIZE * 2;

/// A 32-byte hash used for transaction ids and block hashes.
///
/// The fixed width guarantees the display form is always exactly
/// `HASH_STRING_SIZE` hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// The all-zero hash, referenced by coinbase inputs.
    pub const ZERO: Hash = Hash([0u8; HASH_SIZE]);

    /// Create a Hash from a raw 32-byte array in wire order.
    pub fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Create a Hash from a byte slice in wire order.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(Hash)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let arr: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| {
            PrimitivesError::InvalidHash(format!(
                "invalid hash length of {}, want {}",
                bytes.len(),
                HASH_SIZE
            ))
        })?;
        Ok(Hash(arr))
    }

    /// Create a Hash from its display (big-endian) hex form.
    ///
    /// The string must be exactly 64 hex characters; it is reversed into
    /// wire order.
    ///
    /// # Arguments
    /// * `hex_str` - The display hex string.
    ///
    /// # Returns
    /// `Ok(Hash)` on success, or an error for wrong length or bad hex.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.len() != HASH_STRING_SIZE {
            return Err(PrimitivesError::InvalidHash(format!(
                "hash string must be {} characters, got {}",
                HASH_STRING_SIZE,
                hex_str.len()
            )));
        }
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(hex_str, &mut bytes)?;
        bytes.reverse();
        Ok(Hash(bytes))
    }

    /// Access the bytes in wire order.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Check whether every byte of the hash is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_SIZE]
    }
}

/// Display the hash as byte-reversed hex (Bitcoin convention).
///
/// Wire bytes `[0x06, 0xe5, ...]` display as `"...e506"`.
impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        f.write_str(&hex::encode(reversed))
    }
}

impl FromStr for Hash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }
}

/// Serialize as display hex.
impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Genesis block hash in wire order.
    const MAIN_NET_GENESIS_HASH: Hash = Hash([
        0x6f, 0xe2, 0x8c, 0x0a, 0xb6, 0xf1, 0xb3, 0x72,
        0xc1, 0xa6, 0xa2, 0x46, 0xae, 0x63, 0xf7, 0x4f,
        0x93, 0x1e, 0x83, 0x65, 0xe1, 0x5a, 0x08, 0x9c,
        0x68, 0xd6, 0x19, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]);

    const GENESIS_HEX: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";

    #[test]
    fn test_display_reverses_bytes() {
        assert_eq!(MAIN_NET_GENESIS_HASH.to_string(), GENESIS_HEX);
    }

    #[test]
    fn test_from_hex_genesis() {
        let hash = Hash::from_hex(GENESIS_HEX).unwrap();
        assert_eq!(hash, MAIN_NET_GENESIS_HASH);
        assert_eq!(hash.as_bytes()[0], 0x6f);
    }

    #[test]
    fn test_zero_hash_renders_64_zeros() {
        let s = Hash::ZERO.to_string();
        assert_eq!(s.len(), HASH_STRING_SIZE);
        assert!(s.chars().all(|c| c == '0'));
        assert!(Hash::ZERO.is_zero());
        assert_eq!(Hash::default(), Hash::ZERO);
        assert!(!MAIN_NET_GENESIS_HASH.is_zero());
    }

    #[test]
    fn test_from_hex_rejects_short_and_long() {
        assert!(Hash::from_hex("19d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f").is_err());
        assert!(Hash::from_hex(&format!("{}00", GENESIS_HEX)).is_err());
        assert!(Hash::from_hex("").is_err());
    }

    #[test]
    fn test_from_hex_rejects_bad_chars() {
        let bad = format!("{}zz", &GENESIS_HEX[..62]);
        assert!(matches!(Hash::from_hex(&bad), Err(PrimitivesError::InvalidHex(_))));
    }

    #[test]
    fn test_from_bytes_length() {
        assert!(Hash::from_bytes(&[0u8; 31]).is_err());
        assert!(Hash::from_bytes(&[0u8; 33]).is_err());
        let hash = Hash::from_bytes(MAIN_NET_GENESIS_HASH.as_bytes()).unwrap();
        assert_eq!(hash, MAIN_NET_GENESIS_HASH);
    }

    #[test]
    fn test_from_str_matches_from_hex() {
        let parsed: Hash = GENESIS_HEX.parse().unwrap();
        assert_eq!(parsed, MAIN_NET_GENESIS_HASH);
    }

    #[test]
    fn test_serde_as_display_hex() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            hash: Hash,
        }

        let json = serde_json::to_string(&Wrapper { hash: MAIN_NET_GENESIS_HASH }).unwrap();
        assert_eq!(json, format!(r#"{{"hash":"{}"}}"#, GENESIS_HEX));

        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hash, MAIN_NET_GENESIS_HASH);
    }
}
