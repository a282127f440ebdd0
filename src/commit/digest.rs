use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha3::{Digest as _, Keccak256};
use thiserror::Error;

use crate::domain::CardCode;

/// 256-битный хэш (keccak-256).
#[derive(Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest(#[serde(with = "hex::serde")] pub [u8; 32]);

#[derive(Debug, Error, PartialEq)]
pub enum DigestParseError {
    #[error("некорректный hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl Digest {
    pub const ZERO: Digest = Digest([0u8; 32]);

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Digest(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

}

/// keccak-256 от произвольных байт.
pub fn keccak256(data: &[u8]) -> Digest {
    let out = Keccak256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&out);
    Digest(bytes)
}

/// Коммитмент карты: `keccak256(card || key)`, карта – один байт,
/// ключ – 32 байта. Раскладка совпадает с `abi.encodePacked(uint8, bytes32)`.
pub fn commitment_hash(card: CardCode, key: &Digest) -> Digest {
    let mut hasher = Keccak256::new();
    hasher.update([card.0]);
    hasher.update(key.0);
    let out = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&out);
    Digest(bytes)
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

impl FromStr for Digest {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(raw, &mut bytes)?;
        Ok(Digest(bytes))
    }
}
