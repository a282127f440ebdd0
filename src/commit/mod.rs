//! Commit-reveal для карт.
//!
//! Оператор при раздаче публикует только хэши `keccak256(card || key)`.
//! На шоудауне раскрываются карты и ключи, а леджер пересчитывает хэши и
//! сравнивает их с записанными. Несовпадение хотя бы одного бита отменяет
//! всю операцию: подменить карты после ставок нельзя.

pub mod digest;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::domain::CardCode;

pub use digest::{commitment_hash, keccak256, Digest, DigestParseError};
pub use store::{CardStore, CommunityCommitment, HoleCommitment, COMMUNITY_CARDS};

/// Пара хэшей карманных карт одного игрока (вход `deal_cards`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HoleHashes {
    pub hash1: Digest,
    pub hash2: Digest,
}

impl HoleHashes {
    /// Посчитать коммитмент двух карт под одним ключом.
    pub fn commit(cards: HoleCards, key: &Digest) -> Self {
        Self {
            hash1: commitment_hash(cards.card1, key),
            hash2: commitment_hash(cards.card2, key),
        }
    }
}

/// Открытые карманные карты (вход `showdown`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HoleCards {
    pub card1: CardCode,
    pub card2: CardCode,
}

impl HoleCards {
    pub fn new(card1: CardCode, card2: CardCode) -> Self {
        Self { card1, card2 }
    }
}

/// Раскрытие одной карты борда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommunityReveal {
    pub card: CardCode,
    pub key: Digest,
}

impl CommunityReveal {
    pub fn commitment(&self) -> Digest {
        commitment_hash(self.card, &self.key)
    }
}
