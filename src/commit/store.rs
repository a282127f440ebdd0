use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::commit::digest::{commitment_hash, Digest};
use crate::domain::{CardCode, PlayerId, TableId};
use crate::ledger::errors::LedgerError;

/// Количество общих карт на борде.
pub const COMMUNITY_CARDS: usize = 5;

/// Коммитмент карманных карт игрока на конкретную раздачу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HoleCommitment {
    /// Номер раздачи стола, для которой записан коммитмент.
    pub hand: u64,
    pub hash1: Digest,
    pub hash2: Digest,
}

/// Коммитмент борда. Карты раскрываются по улицам, поэтому у каждой свой ключ.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommunityCommitment {
    pub hand: u64,
    pub hashes: [Digest; COMMUNITY_CARDS],
    /// Уже раскрытые карты, по порядку позиций.
    pub revealed: Vec<CardCode>,
}

/// Хранилище коммитментов карт.
///
/// Запись – один раз на раздачу; перезаписать можно только коммитментом
/// следующей раздачи того же стола.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardStore {
    hole: BTreeMap<TableId, BTreeMap<PlayerId, HoleCommitment>>,
    community: BTreeMap<TableId, CommunityCommitment>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(
        &mut self,
        player: PlayerId,
        table_id: TableId,
        hand: u64,
        hash1: Digest,
        hash2: Digest,
    ) -> Result<(), LedgerError> {
        let slot = self.hole.entry(table_id).or_default();
        if slot.get(&player).is_some_and(|c| c.hand == hand) {
            return Err(LedgerError::AlreadyCommitted { table_id, hand });
        }
        slot.insert(player, HoleCommitment { hand, hash1, hash2 });
        Ok(())
    }

    /// Удалить коммитмент игрока, покинувшего стол.
    pub fn forget_player(&mut self, player: PlayerId, table_id: TableId) {
        if let Some(table) = self.hole.get_mut(&table_id) {
            table.remove(&player);
            if table.is_empty() {
                self.hole.remove(&table_id);
            }
        }
    }

    pub fn hole_commitment(&self, player: PlayerId, table_id: TableId) -> Option<&HoleCommitment> {
        self.hole.get(&table_id).and_then(|t| t.get(&player))
    }

    /// Пересчитать оба хэша из открытых карт и ключа и сравнить побайтно.
    pub fn verify(
        &self,
        player: PlayerId,
        table_id: TableId,
        key: &Digest,
        card1: CardCode,
        card2: CardCode,
    ) -> bool {
        match self.hole_commitment(player, table_id) {
            Some(c) => {
                commitment_hash(card1, key) == c.hash1 && commitment_hash(card2, key) == c.hash2
            }
            None => false,
        }
    }

    pub fn commit_community(
        &mut self,
        table_id: TableId,
        hand: u64,
        hashes: [Digest; COMMUNITY_CARDS],
    ) -> Result<(), LedgerError> {
        if self.community.get(&table_id).is_some_and(|c| c.hand == hand) {
            return Err(LedgerError::AlreadyCommitted { table_id, hand });
        }
        self.community.insert(
            table_id,
            CommunityCommitment {
                hand,
                hashes,
                revealed: Vec::new(),
            },
        );
        Ok(())
    }

    pub fn community(&self, table_id: TableId) -> Option<&CommunityCommitment> {
        self.community.get(&table_id)
    }

    pub fn revealed_community(&self, table_id: TableId) -> &[CardCode] {
        self.community
            .get(&table_id)
            .map(|c| c.revealed.as_slice())
            .unwrap_or(&[])
    }

    pub fn verify_community(
        &self,
        table_id: TableId,
        position: usize,
        card: CardCode,
        key: &Digest,
    ) -> bool {
        self.community
            .get(&table_id)
            .and_then(|c| c.hashes.get(position))
            .is_some_and(|h| commitment_hash(card, key) == *h)
    }

    /// Проверить и записать следующую карту борда.
    pub fn reveal_next_community(
        &mut self,
        table_id: TableId,
        card: CardCode,
        key: &Digest,
    ) -> Result<(), LedgerError> {
        let position = self.revealed_community(table_id).len();
        if position >= COMMUNITY_CARDS {
            return Err(LedgerError::InvalidReveal("борд уже раскрыт полностью"));
        }
        if !self.verify_community(table_id, position, card, key) {
            return Err(LedgerError::InvalidReveal("карта борда не совпадает с хэшем"));
        }
        if let Some(c) = self.community.get_mut(&table_id) {
            c.revealed.push(card);
        }
        Ok(())
    }
}
