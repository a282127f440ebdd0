//! Оффчейн-дилер: тасует колоду, раздаёт карты и готовит коммитменты.
//!
//! Оператор публикует в `deal_cards` только хэши из `DealtHand`, а
//! карты и ключи держит у себя до `reveal_community` и `showdown`.

use thiserror::Error;

use crate::commit::{CommunityReveal, Digest, HoleCards, HoleHashes, COMMUNITY_CARDS};
use crate::domain::deck::Deck;
use crate::infra::rng::RandomSource;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DealError {
    #[error("колоды не хватит на {players} игроков")]
    NotEnoughCards { players: usize },

    #[error("раздача без игроков")]
    NoPlayers,

    #[error("число ключей ({keys}) не совпадает с числом игроков ({players})")]
    KeyCountMismatch { keys: usize, players: usize },
}

/// Всё, что дилер знает о раздаче: открытые данные и секреты.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DealtHand {
    /// Карманные карты в порядке посадки.
    pub hole: Vec<HoleCards>,
    /// Ключ каждого игрока, один на обе карты.
    pub keys: Vec<Digest>,
    /// То, что уходит в `deal_cards`.
    pub hole_hashes: Vec<HoleHashes>,
    /// Карты борда, у каждой свой ключ.
    pub community: [CommunityReveal; COMMUNITY_CARDS],
    pub community_hashes: [Digest; COMMUNITY_CARDS],
}

impl DealtHand {
    /// Собрать раздачу из заранее известных карт и ключей (сценарии, реплей).
    pub fn from_parts(
        hole: Vec<HoleCards>,
        keys: Vec<Digest>,
        community: [CommunityReveal; COMMUNITY_CARDS],
    ) -> Result<Self, DealError> {
        if hole.is_empty() {
            return Err(DealError::NoPlayers);
        }
        if keys.len() != hole.len() {
            return Err(DealError::KeyCountMismatch {
                keys: keys.len(),
                players: hole.len(),
            });
        }
        let hole_hashes = hole
            .iter()
            .zip(&keys)
            .map(|(cards, key)| HoleHashes::commit(*cards, key))
            .collect();
        let community_hashes = community.map(|r| r.commitment());

        Ok(Self {
            hole,
            keys,
            hole_hashes,
            community,
            community_hashes,
        })
    }

    pub fn flop(&self) -> Vec<CommunityReveal> {
        self.community[..3].to_vec()
    }

    pub fn turn(&self) -> Vec<CommunityReveal> {
        self.community[3..4].to_vec()
    }

    pub fn river(&self) -> Vec<CommunityReveal> {
        self.community[4..].to_vec()
    }

    /// Карты борда, которые ещё не открыты, если открыто `revealed`.
    pub fn remaining_community(&self, revealed: usize) -> Vec<CommunityReveal> {
        self.community
            .get(revealed..)
            .map(<[CommunityReveal]>::to_vec)
            .unwrap_or_default()
    }
}

/// Дилер поверх любого `RandomSource`.
#[derive(Debug)]
pub struct Dealer<R> {
    rng: R,
}

impl<R: RandomSource> Dealer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn random_key(&mut self) -> Digest {
        let mut bytes = [0u8; 32];
        self.rng.fill_bytes(&mut bytes);
        Digest::from_bytes(bytes)
    }

    /// Перетасовать колоду и раздать по две карты каждому и пять на борд.
    pub fn deal(&mut self, players: usize) -> Result<DealtHand, DealError> {
        if players == 0 {
            return Err(DealError::NoPlayers);
        }
        let mut deck = Deck::standard_52();
        self.rng.shuffle(&mut deck.cards);

        let needed = players * 2 + COMMUNITY_CARDS;
        let cards = deck
            .draw_n(needed)
            .ok_or(DealError::NotEnoughCards { players })?;

        let hole: Vec<HoleCards> = cards[..players * 2]
            .chunks_exact(2)
            .map(|pair| HoleCards::new(pair[0], pair[1]))
            .collect();
        let keys: Vec<Digest> = (0..players).map(|_| self.random_key()).collect();

        let board = &cards[players * 2..];
        let mut reveal_at = |i: usize| CommunityReveal {
            card: board[i],
            key: self.random_key(),
        };
        let community = [
            reveal_at(0),
            reveal_at(1),
            reveal_at(2),
            reveal_at(3),
            reveal_at(4),
        ];

        DealtHand::from_parts(hole, keys, community)
    }
}
