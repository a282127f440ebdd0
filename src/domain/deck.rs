use serde::{Deserialize, Serialize};

use crate::domain::card::CardCode;

/// Колода карт. В домене – просто упорядоченный список кодов.
/// Перемешивание делает дилер (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<CardCode>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке кодов 0..52.
    pub fn standard_52() -> Self {
        Deck {
            cards: (0..CardCode::COUNT).map(CardCode).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху колоды.
    pub fn draw_one(&mut self) -> Option<CardCode> {
        self.cards.pop()
    }

    /// Взять n карт сверху. Если карт не хватает – None, колода не трогается.
    pub fn draw_n(&mut self, n: usize) -> Option<Vec<CardCode>> {
        if n > self.cards.len() {
            return None;
        }
        let split_at = self.cards.len() - n;
        let mut taken = self.cards.split_off(split_at);
        taken.reverse();
        Some(taken)
    }
}
