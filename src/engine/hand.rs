use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;
use crate::engine::positions::remaining_in_order;

/// Состояние текущей раздачи стола.
///
/// `participants` фиксируется в `deal_cards` и не меняется до расчёта:
/// игрок, купивший фишки посреди раздачи, ждёт следующей.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandState {
    /// Номер раздачи стола (`Table::hands_played` на момент сдачи).
    pub hand: u64,
    /// Получившие карты игроки в порядке посадки.
    pub participants: Vec<PlayerId>,
    pub folded: BTreeSet<PlayerId>,
}

impl HandState {
    pub fn new(hand: u64, participants: Vec<PlayerId>) -> Self {
        Self {
            hand,
            participants,
            folded: BTreeSet::new(),
        }
    }

    pub fn is_participant(&self, player: PlayerId) -> bool {
        self.participants.contains(&player)
    }

    pub fn fold(&mut self, player: PlayerId) {
        self.folded.insert(player);
    }

    /// Не сфолдившие участники, порядок посадки сохраняется.
    pub fn live_players(&self) -> Vec<PlayerId> {
        remaining_in_order(&self.participants, |p| self.folded.contains(&p))
    }
}
