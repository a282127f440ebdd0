use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId, RoundIndex, TableId};
use crate::engine::actions::{Action, ActionKind};
use crate::engine::positions::next_in_order;
use crate::engine::validation::validate_action;
use crate::ledger::chips::ChipLedger;
use crate::ledger::errors::LedgerError;

/// Состояние улицы.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundStatus {
    AwaitingAction,
    RoundComplete,
}

/// Что произошло с улицей после действия.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Ход перешёл к следующему игроку.
    Continue { next_turn: PlayerId },
    /// Все уравняли ставку: можно открывать следующую улицу или шоудаун.
    Complete,
    /// Остался один игрок – он забирает банк без шоудауна.
    LastPlayerStanding(PlayerId),
}

/// Результат применённого действия.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionReceipt {
    /// Сколько фишек ушло со стека игрока в банк.
    pub debited: Chips,
    pub outcome: RoundOutcome,
}

/// Одна улица ставок.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Round {
    pub table_id: TableId,
    pub round_index: RoundIndex,
    /// Сколько фишек поставлено на этой улице.
    pub pot: Chips,
    /// Текущая ставка, до которой должны дотянуться все. Не убывает.
    pub highest_chip: Chips,
    /// Не сфолдившие игроки в порядке посадки.
    pub players: Vec<PlayerId>,
    /// Вклад каждого игрока в эту улицу.
    pub contributions: BTreeMap<PlayerId, Chips>,
    /// Кто уже сходил после последнего рейза.
    pub acted: BTreeSet<PlayerId>,
    pub current_turn: PlayerId,
    pub status: RoundStatus,
}

impl Round {
    /// Открыть улицу. Первым ходит первый игрок из `players`.
    pub fn open(
        table_id: TableId,
        round_index: RoundIndex,
        players: Vec<PlayerId>,
    ) -> Result<Self, LedgerError> {
        let current_turn = *players.first().ok_or(LedgerError::TableNotReady {
            table_id,
            reason: "нет игроков для новой улицы",
        })?;
        Ok(Self {
            table_id,
            round_index,
            pot: Chips::ZERO,
            highest_chip: Chips::ZERO,
            players,
            contributions: BTreeMap::new(),
            acted: BTreeSet::new(),
            current_turn,
            status: RoundStatus::AwaitingAction,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.status == RoundStatus::RoundComplete
    }

    pub fn contribution_of(&self, player: PlayerId) -> Chips {
        self.contributions.get(&player).copied().unwrap_or(Chips::ZERO)
    }

    /// Сколько игроку нужно доплатить до текущей ставки.
    pub fn to_call(&self, player: PlayerId) -> Chips {
        self.highest_chip.saturating_sub(self.contribution_of(player))
    }

    /// Применить действие игрока.
    ///
    /// Сначала полная валидация, потом списание, и только потом меняется
    /// состояние улицы – при ошибке улица остаётся нетронутой.
    pub fn apply(
        &mut self,
        caller: PlayerId,
        action: Action,
        chips: &mut ChipLedger,
    ) -> Result<ActionReceipt, LedgerError> {
        let debit = validate_action(self, caller, &action)?;

        if !debit.is_zero() {
            chips.debit(caller, self.table_id, debit)?;
        }

        let new_pot = self
            .pot
            .checked_add(debit)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let new_contribution = self
            .contribution_of(caller)
            .checked_add(debit)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.pot = new_pot;
        if !debit.is_zero() {
            self.contributions.insert(caller, new_contribution);
        }

        let next_turn = next_in_order(&self.players, caller).unwrap_or(caller);

        match action.kind {
            ActionKind::Check | ActionKind::Call => {
                self.acted.insert(caller);
            }
            ActionKind::Raise => {
                self.highest_chip = action.amount;
                // Рейз заново открывает торговлю для всех остальных.
                self.acted.clear();
                self.acted.insert(caller);
            }
            ActionKind::Fold => {
                self.players.retain(|p| *p != caller);
                self.acted.remove(&caller);
                if let [winner] = self.players.as_slice() {
                    let winner = *winner;
                    self.status = RoundStatus::RoundComplete;
                    self.current_turn = winner;
                    return Ok(ActionReceipt {
                        debited: debit,
                        outcome: RoundOutcome::LastPlayerStanding(winner),
                    });
                }
            }
        }

        if self.everyone_matched() {
            self.status = RoundStatus::RoundComplete;
            return Ok(ActionReceipt {
                debited: debit,
                outcome: RoundOutcome::Complete,
            });
        }

        self.current_turn = next_turn;
        Ok(ActionReceipt {
            debited: debit,
            outcome: RoundOutcome::Continue { next_turn },
        })
    }

    /// Все оставшиеся сходили и внесли ровно `highest_chip`.
    fn everyone_matched(&self) -> bool {
        !self.players.is_empty()
            && self
                .players
                .iter()
                .all(|p| self.acted.contains(p) && self.contribution_of(*p) == self.highest_chip)
    }
}
