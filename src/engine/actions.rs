use serde::{Deserialize, Serialize};

use crate::domain::Chips;
use crate::ledger::errors::LedgerError;

/// Тип действия игрока. Числовые коды – внешний ABI `play_hand`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[repr(u8)]
pub enum ActionKind {
    Call = 0,
    Raise = 1,
    Check = 2,
    Fold = 3,
}

impl TryFrom<u8> for ActionKind {
    type Error = LedgerError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ActionKind::Call),
            1 => Ok(ActionKind::Raise),
            2 => Ok(ActionKind::Check),
            3 => Ok(ActionKind::Fold),
            _ => Err(LedgerError::InvalidAction("неизвестный код действия")),
        }
    }
}

/// Действие игрока вместе с суммой.
///
/// Для Raise `amount` – итоговый вклад игрока в текущую улицу после рейза.
/// Для остальных действий сумма должна быть нулевой.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub amount: Chips,
}

impl Action {
    pub fn call() -> Self {
        Self {
            kind: ActionKind::Call,
            amount: Chips::ZERO,
        }
    }

    pub fn check() -> Self {
        Self {
            kind: ActionKind::Check,
            amount: Chips::ZERO,
        }
    }

    pub fn fold() -> Self {
        Self {
            kind: ActionKind::Fold,
            amount: Chips::ZERO,
        }
    }

    pub fn raise(amount: Chips) -> Self {
        Self {
            kind: ActionKind::Raise,
            amount,
        }
    }

    /// Разобрать пару (код, сумма) из внешней операции.
    pub fn from_wire(code: u8, amount: Chips) -> Result<Self, LedgerError> {
        Ok(Self {
            kind: ActionKind::try_from(code)?,
            amount,
        })
    }
}
