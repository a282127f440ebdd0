use thiserror::Error;

use crate::domain::{Chips, PlayerId, RoundIndex, TableId};

/// Ошибки покерного леджера.
///
/// Любая ошибка отменяет операцию целиком: состояние, события и
/// балансы токена остаются такими же, как до вызова.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Аккаунт {caller} не имеет права на эту операцию")]
    Unauthorized { caller: PlayerId },

    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    #[error("Раунд {round_index} стола {table_id} не найден")]
    RoundNotFound {
        table_id: TableId,
        round_index: RoundIndex,
    },

    #[error("За столом {0} нет свободных мест")]
    TableFull(TableId),

    #[error("Стол {table_id} не готов: {reason}")]
    TableNotReady {
        table_id: TableId,
        reason: &'static str,
    },

    #[error("На столе {0} нет активной раздачи")]
    TableNotActive(TableId),

    #[error("Бай-ин {offered} меньше минимального {required}")]
    BuyInTooLow { offered: Chips, required: Chips },

    #[error("Игрок {player} не сидит за столом {table_id}")]
    PlayerNotSeated { player: PlayerId, table_id: TableId },

    #[error("Перевод токена отклонён: {0}")]
    TokenTransferFailed(String),

    #[error("Сейчас не ход игрока с id={0}")]
    NotPlayersTurn(PlayerId),

    #[error("Недопустимое действие: {0}")]
    InvalidAction(&'static str),

    #[error("Недостаточно фишек: нужно {needed}, есть {available}")]
    InsufficientChips { needed: Chips, available: Chips },

    #[error("Раскрытие не совпадает с коммитментом: {0}")]
    InvalidReveal(&'static str),

    #[error("Раунд ставок ещё не завершён")]
    RoundNotComplete,

    #[error("Коммитмент раздачи {hand} стола {table_id} уже записан")]
    AlreadyCommitted { table_id: TableId, hand: u64 },

    #[error("Некорректная конфигурация: {0}")]
    InvalidConfig(&'static str),

    #[error("Арифметическое переполнение при учёте фишек")]
    ArithmeticOverflow,
}

impl LedgerError {
    /// Ошибка из семейства NotFound (чтение несуществующей сущности).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::TableNotFound(_) | LedgerError::RoundNotFound { .. }
        )
    }
}
