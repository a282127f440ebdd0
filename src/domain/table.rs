use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{PlayerId, TableId, TokenId};

/// Номер улицы в раздаче: 0 = префлоп, 3 = ривер.
pub type RoundIndex = u8;

/// Жизненный цикл стола.
///
/// Числовые значения совпадают с внешним ABI: Active = 0, Inactive = 1.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[repr(u8)]
pub enum TableState {
    /// Карты розданы, идёт раздача.
    Active = 0,
    /// Стол ждёт следующей раздачи.
    Inactive = 1,
}

/// Конфиг стола: бай-ин, размер, блайнд и токен.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Минимальная сумма одного бай-ина.
    pub buy_in: Chips,
    /// Максимальное количество мест за столом.
    pub max_players: u8,
    pub big_blind: Chips,
    /// Токен, в котором номинированы фишки этого стола.
    pub token: TokenId,
}

/// Основное состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub config: TableConfig,
    pub state: TableState,

    /// Игроки в порядке посадки. Порядок = порядок хода и порядок коммитментов.
    pub players: Vec<PlayerId>,

    /// Текущая улица активной раздачи.
    pub current_round: RoundIndex,

    /// Банк текущей раздачи (сумма банков всех улиц).
    pub pot: Chips,

    /// Сколько раздач сыграно. Заодно служит номером следующей раздачи.
    pub hands_played: u64,
}

impl Table {
    /// Создать пустой неактивный стол.
    pub fn new(id: TableId, config: TableConfig) -> Self {
        Self {
            id,
            config,
            state: TableState::Inactive,
            players: Vec::new(),
            current_round: 0,
            pot: Chips::ZERO,
            hands_played: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == TableState::Active
    }

    pub fn seated_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_seated(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    pub fn has_free_seat(&self) -> bool {
        self.players.len() < self.config.max_players as usize
    }

    /// Посадить игрока в конец очереди. Проверку свободного места делает вызывающий.
    pub fn seat(&mut self, player: PlayerId) {
        if !self.is_seated(player) {
            self.players.push(player);
        }
    }

    pub fn unseat(&mut self, player: PlayerId) {
        self.players.retain(|p| *p != player);
    }
}
