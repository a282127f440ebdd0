use serde::{Deserialize, Serialize};

use crate::domain::{CardCode, Chips, HandRank, PlayerId, RoundIndex, TableId, TokenId};
use crate::engine::actions::ActionKind;

/// Тип события леджера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LedgerEventKind {
    TableCreated {
        table_id: TableId,
        buy_in: Chips,
        max_players: u8,
        big_blind: Chips,
        token: TokenId,
    },

    /// Бай-ин или докупка. `balance` – баланс после зачисления.
    BoughtIn {
        table_id: TableId,
        player: PlayerId,
        amount: Chips,
        balance: Chips,
    },

    Withdrawn {
        table_id: TableId,
        player: PlayerId,
        amount: Chips,
        balance: Chips,
    },

    /// Игрок освободил место (вывел всё или проиграл стек).
    PlayerUnseated { table_id: TableId, player: PlayerId },

    /// Записаны коммитменты, раздача началась.
    CardsDealt {
        table_id: TableId,
        hand: u64,
        players: Vec<PlayerId>,
    },

    /// Принятое действие. `debited` – сколько ушло в банк, `pot` – банк стола после.
    PlayerActed {
        table_id: TableId,
        round_index: RoundIndex,
        player: PlayerId,
        action: ActionKind,
        debited: Chips,
        pot: Chips,
    },

    RoundCompleted {
        table_id: TableId,
        round_index: RoundIndex,
    },

    /// Открыты карты борда, началась новая улица.
    StreetOpened {
        table_id: TableId,
        round_index: RoundIndex,
        cards: Vec<CardCode>,
    },

    /// Карты участника на шоудауне. `rank` = None для сфолдивших.
    HoleCardsRevealed {
        table_id: TableId,
        player: PlayerId,
        cards: [CardCode; 2],
        rank: Option<HandRank>,
    },

    PotAwarded {
        table_id: TableId,
        player: PlayerId,
        amount: Chips,
    },

    HandSettled { table_id: TableId, hand: u64 },
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEvent {
    pub seq: u64,
    pub kind: LedgerEventKind,
}

/// Журнал событий, только добавление.
///
/// Операция пишет события в свой буфер; в журнал они попадают только
/// вместе с коммитом её эффектов.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<LedgerEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: LedgerEventKind) {
        let seq = self.events.len() as u64;
        self.events.push(LedgerEvent { seq, kind });
    }

    pub fn extend(&mut self, kinds: impl IntoIterator<Item = LedgerEventKind>) {
        for kind in kinds {
            self.push(kind);
        }
    }

    pub fn all(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// События начиная с номера `from` – для клиентов, которые догоняют журнал.
    pub fn since(&self, from: u64) -> &[LedgerEvent] {
        let start = usize::try_from(from).unwrap_or(usize::MAX).min(self.events.len());
        &self.events[start..]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
