use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::commit::CardStore;
use crate::domain::chips::Chips;
use crate::domain::table::Table;
use crate::domain::{RoundIndex, TableId};
use crate::engine::hand::HandState;
use crate::engine::round::Round;
use crate::ledger::chips::ChipLedger;
use crate::ledger::errors::LedgerError;
use crate::ledger::events::{EventLog, LedgerEventKind};

/// Учёт токенов стола: сколько внесено бай-инами и сколько выведено.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableTreasury {
    pub deposited: Chips,
    pub withdrawn: Chips,
}

impl TableTreasury {
    /// Сколько токенов стол должен держать в кастоди прямо сейчас.
    pub fn held(&self) -> Option<Chips> {
        self.deposited.checked_sub(self.withdrawn)
    }
}

/// Глобальное состояние покерного леджера.
///
/// Важное:
/// - Все коллекции – BTreeMap, чтобы сериализация была детерминированной
///   и одинаковые последовательности операций давали одинаковый снапшот.
/// - Состояние меняет только `PokerLedger`, и только на staged-копии.
/// - Журнал событий в staged-копию не попадает.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerState {
    /// Id следующего стола. Id выдаются подряд с нуля.
    pub next_table_id: TableId,

    pub tables: BTreeMap<TableId, Table>,

    pub treasuries: BTreeMap<TableId, TableTreasury>,

    /// Балансы фишек (стол, игрок).
    pub chips: ChipLedger,

    /// Коммитменты карманных карт и борда.
    pub cards: CardStore,

    /// Активные раздачи по каждому столу.
    pub hands: BTreeMap<TableId, HandState>,

    /// Улицы текущей раздачи, индекс в Vec = номер улицы.
    pub rounds: BTreeMap<TableId, Vec<Round>>,

    pub events: EventLog,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Копия для staged-транзакции – всё, кроме журнала событий.
    /// События операции копятся отдельно и дописываются при коммите.
    pub(crate) fn staged(&self) -> Self {
        Self {
            next_table_id: self.next_table_id,
            tables: self.tables.clone(),
            treasuries: self.treasuries.clone(),
            chips: self.chips.clone(),
            cards: self.cards.clone(),
            hands: self.hands.clone(),
            rounds: self.rounds.clone(),
            events: EventLog::new(),
        }
    }

    /// Принять staged-копию и дописать события операции в журнал.
    pub(crate) fn commit(&mut self, staged: Self, pending: Vec<LedgerEventKind>) {
        let mut events = std::mem::take(&mut self.events);
        events.extend(pending);
        *self = Self { events, ..staged };
    }

    pub fn table(&self, table_id: TableId) -> Result<&Table, LedgerError> {
        self.tables
            .get(&table_id)
            .ok_or(LedgerError::TableNotFound(table_id))
    }

    pub fn table_mut(&mut self, table_id: TableId) -> Result<&mut Table, LedgerError> {
        self.tables
            .get_mut(&table_id)
            .ok_or(LedgerError::TableNotFound(table_id))
    }

    pub fn round(&self, table_id: TableId, round_index: RoundIndex) -> Result<&Round, LedgerError> {
        self.table(table_id)?;
        self.rounds
            .get(&table_id)
            .and_then(|r| r.get(round_index as usize))
            .ok_or(LedgerError::RoundNotFound {
                table_id,
                round_index,
            })
    }

    /// Последняя открытая улица стола.
    pub fn current_round(&self, table_id: TableId) -> Result<&Round, LedgerError> {
        let table = self.table(table_id)?;
        self.round(table_id, table.current_round)
    }

    pub fn treasury(&self, table_id: TableId) -> Result<TableTreasury, LedgerError> {
        self.table(table_id)?;
        Ok(self.treasuries.get(&table_id).copied().unwrap_or_default())
    }

    pub fn hand(&self, table_id: TableId) -> Result<&HandState, LedgerError> {
        self.hands.get(&table_id).ok_or(LedgerError::TableNotActive(table_id))
    }
}
