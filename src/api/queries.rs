use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::Table;
use crate::domain::{PlayerId, RoundIndex, TableId};
use crate::engine::Round;
use crate::ledger::{LedgerError, LedgerEvent, PokerLedger, TableAudit};
use crate::ports::{FungibleToken, HandEvaluator};
use crate::state::{LedgerState, TableTreasury};

use super::dto::{PlayerSeatDto, TableViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Получить состояние стола.
    Table { table_id: TableId },

    /// Баланс игрока за столом.
    Chips { player: PlayerId, table_id: TableId },

    /// Улица текущей раздачи.
    Round {
        table_id: TableId,
        round_index: RoundIndex,
    },

    Treasury { table_id: TableId },

    /// Сверка закона сохранения.
    Audit { table_id: TableId },

    /// События журнала, начиная с номера `from`.
    Events { from: u64 },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Table(TableViewDto),
    Chips(Chips),
    Round(Round),
    Treasury(TableTreasury),
    Audit(TableAudit),
    Events(Vec<LedgerEvent>),
}

impl<T, E> PokerLedger<T, E>
where
    T: FungibleToken,
    E: HandEvaluator,
{
    /// Выполнить запрос. Состояние не меняется.
    pub fn query(&self, query: Query) -> Result<QueryResponse, LedgerError> {
        match query {
            Query::Table { table_id } => {
                let table = self.table(table_id)?;
                Ok(QueryResponse::Table(build_table_view(table, self.state())))
            }
            Query::Chips { player, table_id } => Ok(QueryResponse::Chips(self.chips(player, table_id)?)),
            Query::Round {
                table_id,
                round_index,
            } => Ok(QueryResponse::Round(self.round(table_id, round_index)?.clone())),
            Query::Treasury { table_id } => Ok(QueryResponse::Treasury(self.treasury(table_id)?)),
            Query::Audit { table_id } => Ok(QueryResponse::Audit(self.audit(table_id)?)),
            Query::Events { from } => Ok(QueryResponse::Events(
                self.state().events.since(from).to_vec(),
            )),
        }
    }
}

/// Сформировать DTO стола на основе `Table` и остального состояния леджера.
pub fn build_table_view(table: &Table, state: &LedgerState) -> TableViewDto {
    let hand = state.hands.get(&table.id);
    let round = state.current_round(table.id).ok();

    let players = table
        .players
        .iter()
        .enumerate()
        .map(|(idx, player)| PlayerSeatDto {
            player_id: *player,
            seat_index: u8::try_from(idx).unwrap_or(u8::MAX),
            chips: state.chips.balance_of(*player, table.id),
            in_hand: hand.is_some_and(|h| h.is_participant(*player)),
            folded: hand.is_some_and(|h| h.folded.contains(player)),
        })
        .collect();

    let current_turn = round
        .filter(|r| table.is_active() && !r.is_complete())
        .map(|r| r.current_turn);

    TableViewDto {
        table_id: table.id,
        buy_in: table.config.buy_in,
        max_players: table.config.max_players,
        big_blind: table.config.big_blind,
        token: table.config.token,
        state: table.state,
        players,
        current_round: table.current_round,
        pot: table.pot,
        hands_played: table.hands_played,
        board: state.cards.revealed_community(table.id).to_vec(),
        current_turn,
        highest_chip: round.map(|r| r.highest_chip).unwrap_or_default(),
    }
}
