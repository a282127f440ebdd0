use serde::{Deserialize, Serialize};

use crate::domain::card::CardCode;
use crate::domain::chips::Chips;
use crate::domain::hand::HandRank;
use crate::domain::table::TableState;
use crate::domain::{PlayerId, RoundIndex, TableId, TokenId};
use crate::engine::RoundOutcome;
use crate::ledger::ShowdownOutcome;

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSeatDto {
    pub player_id: PlayerId,
    pub seat_index: u8,
    pub chips: Chips,
    /// Получил карты в текущей раздаче.
    pub in_hand: bool,
    pub folded: bool,
}

/// DTO стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableViewDto {
    pub table_id: TableId,
    pub buy_in: Chips,
    pub max_players: u8,
    pub big_blind: Chips,
    pub token: TokenId,
    pub state: TableState,
    pub players: Vec<PlayerSeatDto>,
    pub current_round: RoundIndex,
    pub pot: Chips,
    pub hands_played: u64,
    /// Открытые карты борда.
    pub board: Vec<CardCode>,
    /// Чей ход (если раздача идёт и улица не завершена).
    pub current_turn: Option<PlayerId>,
    pub highest_chip: Chips,
}

/// Результат одного участника шоудауна.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandPlayerResultDto {
    pub player_id: PlayerId,
    pub rank: HandRank,
    pub payout: Chips,
    pub is_winner: bool,
}

/// Итог шоудауна для клиента.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownSummary {
    pub table_id: TableId,
    pub hand: u64,
    pub board: Vec<CardCode>,
    pub total_pot: Chips,
    pub players: Vec<HandPlayerResultDto>,
}

impl From<ShowdownOutcome> for ShowdownSummary {
    fn from(outcome: ShowdownOutcome) -> Self {
        let payout_of = |player: PlayerId| {
            outcome
                .payouts
                .iter()
                .find(|(p, _)| *p == player)
                .map(|(_, amount)| *amount)
        };

        let players = outcome
            .scores
            .iter()
            .map(|score| {
                let payout = payout_of(score.player);
                HandPlayerResultDto {
                    player_id: score.player,
                    rank: score.rank,
                    payout: payout.unwrap_or_default(),
                    is_winner: payout.is_some(),
                }
            })
            .collect();

        ShowdownSummary {
            table_id: outcome.table_id,
            hand: outcome.hand,
            board: outcome.board.clone(),
            total_pot: outcome.payouts.iter().map(|(_, amount)| *amount).sum(),
            players,
        }
    }
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    TableCreated {
        table_id: TableId,
    },

    /// Баланс игрока после бай-ина или вывода.
    Balance {
        table_id: TableId,
        player: PlayerId,
        balance: Chips,
    },

    CardsDealt {
        table_id: TableId,
        hand: u64,
    },

    ActionAccepted {
        table_id: TableId,
        debited: Chips,
        outcome: RoundOutcome,
        /// Непусто, если раздача закончилась фолдом всех, кроме одного.
        payouts: Vec<(PlayerId, Chips)>,
    },

    StreetOpened {
        table_id: TableId,
        round_index: RoundIndex,
    },

    Showdown(ShowdownSummary),
}
