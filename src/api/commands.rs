use serde::{Deserialize, Serialize};

use crate::commit::{CommunityReveal, Digest, HoleCards, HoleHashes, COMMUNITY_CARDS};
use crate::domain::chips::Chips;
use crate::domain::{PlayerId, TableId, TokenId};
use crate::ledger::{LedgerError, PokerLedger};
use crate::ports::{FungibleToken, HandEvaluator};

use super::dto::{CommandResponse, ShowdownSummary};
use super::errors::ApiError;

/// Команда верхнего уровня.
///
/// Эти команды превращаются в операции (`PokerOperation`),
/// которые Linera экспонирует наружу. Вызывающий аккаунт берётся
/// из контекста исполнения, а не из команды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Создать стол (только оператор).
    CreateTable(CreateTableCommand),

    /// Купить фишки за токен и сесть за стол.
    BuyIn(BuyInCommand),

    /// Вывести фишки обратно в токен.
    Withdraw(WithdrawCommand),

    /// Записать коммитменты карт и начать раздачу (только оператор).
    DealCards(DealCardsCommand),

    /// Действие игрока: код из ABI (Call=0, Raise=1, Check=2, Fold=3) и сумма.
    PlayHand(PlayHandCommand),

    /// Открыть флоп, тёрн или ривер (только оператор).
    RevealCommunity(RevealCommunityCommand),

    /// Раскрыть карты и рассчитать банк (только оператор).
    Showdown(ShowdownCommand),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTableCommand {
    /// Минимальный бай-ин.
    pub buy_in: Chips,
    pub max_players: u8,
    pub big_blind: Chips,
    pub token: TokenId,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuyInCommand {
    pub table_id: TableId,
    pub amount: Chips,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WithdrawCommand {
    pub table_id: TableId,
    pub amount: Chips,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealCardsCommand {
    pub table_id: TableId,
    /// По паре хэшей на каждого игрока, в порядке посадки.
    pub hole: Vec<HoleHashes>,
    pub community: [Digest; COMMUNITY_CARDS],
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayHandCommand {
    pub table_id: TableId,
    pub action_kind: u8,
    pub amount: Chips,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevealCommunityCommand {
    pub table_id: TableId,
    pub reveals: Vec<CommunityReveal>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownCommand {
    pub table_id: TableId,
    /// Ключ каждого участника раздачи, в порядке посадки.
    pub keys: Vec<Digest>,
    pub hole_cards: Vec<HoleCards>,
    /// Ещё не открытые карты борда, по порядку.
    pub community: Vec<CommunityReveal>,
}

impl<T, E> PokerLedger<T, E>
where
    T: FungibleToken,
    E: HandEvaluator,
{
    /// Выполнить команду от имени `caller`.
    pub fn execute(
        &mut self,
        caller: PlayerId,
        command: Command,
    ) -> Result<CommandResponse, LedgerError> {
        match command {
            Command::CreateTable(cmd) => {
                let table_id =
                    self.create_table(caller, cmd.buy_in, cmd.max_players, cmd.big_blind, cmd.token)?;
                Ok(CommandResponse::TableCreated { table_id })
            }
            Command::BuyIn(cmd) => {
                let balance = self.buy_in(caller, cmd.table_id, cmd.amount)?;
                Ok(CommandResponse::Balance {
                    table_id: cmd.table_id,
                    player: caller,
                    balance,
                })
            }
            Command::Withdraw(cmd) => {
                let balance = self.withdraw(caller, cmd.table_id, cmd.amount)?;
                Ok(CommandResponse::Balance {
                    table_id: cmd.table_id,
                    player: caller,
                    balance,
                })
            }
            Command::DealCards(cmd) => {
                let hand = self.deal_cards(caller, cmd.table_id, cmd.hole, cmd.community)?;
                Ok(CommandResponse::CardsDealt {
                    table_id: cmd.table_id,
                    hand,
                })
            }
            Command::PlayHand(cmd) => {
                let outcome = self.play_hand(caller, cmd.table_id, cmd.action_kind, cmd.amount)?;
                Ok(CommandResponse::ActionAccepted {
                    table_id: cmd.table_id,
                    debited: outcome.receipt.debited,
                    outcome: outcome.receipt.outcome,
                    payouts: outcome.payouts,
                })
            }
            Command::RevealCommunity(cmd) => {
                let round_index = self.reveal_community(caller, cmd.table_id, cmd.reveals)?;
                Ok(CommandResponse::StreetOpened {
                    table_id: cmd.table_id,
                    round_index,
                })
            }
            Command::Showdown(cmd) => {
                let outcome =
                    self.showdown(caller, cmd.table_id, cmd.keys, cmd.hole_cards, cmd.community)?;
                Ok(CommandResponse::Showdown(ShowdownSummary::from(outcome)))
            }
        }
    }

    /// Команда в JSON, как её шлёт клиент. Ошибки – в клиентском виде:
    /// неразобранный JSON даёт `BAD_REQUEST`, ошибки леджера – свои коды.
    pub fn execute_json(&mut self, caller: PlayerId, json: &str) -> Result<CommandResponse, ApiError> {
        let command: Command =
            serde_json::from_str(json).map_err(|e| ApiError::bad_request(e.to_string()))?;
        self.execute(caller, command).map_err(ApiError::from)
    }
}
