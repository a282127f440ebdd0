//! Главный модуль покерного леджера на Linera.
//!
//! Здесь описываем ABI (Operation / Message / Query / Response) и
//! собираем модули: домен, commit-reveal, движок ставок, леджер, порты.

pub mod api;
pub mod commit;
pub mod config;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod ledger;
pub mod ports;
pub mod state;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

use crate::api::{Command, CommandResponse, Query, QueryResponse};

pub use crate::config::LedgerConfig;
pub use crate::ledger::{LedgerError, PokerLedger};
pub use crate::state::LedgerState;

/// Операции (внешние команды), которые модуль принимает.
///
/// Одна операция = одна команда из api::Command = одна атомарная транзакция.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PokerOperation {
    Command(Command),
}

/// Сообщения между приложениями Linera.
/// Пока нам не нужны – оставим пустой enum.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PokerMessage {}

/// Запросы к сервису (read-only).
pub type PokerQuery = Query;

/// Ответы на запросы.
pub type PokerResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct PokerAbi;

impl ContractAbi for PokerAbi {
    type Operation = PokerOperation;
    type Response = CommandResponse;
}

impl ServiceAbi for PokerAbi {
    type Query = PokerQuery;
    type QueryResponse = PokerResponse;
}

/// Состояние, которое контракт сериализует целиком.
pub type Storage = LedgerState;

impl<T, E> PokerLedger<T, E>
where
    T: ports::FungibleToken,
    E: ports::HandEvaluator,
{
    /// Точка входа контракта: разобрать операцию и выполнить её.
    pub fn execute_operation(
        &mut self,
        caller: domain::PlayerId,
        operation: PokerOperation,
    ) -> Result<CommandResponse, LedgerError> {
        match operation {
            PokerOperation::Command(command) => self.execute(caller, command),
        }
    }
}
