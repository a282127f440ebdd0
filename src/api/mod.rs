//! Внешний API покерного леджера.
//!
//! Здесь описываются:
//! - команды (commands.rs) – всё, что меняет состояние, и `PokerLedger::execute`;
//! - запросы (queries.rs) – только чтение, `PokerLedger::query`;
//! - DTO (dto.rs) – ответы для клиента;
//! - ошибки (errors.rs) – то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
