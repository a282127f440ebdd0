//! Движок ставок: одна улица за раз.
//!
//! Высокоуровневый объект: `Round`
//! Основные операции:
//!   - `Round::open` – открыть улицу над не сфолдившими игроками
//!   - `Round::apply` – применить действие игрока
//!   - `split_pot` – поделить банк между победителями

pub mod actions;
pub mod hand;
pub mod positions;
pub mod pot;
pub mod round;
pub mod validation;

pub use actions::{Action, ActionKind};
pub use hand::HandState;
pub use pot::split_pot;
pub use round::{ActionReceipt, Round, RoundOutcome, RoundStatus};
pub use validation::validate_action;
