use crate::domain::{Chips, PlayerId};
use crate::engine::actions::{Action, ActionKind};
use crate::engine::round::{Round, RoundStatus};
use crate::ledger::errors::LedgerError;

/// Проверка, может ли `caller` выполнить действие при текущем состоянии улицы.
///
/// Ничего не меняет. Возвращает сумму, которую нужно списать с игрока.
/// Нехватку фишек проверяет уже ChipLedger при списании.
pub fn validate_action(round: &Round, caller: PlayerId, action: &Action) -> Result<Chips, LedgerError> {
    if round.current_turn != caller {
        return Err(LedgerError::NotPlayersTurn(caller));
    }
    if round.status == RoundStatus::RoundComplete {
        return Err(LedgerError::InvalidAction("раунд ставок уже завершён"));
    }

    let contributed = round.contribution_of(caller);

    match action.kind {
        ActionKind::Check => {
            if !action.amount.is_zero() {
                return Err(LedgerError::InvalidAction("check не принимает сумму"));
            }
            if contributed != round.highest_chip {
                return Err(LedgerError::InvalidAction(
                    "check невозможен – нужно уравнять ставку",
                ));
            }
            Ok(Chips::ZERO)
        }

        ActionKind::Call => {
            if !action.amount.is_zero() {
                return Err(LedgerError::InvalidAction("call не принимает сумму"));
            }
            let to_call = round.to_call(caller);
            if to_call.is_zero() {
                return Err(LedgerError::InvalidAction("call невозможен – нет ставки для уравнивания"));
            }
            Ok(to_call)
        }

        ActionKind::Raise => {
            if action.amount <= round.highest_chip {
                return Err(LedgerError::InvalidAction(
                    "рейз должен быть строго больше текущей ставки",
                ));
            }
            action
                .amount
                .checked_sub(contributed)
                .ok_or(LedgerError::ArithmeticOverflow)
        }

        ActionKind::Fold => {
            if !action.amount.is_zero() {
                return Err(LedgerError::InvalidAction("fold не принимает сумму"));
            }
            // Иначе улица останется без игроков.
            if matches!(round.players.as_slice(), [only] if *only == caller) {
                return Err(LedgerError::InvalidAction(
                    "единственный игрок раздачи не может сбросить карты",
                ));
            }
            Ok(Chips::ZERO)
        }
    }
}
