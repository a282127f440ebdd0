use serde::{Deserialize, Serialize};

use crate::ledger::LedgerError;

/// Ошибка внешнего API (то, что отдаём клиенту).
///
/// `code` стабилен и годится для сравнения на клиенте,
/// `message` – человекочитаемый текст.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }
}

/// Стабильный код ошибки леджера.
pub fn error_code(err: &LedgerError) -> &'static str {
    match err {
        LedgerError::Unauthorized { .. } => "UNAUTHORIZED",
        LedgerError::TableNotFound(_) | LedgerError::RoundNotFound { .. } => "NOT_FOUND",
        LedgerError::TableFull(_) => "TABLE_FULL",
        LedgerError::TableNotReady { .. } => "TABLE_NOT_READY",
        LedgerError::TableNotActive(_) => "TABLE_NOT_ACTIVE",
        LedgerError::BuyInTooLow { .. } => "BUY_IN_TOO_LOW",
        LedgerError::PlayerNotSeated { .. } => "PLAYER_NOT_SEATED",
        LedgerError::TokenTransferFailed(_) => "TOKEN_TRANSFER_FAILED",
        LedgerError::NotPlayersTurn(_) => "NOT_PLAYERS_TURN",
        LedgerError::InvalidAction(_) => "INVALID_ACTION",
        LedgerError::InsufficientChips { .. } => "INSUFFICIENT_CHIPS",
        LedgerError::InvalidReveal(_) => "INVALID_REVEAL",
        LedgerError::RoundNotComplete => "ROUND_NOT_COMPLETE",
        LedgerError::AlreadyCommitted { .. } => "ALREADY_COMMITTED",
        LedgerError::InvalidConfig(_) => "INVALID_CONFIG",
        LedgerError::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError {
            code: error_code(&err).to_string(),
            message: err.to_string(),
        }
    }
}
