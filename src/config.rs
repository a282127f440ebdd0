//! Конфигурация леджера.
//!
//! Грузится из JSON; отсутствующие поля берутся по умолчанию.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PlayerId;

/// Максимум мест за одним столом, если в конфиге не указано иначе.
pub const DEFAULT_MAX_PLAYERS_CAP: u8 = 10;

/// Улиц в раздаче: префлоп, флоп, тёрн, ривер.
pub const MAX_STREETS: u8 = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось прочитать конфиг: {0}")]
    Io(#[from] std::io::Error),

    #[error("некорректный JSON конфига: {0}")]
    Json(#[from] serde_json::Error),

    #[error("некорректное значение: {0}")]
    Invalid(&'static str),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Аккаунт оператора: создаёт столы, раздаёт и проводит шоудаун.
    pub operator: PlayerId,

    #[serde(default = "default_max_players_cap")]
    pub max_players_cap: u8,
}

fn default_max_players_cap() -> u8 {
    DEFAULT_MAX_PLAYERS_CAP
}

impl LedgerConfig {
    pub fn new(operator: PlayerId) -> Self {
        Self {
            operator,
            max_players_cap: DEFAULT_MAX_PLAYERS_CAP,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: LedgerConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_players_cap < 2 {
            return Err(ConfigError::Invalid("max_players_cap должен быть не меньше 2"));
        }
        Ok(())
    }

    pub fn is_operator(&self, caller: PlayerId) -> bool {
        caller == self.operator
    }

    pub fn max_streets(&self) -> u8 {
        MAX_STREETS
    }
}
