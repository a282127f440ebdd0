use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Chips, PlayerId, TokenId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("недостаточно токенов у {account}: нужно {needed}, есть {available}")]
    InsufficientBalance {
        account: PlayerId,
        needed: Chips,
        available: Chips,
    },

    #[error("разрешение {owner} на списание меньше суммы: нужно {needed}, разрешено {allowed}")]
    InsufficientAllowance {
        owner: PlayerId,
        needed: Chips,
        allowed: Chips,
    },

    #[error("в кастоди токена {token} недостаточно средств: нужно {needed}, есть {available}")]
    InsufficientCustody {
        token: TokenId,
        needed: Chips,
        available: Chips,
    },

    #[error("переполнение баланса токена")]
    Overflow,
}

/// Фунгибельный токен, в котором номинированы фишки.
///
/// Леджер держит средства игроков в кастоди: `transfer_from` забирает токены
/// у владельца, `transfer` выплачивает из кастоди. При ошибке реализация
/// не должна менять ни одного баланса.
pub trait FungibleToken {
    fn transfer_from(&mut self, token: TokenId, owner: PlayerId, amount: Chips) -> Result<(), TokenError>;

    fn transfer(&mut self, token: TokenId, to: PlayerId, amount: Chips) -> Result<(), TokenError>;

    fn balance_of(&self, token: TokenId, account: PlayerId) -> Chips;
}

/// Простой токен в памяти: для тестов, dev CLI и реплея.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InMemoryToken {
    balances: BTreeMap<TokenId, BTreeMap<PlayerId, Chips>>,
    /// Сколько каждый владелец разрешил леджеру списать.
    allowances: BTreeMap<TokenId, BTreeMap<PlayerId, Chips>>,
    custody: BTreeMap<TokenId, Chips>,
}

impl InMemoryToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, token: TokenId, to: PlayerId, amount: Chips) -> Result<(), TokenError> {
        let slot = self.balances.entry(token).or_default().entry(to).or_default();
        *slot = slot.checked_add(amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }

    /// Выставить разрешение (перезаписывает прежнее, как ERC-20 approve).
    pub fn approve(&mut self, token: TokenId, owner: PlayerId, amount: Chips) {
        self.allowances.entry(token).or_default().insert(owner, amount);
    }

    pub fn allowance(&self, token: TokenId, owner: PlayerId) -> Chips {
        lookup(&self.allowances, token, owner)
    }

    /// Сколько токенов сейчас держит леджер.
    pub fn custody_balance(&self, token: TokenId) -> Chips {
        self.custody.get(&token).copied().unwrap_or_default()
    }
}

fn lookup(map: &BTreeMap<TokenId, BTreeMap<PlayerId, Chips>>, token: TokenId, account: PlayerId) -> Chips {
    map.get(&token)
        .and_then(|m| m.get(&account))
        .copied()
        .unwrap_or_default()
}

impl FungibleToken for InMemoryToken {
    fn transfer_from(&mut self, token: TokenId, owner: PlayerId, amount: Chips) -> Result<(), TokenError> {
        // Все проверки до первой записи.
        let allowed = self.allowance(token, owner);
        let new_allowance = allowed.checked_sub(amount).ok_or(TokenError::InsufficientAllowance {
            owner,
            needed: amount,
            allowed,
        })?;
        let available = self.balance_of(token, owner);
        let new_balance = available.checked_sub(amount).ok_or(TokenError::InsufficientBalance {
            account: owner,
            needed: amount,
            available,
        })?;
        let new_custody = self
            .custody_balance(token)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.allowances.entry(token).or_default().insert(owner, new_allowance);
        self.balances.entry(token).or_default().insert(owner, new_balance);
        self.custody.insert(token, new_custody);
        Ok(())
    }

    fn transfer(&mut self, token: TokenId, to: PlayerId, amount: Chips) -> Result<(), TokenError> {
        let available = self.custody_balance(token);
        let new_custody = available.checked_sub(amount).ok_or(TokenError::InsufficientCustody {
            token,
            needed: amount,
            available,
        })?;
        let new_balance = self
            .balance_of(token, to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.custody.insert(token, new_custody);
        self.balances.entry(token).or_default().insert(to, new_balance);
        Ok(())
    }

    fn balance_of(&self, token: TokenId, account: PlayerId) -> Chips {
        lookup(&self.balances, token, account)
    }
}
