use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId, TableId};
use crate::ledger::errors::LedgerError;

/// Балансы фишек: (стол, игрок) -> сумма.
///
/// Единственное место, где балансы меняются. Всё остальное
/// (бай-ин, ставки, выплаты) идёт через `credit` / `debit`,
/// поэтому закон сохранения проверяется здесь и в аудите стола.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChipLedger {
    balances: BTreeMap<TableId, BTreeMap<PlayerId, Chips>>,
}

impl ChipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(
        &mut self,
        player: PlayerId,
        table_id: TableId,
        amount: Chips,
    ) -> Result<Chips, LedgerError> {
        let entry = self
            .balances
            .entry(table_id)
            .or_default()
            .entry(player)
            .or_insert(Chips::ZERO);
        let updated = entry
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        *entry = updated;
        Ok(updated)
    }

    /// Списать фишки. При нехватке баланс не меняется.
    pub fn debit(
        &mut self,
        player: PlayerId,
        table_id: TableId,
        amount: Chips,
    ) -> Result<Chips, LedgerError> {
        let available = self.balance_of(player, table_id);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientChips {
                needed: amount,
                available,
            })?;

        if let Some(table) = self.balances.get_mut(&table_id) {
            if remaining.is_zero() {
                table.remove(&player);
            } else {
                table.insert(player, remaining);
            }
            if table.is_empty() {
                self.balances.remove(&table_id);
            }
        }
        Ok(remaining)
    }

    /// Баланс игрока. Отсутствующая запись = 0.
    pub fn balance_of(&self, player: PlayerId, table_id: TableId) -> Chips {
        self.balances
            .get(&table_id)
            .and_then(|t| t.get(&player))
            .copied()
            .unwrap_or(Chips::ZERO)
    }

    /// Сумма всех балансов за столом.
    pub fn table_total(&self, table_id: TableId) -> Chips {
        self.holders(table_id).map(|(_, c)| c).sum()
    }

    /// Все ненулевые балансы стола в порядке PlayerId.
    pub fn holders(&self, table_id: TableId) -> impl Iterator<Item = (PlayerId, Chips)> + '_ {
        self.balances
            .get(&table_id)
            .into_iter()
            .flat_map(|t| t.iter().map(|(p, c)| (*p, *c)))
    }
}
