use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::commit::{CommunityReveal, Digest, HoleCards, HoleHashes, COMMUNITY_CARDS};
use crate::config::{ConfigError, LedgerConfig};
use crate::domain::{
    CardCode, Chips, HandRank, PlayerId, RoundIndex, Table, TableConfig, TableId, TableState,
    TokenId,
};
use crate::engine::{split_pot, Action, ActionKind, ActionReceipt, HandState, Round, RoundOutcome};
use crate::ledger::errors::LedgerError;
use crate::ledger::events::{LedgerEvent, LedgerEventKind};
use crate::ports::{FungibleToken, HandEvaluator};
use crate::state::{LedgerState, TableTreasury};

/// Результат `play_hand`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayOutcome {
    pub receipt: ActionReceipt,
    /// Непусто, только если раздача закончилась без шоудауна.
    pub payouts: Vec<(PlayerId, Chips)>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerScore {
    pub player: PlayerId,
    pub rank: HandRank,
}

/// Итог шоудауна.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownOutcome {
    pub table_id: TableId,
    pub hand: u64,
    pub board: Vec<CardCode>,
    /// Оценки не сфолдивших участников в порядке посадки.
    pub scores: Vec<PlayerScore>,
    /// Выплаты победителям, первый получает остаток от деления.
    pub payouts: Vec<(PlayerId, Chips)>,
}

/// Сверка закона сохранения для стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableAudit {
    pub table_id: TableId,
    pub chips_total: Chips,
    pub pot: Chips,
    pub deposited: Chips,
    pub withdrawn: Chips,
    /// `chips_total + pot == deposited - withdrawn`.
    pub balanced: bool,
}

/// Покерный леджер: реестр столов и единственная внешняя точка входа.
///
/// Каждая мутирующая операция работает на копии состояния и подменяет
/// состояние только при успехе. Вызовы токена идут последними.
#[derive(Debug)]
pub struct PokerLedger<T, E> {
    config: LedgerConfig,
    state: LedgerState,
    token: T,
    evaluator: E,
}

/// Staged-копия состояния на время одной операции.
struct Transaction<'a, T, E> {
    state: LedgerState,
    /// События операции, в журнал – только при успехе.
    events: Vec<LedgerEventKind>,
    config: &'a LedgerConfig,
    token: &'a mut T,
    evaluator: &'a E,
}

impl<T, E> PokerLedger<T, E>
where
    T: FungibleToken,
    E: HandEvaluator,
{
    pub fn new(config: LedgerConfig, token: T, evaluator: E) -> Result<Self, ConfigError> {
        Self::restore(config, LedgerState::new(), token, evaluator)
    }

    /// Поднять леджер из сохранённого снапшота.
    pub fn restore(
        config: LedgerConfig,
        state: LedgerState,
        token: T,
        evaluator: E,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state,
            token,
            evaluator,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn snapshot(&self) -> LedgerState {
        self.state.clone()
    }

    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }

    pub fn token(&self) -> &T {
        &self.token
    }

    /// Доступ к токену вне операций леджера (mint/approve в тестах и CLI).
    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    pub fn into_parts(self) -> (LedgerConfig, LedgerState, T, E) {
        (self.config, self.state, self.token, self.evaluator)
    }

    fn run<R>(
        &mut self,
        op: &'static str,
        caller: PlayerId,
        f: impl FnOnce(&mut Transaction<'_, T, E>) -> Result<R, LedgerError>,
    ) -> Result<R, LedgerError> {
        let mut tx = Transaction {
            state: self.state.staged(),
            events: Vec::new(),
            config: &self.config,
            token: &mut self.token,
            evaluator: &self.evaluator,
        };
        match f(&mut tx) {
            Ok(value) => {
                let Transaction { state, events, .. } = tx;
                self.state.commit(state, events);
                Ok(value)
            }
            Err(err) => {
                warn!(op, caller, error = %err, "operation rejected");
                Err(err)
            }
        }
    }

    // ===== Мутирующие операции =====

    pub fn create_table(
        &mut self,
        caller: PlayerId,
        buy_in: Chips,
        max_players: u8,
        big_blind: Chips,
        token: TokenId,
    ) -> Result<TableId, LedgerError> {
        let config = TableConfig {
            buy_in,
            max_players,
            big_blind,
            token,
        };
        self.run("create_table", caller, |tx| tx.create_table(caller, config))
    }

    /// Купить фишки. Возвращает баланс после зачисления.
    pub fn buy_in(
        &mut self,
        caller: PlayerId,
        table_id: TableId,
        amount: Chips,
    ) -> Result<Chips, LedgerError> {
        self.run("buy_in", caller, |tx| tx.buy_in(caller, table_id, amount))
    }

    /// Вывести фишки в токен. Возвращает остаток.
    pub fn withdraw(
        &mut self,
        caller: PlayerId,
        table_id: TableId,
        amount: Chips,
    ) -> Result<Chips, LedgerError> {
        self.run("withdraw", caller, |tx| tx.withdraw(caller, table_id, amount))
    }

    /// Записать коммитменты и начать раздачу. Возвращает номер раздачи.
    pub fn deal_cards(
        &mut self,
        caller: PlayerId,
        table_id: TableId,
        hole: Vec<HoleHashes>,
        community: [Digest; COMMUNITY_CARDS],
    ) -> Result<u64, LedgerError> {
        self.run("deal_cards", caller, |tx| {
            tx.deal_cards(caller, table_id, &hole, community)
        })
    }

    pub fn play_hand(
        &mut self,
        caller: PlayerId,
        table_id: TableId,
        action_kind: u8,
        amount: Chips,
    ) -> Result<PlayOutcome, LedgerError> {
        self.run("play_hand", caller, |tx| {
            tx.play_hand(caller, table_id, action_kind, amount)
        })
    }

    /// Открыть следующую улицу. Возвращает номер новой улицы.
    pub fn reveal_community(
        &mut self,
        caller: PlayerId,
        table_id: TableId,
        reveals: Vec<CommunityReveal>,
    ) -> Result<RoundIndex, LedgerError> {
        self.run("reveal_community", caller, |tx| {
            tx.reveal_community(caller, table_id, &reveals)
        })
    }

    pub fn showdown(
        &mut self,
        caller: PlayerId,
        table_id: TableId,
        keys: Vec<Digest>,
        hole_cards: Vec<HoleCards>,
        community: Vec<CommunityReveal>,
    ) -> Result<ShowdownOutcome, LedgerError> {
        self.run("showdown", caller, |tx| {
            tx.showdown(caller, table_id, &keys, &hole_cards, &community)
        })
    }

    // ===== Чтение =====

    pub fn table(&self, table_id: TableId) -> Result<&Table, LedgerError> {
        self.state.table(table_id)
    }

    /// Баланс игрока за столом; 0, если записи нет.
    pub fn chips(&self, player: PlayerId, table_id: TableId) -> Result<Chips, LedgerError> {
        self.state.table(table_id)?;
        Ok(self.state.chips.balance_of(player, table_id))
    }

    pub fn round(&self, table_id: TableId, round_index: RoundIndex) -> Result<&Round, LedgerError> {
        self.state.round(table_id, round_index)
    }

    pub fn treasury(&self, table_id: TableId) -> Result<TableTreasury, LedgerError> {
        self.state.treasury(table_id)
    }

    pub fn hand(&self, table_id: TableId) -> Option<&HandState> {
        self.state.hands.get(&table_id)
    }

    pub fn events(&self) -> &[LedgerEvent] {
        self.state.events.all()
    }

    pub fn audit(&self, table_id: TableId) -> Result<TableAudit, LedgerError> {
        let table = self.state.table(table_id)?;
        let treasury = self.state.treasury(table_id)?;
        let chips_total = self.state.chips.table_total(table_id);
        let balanced = match (treasury.held(), chips_total.checked_add(table.pot)) {
            (Some(held), Some(accounted)) => held == accounted,
            _ => false,
        };
        Ok(TableAudit {
            table_id,
            chips_total,
            pot: table.pot,
            deposited: treasury.deposited,
            withdrawn: treasury.withdrawn,
            balanced,
        })
    }
}

impl<'a, T, E> Transaction<'a, T, E>
where
    T: FungibleToken,
    E: HandEvaluator,
{
    fn require_operator(&self, caller: PlayerId) -> Result<(), LedgerError> {
        if self.config.is_operator(caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized { caller })
        }
    }

    fn emit(&mut self, kind: LedgerEventKind) {
        self.events.push(kind);
    }

    fn create_table(&mut self, caller: PlayerId, config: TableConfig) -> Result<TableId, LedgerError> {
        self.require_operator(caller)?;

        if config.max_players < 2 || config.max_players > self.config.max_players_cap {
            return Err(LedgerError::InvalidConfig("число мест вне допустимого диапазона"));
        }
        if config.buy_in.is_zero() {
            return Err(LedgerError::InvalidConfig("бай-ин должен быть больше нуля"));
        }
        if config.big_blind.is_zero() {
            return Err(LedgerError::InvalidConfig("большой блайнд должен быть больше нуля"));
        }

        let table_id = self.state.next_table_id;
        self.state.next_table_id = table_id
            .checked_add(1)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        self.emit(LedgerEventKind::TableCreated {
            table_id,
            buy_in: config.buy_in,
            max_players: config.max_players,
            big_blind: config.big_blind,
            token: config.token,
        });
        info!(
            table_id,
            buy_in = %config.buy_in,
            max_players = config.max_players,
            big_blind = %config.big_blind,
            token = config.token,
            "table created"
        );
        self.state.tables.insert(table_id, Table::new(table_id, config));
        self.state.treasuries.insert(table_id, TableTreasury::default());
        Ok(table_id)
    }

    fn buy_in(&mut self, caller: PlayerId, table_id: TableId, amount: Chips) -> Result<Chips, LedgerError> {
        let table = self.state.table(table_id)?;
        let required = table.config.buy_in;
        let token = table.config.token;
        let seated = table.is_seated(caller);

        if amount < required {
            return Err(LedgerError::BuyInTooLow {
                offered: amount,
                required,
            });
        }
        if !seated && !table.has_free_seat() {
            return Err(LedgerError::TableFull(table_id));
        }

        // Эффекты.
        let balance = self.state.chips.credit(caller, table_id, amount)?;
        let treasury = self.state.treasuries.entry(table_id).or_default();
        treasury.deposited = treasury
            .deposited
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        if !seated {
            self.state.table_mut(table_id)?.seat(caller);
        }
        self.emit(LedgerEventKind::BoughtIn {
            table_id,
            player: caller,
            amount,
            balance,
        });

        // Взаимодействие.
        self.token
            .transfer_from(token, caller, amount)
            .map_err(|e| LedgerError::TokenTransferFailed(e.to_string()))?;

        info!(table_id, player = caller, amount = %amount, balance = %balance, "player bought in");
        Ok(balance)
    }

    fn withdraw(&mut self, caller: PlayerId, table_id: TableId, amount: Chips) -> Result<Chips, LedgerError> {
        let table = self.state.table(table_id)?;
        if !table.is_seated(caller) {
            return Err(LedgerError::PlayerNotSeated {
                player: caller,
                table_id,
            });
        }
        let token = table.config.token;
        let active = table.is_active();

        let in_hand = self
            .state
            .hands
            .get(&table_id)
            .is_some_and(|h| h.is_participant(caller));
        if active && in_hand {
            return Err(LedgerError::TableNotReady {
                table_id,
                reason: "игрок участвует в текущей раздаче",
            });
        }
        if amount.is_zero() {
            return Err(LedgerError::InvalidAction("сумма вывода должна быть больше нуля"));
        }

        let balance = self.state.chips.debit(caller, table_id, amount)?;
        let treasury = self.state.treasuries.entry(table_id).or_default();
        treasury.withdrawn = treasury
            .withdrawn
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.emit(LedgerEventKind::Withdrawn {
            table_id,
            player: caller,
            amount,
            balance,
        });
        if balance.is_zero() && !active {
            self.state.table_mut(table_id)?.unseat(caller);
            self.state.cards.forget_player(caller, table_id);
            self.emit(LedgerEventKind::PlayerUnseated {
                table_id,
                player: caller,
            });
        }

        self.token
            .transfer(token, caller, amount)
            .map_err(|e| LedgerError::TokenTransferFailed(e.to_string()))?;

        info!(table_id, player = caller, amount = %amount, balance = %balance, "player withdrew");
        Ok(balance)
    }

    fn deal_cards(
        &mut self,
        caller: PlayerId,
        table_id: TableId,
        hole: &[HoleHashes],
        community: [Digest; COMMUNITY_CARDS],
    ) -> Result<u64, LedgerError> {
        self.require_operator(caller)?;

        let table = self.state.table(table_id)?;
        if table.is_active() {
            return Err(LedgerError::TableNotReady {
                table_id,
                reason: "раздача уже идёт",
            });
        }
        if table.players.is_empty() {
            return Err(LedgerError::TableNotReady {
                table_id,
                reason: "за столом нет игроков",
            });
        }
        if hole.len() != table.players.len() {
            return Err(LedgerError::TableNotReady {
                table_id,
                reason: "число коммитментов не совпадает с числом игроков",
            });
        }
        let players = table.players.clone();
        let hand = table.hands_played;

        // Коммитменты позиционно: i-й хэш – i-му игроку по порядку посадки.
        for (player, hashes) in players.iter().zip(hole) {
            self.state
                .cards
                .commit(*player, table_id, hand, hashes.hash1, hashes.hash2)?;
        }
        self.state.cards.commit_community(table_id, hand, community)?;

        let round = Round::open(table_id, 0, players.clone())?;
        self.state.rounds.insert(table_id, vec![round]);
        self.state
            .hands
            .insert(table_id, HandState::new(hand, players.clone()));

        let table = self.state.table_mut(table_id)?;
        table.state = TableState::Active;
        table.current_round = 0;
        table.pot = Chips::ZERO;

        info!(table_id, hand, players = players.len(), "cards dealt");
        self.emit(LedgerEventKind::CardsDealt {
            table_id,
            hand,
            players,
        });
        Ok(hand)
    }

    fn play_hand(
        &mut self,
        caller: PlayerId,
        table_id: TableId,
        action_kind: u8,
        amount: Chips,
    ) -> Result<PlayOutcome, LedgerError> {
        if !self.state.table(table_id)?.is_active() {
            return Err(LedgerError::TableNotActive(table_id));
        }
        let action = Action::from_wire(action_kind, amount)?;

        let round_index = self.state.table(table_id)?.current_round;
        let state = &mut self.state;
        let round = state
            .rounds
            .get_mut(&table_id)
            .and_then(|r| r.get_mut(round_index as usize))
            .ok_or(LedgerError::RoundNotFound {
                table_id,
                round_index,
            })?;
        let receipt = round.apply(caller, action, &mut state.chips)?;

        let table = self.state.table_mut(table_id)?;
        table.pot = table
            .pot
            .checked_add(receipt.debited)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let pot = table.pot;

        if action.kind == ActionKind::Fold {
            if let Some(hand) = self.state.hands.get_mut(&table_id) {
                hand.fold(caller);
            }
        }

        self.emit(LedgerEventKind::PlayerActed {
            table_id,
            round_index,
            player: caller,
            action: action.kind,
            debited: receipt.debited,
            pot,
        });
        debug!(
            table_id,
            round_index,
            player = caller,
            action = ?action.kind,
            debited = %receipt.debited,
            pot = %pot,
            "action accepted"
        );

        let mut payouts = Vec::new();
        match receipt.outcome {
            RoundOutcome::Continue { .. } => {}
            RoundOutcome::Complete => {
                self.emit(LedgerEventKind::RoundCompleted {
                    table_id,
                    round_index,
                });
            }
            RoundOutcome::LastPlayerStanding(winner) => {
                if !pot.is_zero() {
                    self.state.chips.credit(winner, table_id, pot)?;
                    self.emit(LedgerEventKind::PotAwarded {
                        table_id,
                        player: winner,
                        amount: pot,
                    });
                }
                payouts.push((winner, pot));
                self.finish_hand(table_id)?;
                info!(table_id, winner, pot = %pot, "hand won uncontested");
            }
        }

        Ok(PlayOutcome { receipt, payouts })
    }

    fn reveal_community(
        &mut self,
        caller: PlayerId,
        table_id: TableId,
        reveals: &[CommunityReveal],
    ) -> Result<RoundIndex, LedgerError> {
        self.require_operator(caller)?;
        if !self.state.table(table_id)?.is_active() {
            return Err(LedgerError::TableNotActive(table_id));
        }

        let round = self.state.current_round(table_id)?;
        if !round.is_complete() {
            return Err(LedgerError::RoundNotComplete);
        }
        let current = round.round_index;
        let next_index = current + 1;
        if next_index >= self.config.max_streets() {
            return Err(LedgerError::InvalidAction("все улицы уже сыграны"));
        }

        // Флоп – три карты, тёрн и ривер – по одной.
        let expected = if current == 0 { 3 } else { 1 };
        if reveals.len() != expected {
            return Err(LedgerError::InvalidReveal("неверное число карт для улицы"));
        }
        let cards = self.reveal_board(table_id, reveals)?;

        let live = self.state.hand(table_id)?.live_players();
        let round = Round::open(table_id, next_index, live)?;
        self.state.rounds.entry(table_id).or_default().push(round);
        self.state.table_mut(table_id)?.current_round = next_index;

        info!(table_id, round_index = next_index, cards = ?cards, "street opened");
        self.emit(LedgerEventKind::StreetOpened {
            table_id,
            round_index: next_index,
            cards,
        });
        Ok(next_index)
    }

    fn showdown(
        &mut self,
        caller: PlayerId,
        table_id: TableId,
        keys: &[Digest],
        hole_cards: &[HoleCards],
        community: &[CommunityReveal],
    ) -> Result<ShowdownOutcome, LedgerError> {
        self.require_operator(caller)?;
        let table = self.state.table(table_id)?;
        if !table.is_active() {
            return Err(LedgerError::TableNotActive(table_id));
        }
        let pot = table.pot;
        if !self.state.current_round(table_id)?.is_complete() {
            return Err(LedgerError::RoundNotComplete);
        }

        let hand = self.state.hand(table_id)?.clone();
        let participants = hand.participants.len();
        if keys.len() != participants || hole_cards.len() != participants {
            return Err(LedgerError::InvalidReveal(
                "число ключей и карт не совпадает с числом участников",
            ));
        }

        // Дораскрыть борд до пяти карт.
        self.reveal_board(table_id, community)?;
        let board: [CardCode; COMMUNITY_CARDS] = self
            .state
            .cards
            .revealed_community(table_id)
            .try_into()
            .map_err(|_| LedgerError::InvalidReveal("борд раскрыт не полностью"))?;

        for ((player, key), cards) in hand.participants.iter().zip(keys).zip(hole_cards) {
            if !cards.card1.is_valid() || !cards.card2.is_valid() {
                return Err(LedgerError::InvalidReveal("код карты вне диапазона"));
            }
            if !self
                .state
                .cards
                .verify(*player, table_id, key, cards.card1, cards.card2)
            {
                return Err(LedgerError::InvalidReveal(
                    "карманные карты не совпадают с коммитментом",
                ));
            }
        }

        let mut seen = BTreeSet::new();
        let all_distinct = board
            .iter()
            .copied()
            .chain(hole_cards.iter().flat_map(|h| [h.card1, h.card2]))
            .all(|card| seen.insert(card));
        if !all_distinct {
            return Err(LedgerError::InvalidReveal("одна карта раскрыта дважды"));
        }

        // Оценка рук. Сфолдившие тоже раскрываются, но не участвуют в дележе.
        let mut scores = Vec::new();
        for (player, cards) in hand.participants.iter().zip(hole_cards) {
            let rank = if hand.folded.contains(player) {
                None
            } else {
                let seven = [
                    cards.card1,
                    cards.card2,
                    board[0],
                    board[1],
                    board[2],
                    board[3],
                    board[4],
                ];
                let rank = self.evaluator.evaluate(&seven);
                scores.push(PlayerScore {
                    player: *player,
                    rank,
                });
                Some(rank)
            };
            self.emit(LedgerEventKind::HoleCardsRevealed {
                table_id,
                player: *player,
                cards: [cards.card1, cards.card2],
                rank,
            });
        }

        let best = scores
            .iter()
            .map(|s| s.rank)
            .max()
            .ok_or(LedgerError::InvalidAction("нет игроков для шоудауна"))?;
        let winners: Vec<PlayerId> = scores
            .iter()
            .filter(|s| s.rank == best)
            .map(|s| s.player)
            .collect();

        let payouts = split_pot(pot, &winners);
        for (player, amount) in &payouts {
            if amount.is_zero() {
                continue;
            }
            self.state.chips.credit(*player, table_id, *amount)?;
            self.emit(LedgerEventKind::PotAwarded {
                table_id,
                player: *player,
                amount: *amount,
            });
        }
        self.finish_hand(table_id)?;

        info!(
            table_id,
            hand = hand.hand,
            winners = winners.len(),
            pot = %pot,
            "showdown settled"
        );
        Ok(ShowdownOutcome {
            table_id,
            hand: hand.hand,
            board: board.to_vec(),
            scores,
            payouts,
        })
    }

    /// Проверить и записать очередные карты борда.
    fn reveal_board(
        &mut self,
        table_id: TableId,
        reveals: &[CommunityReveal],
    ) -> Result<Vec<CardCode>, LedgerError> {
        let mut cards = Vec::with_capacity(reveals.len());
        for reveal in reveals {
            if !reveal.card.is_valid() {
                return Err(LedgerError::InvalidReveal("код карты вне диапазона"));
            }
            if self
                .state
                .cards
                .revealed_community(table_id)
                .contains(&reveal.card)
            {
                return Err(LedgerError::InvalidReveal("карта уже лежит на борде"));
            }
            self.state
                .cards
                .reveal_next_community(table_id, reveal.card, &reveal.key)?;
            cards.push(reveal.card);
        }
        Ok(cards)
    }

    /// Закрыть раздачу: стол снова Inactive, улицы и состояние раздачи удалены,
    /// игроки с нулевым балансом освобождают места вместе с коммитментами.
    /// Коммитменты оставшихся живут до следующей сдачи.
    fn finish_hand(&mut self, table_id: TableId) -> Result<(), LedgerError> {
        self.state.hands.remove(&table_id);
        self.state.rounds.remove(&table_id);

        let busted: Vec<PlayerId> = self
            .state
            .table(table_id)?
            .players
            .iter()
            .copied()
            .filter(|p| self.state.chips.balance_of(*p, table_id).is_zero())
            .collect();

        let table = self.state.table_mut(table_id)?;
        let hand = table.hands_played;
        table.state = TableState::Inactive;
        table.pot = Chips::ZERO;
        table.current_round = 0;
        table.hands_played = hand.checked_add(1).ok_or(LedgerError::ArithmeticOverflow)?;
        for player in &busted {
            table.unseat(*player);
        }

        for player in busted {
            self.state.cards.forget_player(player, table_id);
            self.emit(LedgerEventKind::PlayerUnseated { table_id, player });
        }
        self.emit(LedgerEventKind::HandSettled { table_id, hand });
        Ok(())
    }
}
