//! Общие хелперы интеграционных тестов леджера.
#![allow(dead_code)]

use poker_ledger::commit::{keccak256, CommunityReveal, Digest, HoleCards, HoleHashes, COMMUNITY_CARDS};
use poker_ledger::domain::{CardCode, Chips, PlayerId, TableId, TokenId};
use poker_ledger::engine::ActionKind;
use poker_ledger::ledger::ShowdownOutcome;
use poker_ledger::ports::{HandEvaluator, InMemoryToken};
use poker_ledger::{LedgerConfig, PokerLedger};

pub const OPERATOR: PlayerId = 0;
pub const TOKEN: TokenId = 7;

pub type TestLedger<E> = PokerLedger<InMemoryToken, E>;

pub fn card(s: &str) -> CardCode {
    s.parse().unwrap()
}

pub fn key(tag: &str) -> Digest {
    keccak256(tag.as_bytes())
}

/// Заранее известная раздача: карманные карты, ключи и борд.
#[derive(Clone, Debug)]
pub struct Deal {
    pub hole: Vec<HoleCards>,
    pub keys: Vec<Digest>,
    pub community: [CommunityReveal; COMMUNITY_CARDS],
}

impl Deal {
    pub fn new(hole: &[(&str, &str)], board: [&str; COMMUNITY_CARDS]) -> Self {
        let hole_cards = hole
            .iter()
            .map(|(a, b)| HoleCards::new(card(a), card(b)))
            .collect();
        let keys = (0..hole.len()).map(|i| key(&format!("hole-{i}"))).collect();
        let mut position = 0;
        let community = board.map(|c| {
            position += 1;
            CommunityReveal {
                card: card(c),
                key: key(&format!("board-{position}")),
            }
        });
        Self {
            hole: hole_cards,
            keys,
            community,
        }
    }

    pub fn hole_hashes(&self) -> Vec<HoleHashes> {
        self.hole
            .iter()
            .zip(&self.keys)
            .map(|(cards, key)| HoleHashes::commit(*cards, key))
            .collect()
    }

    pub fn community_hashes(&self) -> [Digest; COMMUNITY_CARDS] {
        self.community.map(|r| r.commitment())
    }

    pub fn flop(&self) -> Vec<CommunityReveal> {
        self.community[..3].to_vec()
    }

    pub fn turn(&self) -> Vec<CommunityReveal> {
        self.community[3..4].to_vec()
    }

    pub fn river(&self) -> Vec<CommunityReveal> {
        self.community[4..].to_vec()
    }

    /// Карты, которые открывают улицу `round_index` (1 = флоп).
    pub fn street(&self, round_index: u8) -> Vec<CommunityReveal> {
        match round_index {
            1 => self.flop(),
            2 => self.turn(),
            3 => self.river(),
            _ => Vec::new(),
        }
    }
}

pub fn new_ledger<E: HandEvaluator>(evaluator: E) -> TestLedger<E> {
    PokerLedger::new(LedgerConfig::new(OPERATOR), InMemoryToken::new(), evaluator).unwrap()
}

/// Начислить игроку токены и разрешить леджеру их списать.
pub fn fund<E: HandEvaluator>(ledger: &mut TestLedger<E>, player: PlayerId, amount: u128) {
    ledger.token_mut().mint(TOKEN, player, Chips(amount)).unwrap();
    ledger.token_mut().approve(TOKEN, player, Chips(amount));
}

pub fn open_table<E: HandEvaluator>(ledger: &mut TestLedger<E>, buy_in: u128, max_players: u8) -> TableId {
    ledger
        .create_table(OPERATOR, Chips(buy_in), max_players, Chips(10), TOKEN)
        .unwrap()
}

pub fn seat<E: HandEvaluator>(ledger: &mut TestLedger<E>, table_id: TableId, player: PlayerId, amount: u128) {
    fund(ledger, player, amount);
    ledger.buy_in(player, table_id, Chips(amount)).unwrap();
}

/// Стол с бай-ином 100 на 3 места и игроками по `stack` фишек.
pub fn table_with<E: HandEvaluator>(ledger: &mut TestLedger<E>, players: &[PlayerId], stack: u128) -> TableId {
    let table_id = open_table(ledger, 100, 3u8.max(players.len() as u8));
    for p in players {
        seat(ledger, table_id, *p, stack);
    }
    table_id
}

pub fn deal<E: HandEvaluator>(ledger: &mut TestLedger<E>, table_id: TableId, deal: &Deal) -> u64 {
    ledger
        .deal_cards(OPERATOR, table_id, deal.hole_hashes(), deal.community_hashes())
        .unwrap()
}

pub fn act<E: HandEvaluator>(
    ledger: &mut TestLedger<E>,
    table_id: TableId,
    player: PlayerId,
    kind: ActionKind,
    amount: u128,
) {
    ledger
        .play_hand(player, table_id, kind as u8, Chips(amount))
        .unwrap();
}

/// Все оставшиеся игроки чекают до конца улицы.
pub fn check_around<E: HandEvaluator>(ledger: &mut TestLedger<E>, table_id: TableId) {
    let round_index = ledger.table(table_id).unwrap().current_round;
    while !ledger.round(table_id, round_index).unwrap().is_complete() {
        let player = ledger.round(table_id, round_index).unwrap().current_turn;
        act(ledger, table_id, player, ActionKind::Check, 0);
    }
}

/// Текущая улица должна быть завершена. Открывает оставшиеся улицы
/// с чеками и проводит шоудаун.
pub fn check_down_and_showdown<E: HandEvaluator>(
    ledger: &mut TestLedger<E>,
    table_id: TableId,
    deal: &Deal,
) -> ShowdownOutcome {
    let streets = [deal.flop(), deal.turn(), deal.river()];
    let from = ledger.table(table_id).unwrap().current_round as usize;
    for reveal in streets.into_iter().skip(from) {
        ledger.reveal_community(OPERATOR, table_id, reveal).unwrap();
        check_around(ledger, table_id);
    }
    ledger
        .showdown(OPERATOR, table_id, deal.keys.clone(), deal.hole.clone(), Vec::new())
        .unwrap()
}
