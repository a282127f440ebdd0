//! Реплей: одинаковые последовательности команд дают одинаковое состояние,
//! снапшот можно сохранить и продолжить с него.

mod common;

use common::*;
use poker_ledger::api::{
    BuyInCommand, Command, CreateTableCommand, DealCardsCommand, PlayHandCommand, RevealCommunityCommand,
    ShowdownCommand,
};
use poker_ledger::domain::{Chips, PlayerId};
use poker_ledger::engine::ActionKind;
use poker_ledger::eval::SevenCardEvaluator;
use poker_ledger::{LedgerConfig, LedgerState, PokerLedger};

fn play(table_id: u64, kind: ActionKind, amount: u128) -> Command {
    Command::PlayHand(PlayHandCommand {
        table_id,
        action_kind: kind as u8,
        amount: Chips(amount),
    })
}

/// Журнал команд одной раздачи. Отклонённые команды тоже в журнале.
fn script() -> Vec<(PlayerId, Command)> {
    let d = Deal::new(&[("As", "Ad"), ("Kh", "Kd")], ["2c", "7d", "9h", "Js", "3c"]);
    let t = 0;
    vec![
        (
            OPERATOR,
            Command::CreateTable(CreateTableCommand {
                buy_in: Chips(100),
                max_players: 3,
                big_blind: Chips(10),
                token: TOKEN,
            }),
        ),
        (1, Command::BuyIn(BuyInCommand { table_id: t, amount: Chips(150) })),
        (2, Command::BuyIn(BuyInCommand { table_id: t, amount: Chips(150) })),
        (
            OPERATOR,
            Command::DealCards(DealCardsCommand {
                table_id: t,
                hole: d.hole_hashes(),
                community: d.community_hashes(),
            }),
        ),
        (2, play(t, ActionKind::Check, 0)),
        (1, play(t, ActionKind::Check, 0)),
        (2, play(t, ActionKind::Raise, 20)),
        (1, play(t, ActionKind::Call, 0)),
        (OPERATOR, Command::RevealCommunity(RevealCommunityCommand { table_id: t, reveals: d.flop() })),
        (1, play(t, ActionKind::Check, 0)),
        (2, play(t, ActionKind::Check, 0)),
        (
            OPERATOR,
            Command::Showdown(ShowdownCommand {
                table_id: t,
                keys: d.keys.clone(),
                hole_cards: d.hole.clone(),
                community: d.community[3..].to_vec(),
            }),
        ),
    ]
}

fn fresh() -> TestLedger<SevenCardEvaluator> {
    let mut ledger = new_ledger(SevenCardEvaluator);
    fund(&mut ledger, 1, 150);
    fund(&mut ledger, 2, 150);
    ledger
}

fn replay(ledger: &mut TestLedger<SevenCardEvaluator>, commands: &[(PlayerId, Command)]) -> usize {
    commands
        .iter()
        .filter(|(caller, command)| ledger.execute(*caller, command.clone()).is_err())
        .count()
}

#[test]
fn same_commands_give_same_snapshot() {
    let mut a = fresh();
    let mut b = fresh();

    let rejected_a = replay(&mut a, &script());
    let rejected_b = replay(&mut b, &script());

    // Первый чек игрока 2 – не в очередь.
    assert_eq!(rejected_a, 1);
    assert_eq!(rejected_b, 1);
    assert_eq!(a.snapshot_json().unwrap(), b.snapshot_json().unwrap());
    assert_eq!(a.events(), b.events());
    assert_eq!(a.chips(1, 0).unwrap(), Chips(170));
}

#[test]
fn command_log_survives_json() {
    let log = serde_json::to_string(&script()).unwrap();
    let parsed: Vec<(PlayerId, Command)> = serde_json::from_str(&log).unwrap();

    let mut direct = fresh();
    let mut from_log = fresh();
    replay(&mut direct, &script());
    replay(&mut from_log, &parsed);

    assert_eq!(direct.snapshot(), from_log.snapshot());
}

#[test]
fn restored_snapshot_continues_identically() {
    let commands = script();
    let (head, tail) = commands.split_at(8);

    let mut uninterrupted = fresh();
    replay(&mut uninterrupted, &commands);

    let mut first = fresh();
    replay(&mut first, head);
    let json = first.snapshot_json().unwrap();
    let (config, _, token, evaluator) = first.into_parts();

    let state: LedgerState = serde_json::from_str(&json).unwrap();
    let mut resumed = PokerLedger::restore(config, state, token, evaluator).unwrap();
    replay(&mut resumed, tail);

    assert_eq!(resumed.snapshot(), uninterrupted.snapshot());
    assert_eq!(resumed.token(), uninterrupted.token());
}

#[test]
fn restore_rejects_invalid_config() {
    let mut config = LedgerConfig::new(OPERATOR);
    config.max_players_cap = 1;
    let ledger = fresh();
    let (_, state, token, evaluator) = ledger.into_parts();
    assert!(PokerLedger::restore(config, state, token, evaluator).is_err());
}
