//! Движок улицы: очередь хода, check/call/raise/fold, завершение улицы.

use poker_ledger::domain::Chips;
use poker_ledger::engine::positions::{next_in_order, remaining_in_order};
use poker_ledger::engine::{split_pot, Action, ActionKind, Round, RoundOutcome, RoundStatus};
use poker_ledger::ledger::{ChipLedger, LedgerError};

const TABLE: u64 = 0;

fn setup(players: &[u64], stack: u128) -> (Round, ChipLedger) {
    let mut chips = ChipLedger::new();
    for p in players {
        chips.credit(*p, TABLE, Chips(stack)).unwrap();
    }
    let round = Round::open(TABLE, 0, players.to_vec()).unwrap();
    (round, chips)
}

//
// ============= ТЕСТ 1: начальное состояние ============
//
#[test]
fn open_round_starts_with_first_player_and_zero_bet() {
    let (round, _) = setup(&[1, 2, 3], 100);

    assert_eq!(round.current_turn, 1);
    assert_eq!(round.highest_chip, Chips::ZERO);
    assert_eq!(round.pot, Chips::ZERO);
    assert_eq!(round.status, RoundStatus::AwaitingAction);
}

#[test]
fn open_round_without_players_is_rejected() {
    assert!(matches!(
        Round::open(TABLE, 0, Vec::new()),
        Err(LedgerError::TableNotReady { .. })
    ));
}

//
// ============= ТЕСТ 2: check → raise → call ============
//
#[test]
fn check_raise_call_completes_heads_up_round() {
    let (mut round, mut chips) = setup(&[1, 2], 150);

    let r = round.apply(1, Action::check(), &mut chips).unwrap();
    assert_eq!(r.outcome, RoundOutcome::Continue { next_turn: 2 });
    assert_eq!(round.highest_chip, Chips::ZERO);

    let r = round.apply(2, Action::raise(Chips(20)), &mut chips).unwrap();
    assert_eq!(r.debited, Chips(20));
    assert_eq!(r.outcome, RoundOutcome::Continue { next_turn: 1 });

    let r = round.apply(1, Action::call(), &mut chips).unwrap();
    assert_eq!(r.debited, Chips(20));
    assert_eq!(r.outcome, RoundOutcome::Complete);

    assert_eq!(round.highest_chip, Chips(20));
    assert_eq!(round.pot, Chips(40));
    assert!(round.is_complete());
    assert_eq!(chips.balance_of(1, TABLE), Chips(130));
    assert_eq!(chips.balance_of(2, TABLE), Chips(130));
}

#[test]
fn all_checks_complete_round() {
    let (mut round, mut chips) = setup(&[1, 2, 3], 50);
    round.apply(1, Action::check(), &mut chips).unwrap();
    round.apply(2, Action::check(), &mut chips).unwrap();
    let r = round.apply(3, Action::check(), &mut chips).unwrap();

    assert_eq!(r.outcome, RoundOutcome::Complete);
    assert_eq!(round.pot, Chips::ZERO);
}

//
// ============= ТЕСТ 3: рейз заново открывает торговлю ============
//
#[test]
fn raise_reopens_action_for_players_who_already_acted() {
    let (mut round, mut chips) = setup(&[1, 2, 3], 500);

    round.apply(1, Action::raise(Chips(10)), &mut chips).unwrap();
    round.apply(2, Action::call(), &mut chips).unwrap();
    // Игрок 3 перебивает – 1 и 2 должны ходить снова.
    round.apply(3, Action::raise(Chips(30)), &mut chips).unwrap();
    assert_eq!(round.acted.len(), 1);
    assert_eq!(round.current_turn, 1);

    // Ре-рейз списывает только разницу с уже внесённым.
    let r = round.apply(1, Action::call(), &mut chips).unwrap();
    assert_eq!(r.debited, Chips(20));
    assert_eq!(r.outcome, RoundOutcome::Continue { next_turn: 2 });

    let r = round.apply(2, Action::call(), &mut chips).unwrap();
    assert_eq!(r.outcome, RoundOutcome::Complete);
    assert_eq!(round.pot, Chips(90));
    assert_eq!(chips.balance_of(3, TABLE), Chips(470));
}

#[test]
fn raise_amount_is_total_contribution_for_round() {
    let (mut round, mut chips) = setup(&[1, 2], 500);
    round.apply(1, Action::raise(Chips(10)), &mut chips).unwrap();
    round.apply(2, Action::raise(Chips(25)), &mut chips).unwrap();

    let r = round.apply(1, Action::raise(Chips(60)), &mut chips).unwrap();
    assert_eq!(r.debited, Chips(50), "уже было внесено 10");
    assert_eq!(round.contribution_of(1), Chips(60));
}

//
// ============= ТЕСТ 4: отклонённые действия не меняют улицу ============
//
#[test]
fn out_of_turn_action_is_rejected_without_changes() {
    let (mut round, mut chips) = setup(&[1, 2], 100);
    let before = round.clone();
    let chips_before = chips.clone();

    assert_eq!(
        round.apply(2, Action::check(), &mut chips),
        Err(LedgerError::NotPlayersTurn(2))
    );
    assert_eq!(round, before);
    assert_eq!(chips, chips_before);
}

#[test]
fn raise_not_above_highest_is_invalid() {
    let (mut round, mut chips) = setup(&[1, 2], 100);
    round.apply(1, Action::raise(Chips(20)), &mut chips).unwrap();

    assert!(matches!(
        round.apply(2, Action::raise(Chips(20)), &mut chips),
        Err(LedgerError::InvalidAction(_))
    ));
    assert!(matches!(
        round.apply(2, Action::raise(Chips::ZERO), &mut chips),
        Err(LedgerError::InvalidAction(_))
    ));
    assert_eq!(round.highest_chip, Chips(20));
}

#[test]
fn check_facing_bet_and_check_with_amount_are_invalid() {
    let (mut round, mut chips) = setup(&[1, 2], 100);
    assert!(matches!(
        round.apply(1, Action { kind: ActionKind::Check, amount: Chips(5) }, &mut chips),
        Err(LedgerError::InvalidAction(_))
    ));

    round.apply(1, Action::raise(Chips(20)), &mut chips).unwrap();
    assert!(matches!(
        round.apply(2, Action::check(), &mut chips),
        Err(LedgerError::InvalidAction(_))
    ));
}

#[test]
fn call_with_nothing_to_call_is_invalid() {
    let (mut round, mut chips) = setup(&[1, 2], 100);
    assert!(matches!(
        round.apply(1, Action::call(), &mut chips),
        Err(LedgerError::InvalidAction(_))
    ));
}

#[test]
fn call_without_enough_chips_fails_atomically() {
    let mut chips = ChipLedger::new();
    chips.credit(1, TABLE, Chips(100)).unwrap();
    chips.credit(2, TABLE, Chips(15)).unwrap();
    let mut round = Round::open(TABLE, 0, vec![1, 2]).unwrap();

    round.apply(1, Action::raise(Chips(40)), &mut chips).unwrap();
    let before = round.clone();

    assert_eq!(
        round.apply(2, Action::call(), &mut chips),
        Err(LedgerError::InsufficientChips {
            needed: Chips(40),
            available: Chips(15),
        })
    );
    assert_eq!(round, before);
    assert_eq!(chips.balance_of(2, TABLE), Chips(15));
}

#[test]
fn action_on_complete_round_is_invalid() {
    let (mut round, mut chips) = setup(&[1, 2], 100);
    round.apply(1, Action::check(), &mut chips).unwrap();
    round.apply(2, Action::check(), &mut chips).unwrap();

    // Ход остаётся у последнего сходившего, но улица закрыта.
    let turn = round.current_turn;
    assert!(matches!(
        round.apply(turn, Action::check(), &mut chips),
        Err(LedgerError::InvalidAction(_))
    ));
}

#[test]
fn unknown_wire_code_is_invalid() {
    assert_eq!(
        Action::from_wire(2, Chips::ZERO),
        Ok(Action::check())
    );
    assert!(matches!(
        Action::from_wire(9, Chips::ZERO),
        Err(LedgerError::InvalidAction(_))
    ));
}

//
// ============= ТЕСТ 5: фолд ============
//
#[test]
fn fold_skips_player_and_last_one_standing_wins() {
    let (mut round, mut chips) = setup(&[1, 2, 3], 100);
    round.apply(1, Action::raise(Chips(10)), &mut chips).unwrap();

    let r = round.apply(2, Action::fold(), &mut chips).unwrap();
    assert_eq!(r.outcome, RoundOutcome::Continue { next_turn: 3 });
    assert_eq!(round.players, vec![1, 3]);

    let r = round.apply(3, Action::fold(), &mut chips).unwrap();
    assert_eq!(r.outcome, RoundOutcome::LastPlayerStanding(1));
    assert!(round.is_complete());
}

#[test]
fn fold_can_complete_round_for_remaining_players() {
    let (mut round, mut chips) = setup(&[1, 2, 3], 100);
    round.apply(1, Action::raise(Chips(10)), &mut chips).unwrap();
    round.apply(2, Action::call(), &mut chips).unwrap();

    let r = round.apply(3, Action::fold(), &mut chips).unwrap();
    assert_eq!(r.outcome, RoundOutcome::Complete);
    assert_eq!(round.pot, Chips(20));
}

//
// ============= ТЕСТ 6: порядок и дележ ============
//
#[test]
fn positions_wrap_around() {
    assert_eq!(next_in_order(&[4, 8, 9], 9), Some(4));
    assert_eq!(next_in_order(&[4, 8, 9], 4), Some(8));
    assert_eq!(next_in_order(&[4, 8, 9], 100), Some(4));
    assert_eq!(next_in_order(&[], 1), None);
    assert_eq!(remaining_in_order(&[4, 8, 9], |p| p == 8), vec![4, 9]);
}

#[test]
fn split_pot_gives_remainder_to_first_winner() {
    assert_eq!(split_pot(Chips(41), &[5, 2]), vec![(5, Chips(21)), (2, Chips(20))]);
    assert_eq!(split_pot(Chips(40), &[3]), vec![(3, Chips(40))]);
    assert_eq!(
        split_pot(Chips(2), &[1, 2, 3]),
        vec![(1, Chips(2)), (2, Chips::ZERO), (3, Chips::ZERO)]
    );
    assert!(split_pot(Chips(10), &[]).is_empty());
}
