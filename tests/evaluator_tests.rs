//! Оценщик 7-карточных рук: порядок категорий, кикеры, крайние случаи.

use poker_ledger::domain::{CardCode, HandRank};
use poker_ledger::eval::{describe_hand, evaluate_cards, evaluate_seven, HandCategory, SevenCardEvaluator};
use poker_ledger::ports::HandEvaluator;

/// Семь карт из строки вида "As Kd 2c ...".
fn seven(cards: &str) -> [CardCode; 7] {
    let parsed: Vec<CardCode> = cards.split_whitespace().map(|c| c.parse().unwrap()).collect();
    parsed.try_into().unwrap()
}

fn rank(cards: &str) -> HandRank {
    evaluate_seven(&seven(cards)).unwrap()
}

//
// ============= ТЕСТ 1: категории ============
//
#[test]
fn categories_are_detected() {
    let cases = [
        ("9c Tc Jc Qc Kc 2d 3h", HandCategory::StraightFlush),
        ("Kc Kd Kh Ks 2d 3h 9c", HandCategory::FourOfAKind),
        ("Kc Kd Kh 2s 2d 3h 9c", HandCategory::FullHouse),
        ("2h 7h 9h Jh Kh 3c 4d", HandCategory::Flush),
        ("5c 6d 7h 8s 9c Kd 2h", HandCategory::Straight),
        ("Qc Qd Qh 2s 7d 9h Kc", HandCategory::ThreeOfAKind),
        ("Qc Qd 7h 7s 2d 9h Kc", HandCategory::TwoPair),
        ("Qc Qd 7h 3s 2d 9h Kc", HandCategory::OnePair),
        ("Ac Qd 7h 3s 2d 9h Kc", HandCategory::HighCard),
    ];
    for (cards, expected) in cases {
        assert_eq!(rank(cards).category(), expected, "руки {cards}");
    }
}

#[test]
fn category_order_is_strict() {
    let ordered = [
        "Ac Qd 7h 3s 2d 9h Kc",
        "Qc Qd 7h 3s 2d 9h Kc",
        "Qc Qd 7h 7s 2d 9h Kc",
        "Qc Qd Qh 2s 7d 9h Kc",
        "5c 6d 7h 8s 9c Kd 2h",
        "2h 7h 9h Jh Kh 3c 4d",
        "Kc Kd Kh 2s 2d 3h 9c",
        "Kc Kd Kh Ks 2d 3h 9c",
        "9c Tc Jc Qc Kc 2d 3h",
    ];
    for pair in ordered.windows(2) {
        assert!(rank(pair[0]) < rank(pair[1]), "{} должна быть слабее {}", pair[0], pair[1]);
    }
}

//
// ============= ТЕСТ 2: стриты ============
//
#[test]
fn wheel_is_lowest_straight() {
    let wheel = rank("Ac 2d 3h 4s 5c Kd 9h");
    let six_high = rank("2c 3d 4h 5s 6c Kd 9h");
    assert_eq!(wheel.category(), HandCategory::Straight);
    assert!(wheel < six_high);
    assert_eq!(describe_hand(wheel), "Straight (5)");
}

#[test]
fn longest_run_gives_highest_straight() {
    let r = rank("4c 5d 6h 7s 8c 9d 2h");
    assert_eq!(r, rank("5c 6d 7h 8s 9c 2d 3h"));
    assert_eq!(describe_hand(r), "Straight (9)");
}

#[test]
fn flush_beats_straight_on_same_board() {
    // Стрит 5-9 на борде, у второго игрока флеш в червах.
    let straight = rank("Kc Kd 5h 6h 7s 8h 9c");
    let flush = rank("2h Ah 5h 6h 7s 8h 9c");
    assert!(flush > straight);
}

//
// ============= ТЕСТ 3: кикеры ============
//
#[test]
fn kicker_decides_between_equal_pairs() {
    let ace_kicker = rank("Qc Qd Ah 3s 2d 9h 7c");
    let king_kicker = rank("Qh Qs Kh 3s 2d 9h 7c");
    assert!(ace_kicker > king_kicker);
}

#[test]
fn only_five_best_cards_count() {
    // Шестая и седьмая карта не влияют на силу.
    let a = rank("Ac Kd Qh Js 9c 3d 2h");
    let b = rank("Ad Kh Qs Jc 9d 4h 3c");
    assert_eq!(a, b);
}

#[test]
fn two_full_houses_prefer_higher_trips() {
    let nines_full = rank("9c 9d 9h 2s 2d Kh Kc");
    assert_eq!(nines_full.category(), HandCategory::FullHouse);
    assert_eq!(describe_hand(nines_full), "Full house (9)");

    // Две тройки: вторая идёт как пара.
    let double_trips = rank("9c 9d 9h Ks Kd Kh 2c");
    assert_eq!(double_trips.category(), HandCategory::FullHouse);
    assert!(double_trips > nines_full);
}

#[test]
fn three_pairs_use_best_two_and_best_kicker() {
    let r = rank("Ac Ad Kh Ks 2d 2h 7c");
    assert_eq!(r.category(), HandCategory::TwoPair);
    assert!(r > rank("Ac Ad Kh Ks 3d 4h 2c"));
}

//
// ============= ТЕСТ 4: некорректный ввод ============
//
#[test]
fn invalid_input_is_rejected() {
    let mut cards = seven("Ac Kd Qh Js 9c 3d 2h");
    cards[3] = CardCode(52);
    assert!(evaluate_seven(&cards).is_none());
    assert_eq!(SevenCardEvaluator.evaluate(&cards), HandRank::default());

    let four: Vec<CardCode> = seven("Ac Kd Qh Js 9c 3d 2h")[..4].to_vec();
    assert!(evaluate_cards(&four).is_none());
}

#[test]
fn five_card_hands_are_supported() {
    let five: Vec<CardCode> = ["Ts", "Js", "Qs", "Ks", "As"]
        .iter()
        .map(|c| c.parse().unwrap())
        .collect();
    let r = evaluate_cards(&five).unwrap();
    assert_eq!(r.category(), HandCategory::StraightFlush);
    assert_eq!(describe_hand(r), "Straight flush (A)");
}

#[test]
fn evaluator_port_matches_free_function() {
    let cards = seven("Kc Kd Kh 2s 2d 3h 9c");
    assert_eq!(SevenCardEvaluator.evaluate(&cards), rank("Kc Kd Kh 2s 2d 3h 9c"));
}
