use crate::domain::card::{CardCode, Rank};
use crate::domain::hand::HandRank;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, rank_at, top_ranks, RankMask};

/// Оценить лучшую 5-карточную руку из 5..=7 карт.
///
/// Смотрим сразу на все карты через маски рангов и мастей, без перебора
/// комбинаций. `None`, если карт меньше 5 или больше 7 либо есть код вне 0..52.
/// Дубликаты не проверяются – это делает вызывающая сторона.
pub fn evaluate_cards(cards: &[CardCode]) -> Option<HandRank> {
    if !(5..=7).contains(&cards.len()) {
        return None;
    }

    let mut rank_counts = [0u8; 13];
    let mut rank_mask: RankMask = 0;
    let mut suit_masks: [RankMask; 4] = [0; 4];

    for card in cards {
        if !card.is_valid() {
            return None;
        }
        let r = card.rank_index();
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
        suit_masks[card.suit_index() as usize] |= 1 << r;
    }

    let flush_mask = suit_masks.iter().copied().find(|m| m.count_ones() >= 5);

    if let Some(high) = flush_mask.and_then(detect_straight) {
        return Some(HandRank::from_category_and_ranks(
            HandCategory::StraightFlush,
            &[high],
        ));
    }

    let quads = ranks_with_count(&rank_counts, 4);
    let trips = ranks_with_count(&rank_counts, 3);
    let pairs = ranks_with_count(&rank_counts, 2);

    if let Some(&q) = quads.first() {
        let kicker = top_ranks(rank_mask & !(1 << q), 1);
        return Some(build(HandCategory::FourOfAKind, &[q], &kicker));
    }

    if let Some(&t) = trips.first() {
        // Вторая тройка тоже годится как пара для фулл-хауса.
        let pair = trips.iter().skip(1).chain(pairs.iter()).copied().max();
        if let Some(p) = pair {
            return Some(build(HandCategory::FullHouse, &[t, p], &[]));
        }
    }

    if let Some(fm) = flush_mask {
        return Some(build(HandCategory::Flush, &top_ranks(fm, 5), &[]));
    }

    if let Some(high) = detect_straight(rank_mask) {
        return Some(HandRank::from_category_and_ranks(HandCategory::Straight, &[high]));
    }

    if let Some(&t) = trips.first() {
        let kickers = top_ranks(rank_mask & !(1 << t), 2);
        return Some(build(HandCategory::ThreeOfAKind, &[t], &kickers));
    }

    if let [p0, p1, ..] = pairs.as_slice() {
        let kicker = top_ranks(rank_mask & !(1 << p0) & !(1 << p1), 1);
        return Some(build(HandCategory::TwoPair, &[*p0, *p1], &kicker));
    }

    if let Some(&p) = pairs.first() {
        let kickers = top_ranks(rank_mask & !(1 << p), 3);
        return Some(build(HandCategory::OnePair, &[p], &kickers));
    }

    Some(build(HandCategory::HighCard, &top_ranks(rank_mask, 5), &[]))
}

/// Оценка ровно 7 карт: 2 карманные + 5 общих.
pub fn evaluate_seven(cards: &[CardCode; 7]) -> Option<HandRank> {
    evaluate_cards(cards)
}

/// Индексы рангов, встречающихся ровно `count` раз, от старшего к младшему.
fn ranks_with_count(counts: &[u8; 13], count: u8) -> Vec<u8> {
    (0..13u8).rev().filter(|i| counts[*i as usize] == count).collect()
}

fn build(category: HandCategory, main: &[u8], kickers: &[u8]) -> HandRank {
    let ranks: Vec<Rank> = main
        .iter()
        .chain(kickers.iter())
        .filter_map(|i| rank_at(*i))
        .collect();
    HandRank::from_category_and_ranks(category, &ranks)
}
