use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз. Совпадает с `CardCode::rank_index`.
pub type RankMask = u16;

/// Маски всех стритов, индекс = индекс старшей карты минус 3.
///
///   0: A2345 (wheel), старшая – пятёрка
///   ...
///   9: TJQKA (broadway)
pub const STRAIGHT_MASKS: [RankMask; 10] = [
    mask_from_ranks(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]),
    mask_from_ranks(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]),
    mask_from_ranks(&[Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven]),
    mask_from_ranks(&[Rank::Four, Rank::Five, Rank::Six, Rank::Seven, Rank::Eight]),
    mask_from_ranks(&[Rank::Five, Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine]),
    mask_from_ranks(&[Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten]),
    mask_from_ranks(&[Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack]),
    mask_from_ranks(&[Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen]),
    mask_from_ranks(&[Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King]),
    mask_from_ranks(&[Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]),
];

/// Построить маску из списка рангов.
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        let idx = (ranks[i] as u8) - 2;
        mask |= 1 << idx;
        i += 1;
    }
    mask
}

/// Ранг по индексу бита маски (0 = двойка).
pub fn rank_at(index: u8) -> Option<Rank> {
    Rank::ALL.get(index as usize).copied()
}

/// Индексы установленных битов, от старшего к младшему, не больше `n`.
pub fn top_ranks(mask: RankMask, n: usize) -> Vec<u8> {
    (0..13u8).rev().filter(|i| mask & (1 << i) != 0).take(n).collect()
}

/// Найти стрит в битовой маске рангов.
/// Возвращает старшую карту стрита, если он есть.
///
/// Особый случай: wheel (A2345) → возвращаем Rank::Five.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    STRAIGHT_MASKS
        .iter()
        .enumerate()
        .rev()
        .find(|(_, sm)| rank_mask & **sm == **sm)
        .and_then(|(i, _)| rank_at(i as u8 + 3))
}
