use crate::domain::{Chips, PlayerId};

/// Разделить банк между победителями поровну.
///
/// Остаток от деления достаётся первому победителю в порядке посадки,
/// поэтому сумма выплат всегда равна `pot`. `winners` уже упорядочены.
pub fn split_pot(pot: Chips, winners: &[PlayerId]) -> Vec<(PlayerId, Chips)> {
    let (share, remainder) = pot.split(winners.len());

    winners
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let amount = if i == 0 { share + remainder } else { share };
            (*p, amount)
        })
        .collect()
}
