use crate::domain::PlayerId;

/// Следующий игрок по кругу после `current` (с переходом через конец).
///
/// Если `current` в списке нет, ход получает первый игрок.
pub fn next_in_order(players: &[PlayerId], current: PlayerId) -> Option<PlayerId> {
    if players.is_empty() {
        return None;
    }
    let next_idx = match players.iter().position(|p| *p == current) {
        Some(idx) => (idx + 1) % players.len(),
        None => 0,
    };
    players.get(next_idx).copied()
}

/// Оставить из `seated` только тех, кто не в `excluded`, сохранив порядок посадки.
pub fn remaining_in_order(seated: &[PlayerId], excluded: impl Fn(PlayerId) -> bool) -> Vec<PlayerId> {
    seated.iter().copied().filter(|p| !excluded(*p)).collect()
}
