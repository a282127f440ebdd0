//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основная функция:
//!   `evaluate_seven(cards) -> Option<HandRank>`
//!
//! `SevenCardEvaluator` подключает её к леджеру через `HandEvaluator`.

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate_cards, evaluate_seven};
pub use hand_rank::{describe_hand, HandCategory};

use crate::domain::{CardCode, HandRank};
use crate::ports::evaluator::HandEvaluator;

/// Эталонный оценщик для леджера.
#[derive(Clone, Copy, Debug, Default)]
pub struct SevenCardEvaluator;

impl HandEvaluator for SevenCardEvaluator {
    /// Леджер передаёт только проверенные коды 0..52. Некорректный ввод
    /// оценивается как самая слабая рука.
    fn evaluate(&self, cards: &[CardCode; 7]) -> HandRank {
        evaluate_seven(cards).unwrap_or_default()
    }
}
