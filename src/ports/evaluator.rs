use crate::domain::{CardCode, HandRank};

/// Оценщик 7-карточной руки.
///
/// Требование к реализации: полный порядок по силе, детерминированность,
/// никаких побочных эффектов.
pub trait HandEvaluator {
    fn evaluate(&self, cards: &[CardCode; 7]) -> HandRank;
}

/// Обёртка над замыканием – удобно для заглушек в тестах.
#[derive(Clone, Copy, Debug, Default)]
pub struct FnEvaluator<F>(pub F);

impl<F> HandEvaluator for FnEvaluator<F>
where
    F: Fn(&[CardCode; 7]) -> HandRank,
{
    fn evaluate(&self, cards: &[CardCode; 7]) -> HandRank {
        (self.0)(cards)
    }
}

impl<E: HandEvaluator + ?Sized> HandEvaluator for &E {
    fn evaluate(&self, cards: &[CardCode; 7]) -> HandRank {
        (**self).evaluate(cards)
    }
}
