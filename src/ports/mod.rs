//! Внешние порты леджера: токен, которым покупаются фишки, и оценщик рук.
//!
//! Реализации подставляются снаружи; в крейте есть in-memory токен и
//! `eval::SevenCardEvaluator`.

pub mod evaluator;
pub mod token;

pub use evaluator::{FnEvaluator, HandEvaluator};
pub use token::{FungibleToken, InMemoryToken, TokenError};
