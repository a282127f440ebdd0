//! Инфраструктурный слой вокруг леджера:
//! - RNG-реализации;
//! - оффчейн-дилер, который готовит коммитменты (только native).

pub mod rng;

#[cfg(not(target_arch = "wasm32"))]
pub mod dealer;

pub use rng::*;

#[cfg(not(target_arch = "wasm32"))]
pub use dealer::{DealError, Dealer, DealtHand};
