//! Доменная модель: карты, фишки, колода, столы, сила руки.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod table;

// Идентификаторы. На Linera это были бы AccountOwner / ApplicationId,
// но для движка достаточно числовых.
pub type PlayerId = u64;
pub type TableId = u64;
pub type TokenId = u64;

pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use table::*;
