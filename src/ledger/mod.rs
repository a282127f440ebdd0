//! Леджер: балансы фишек, журнал событий и реестр столов.
//!
//! `PokerLedger` – единственная поверхность, которую вызывают снаружи.
//! Каждая операция атомарна: либо применяются все эффекты, либо ни одного.

pub mod chips;
pub mod errors;
pub mod events;
pub mod registry;

pub use chips::ChipLedger;
pub use errors::LedgerError;
pub use events::{EventLog, LedgerEvent, LedgerEventKind};
pub use registry::{PlayOutcome, PlayerScore, PokerLedger, ShowdownOutcome, TableAudit};
