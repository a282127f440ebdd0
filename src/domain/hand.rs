use core::fmt;

use serde::{Deserialize, Serialize};

/// Сила 7-карточной руки. Больше – сильнее, равные значения – ничья.
///
/// Кодирование задаёт оценщик; леджер только сравнивает значения.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#08x}", self.0)
    }
}
