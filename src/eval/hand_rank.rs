use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];
}

impl HandRank {
    /// Собрать HandRank из категории и значимых рангов (от старшего к младшему).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Rank: 2..14 (2..A) влазит в 4 бита, пустые позиции – нули.
    /// Лишние ранги после пятого игнорируются.
    pub fn from_category_and_ranks(category: HandCategory, ranks: &[Rank]) -> Self {
        let mut value = (category as u32) & 0x0F;
        for i in 0..5 {
            let nibble = ranks.get(i).map(|r| r.value() as u32).unwrap_or(0);
            value = (value << 4) | nibble;
        }
        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        let cat_id = ((self.0 >> 20) & 0x0F) as usize;
        HandCategory::ALL
            .get(cat_id)
            .copied()
            .unwrap_or(HandCategory::HighCard)
    }

    /// Значимые ранги (без пустых позиций).
    pub fn ranks(&self) -> Vec<Rank> {
        (0..5)
            .rev()
            .map(|i| ((self.0 >> (i * 4)) & 0x0F) as u8)
            .filter_map(Rank::from_value)
            .collect()
    }
}

/// Человеческое описание руки: категория и старшая значимая карта.
pub fn describe_hand(rank: HandRank) -> String {
    let name = match rank.category() {
        HandCategory::HighCard => "High card",
        HandCategory::OnePair => "One pair",
        HandCategory::TwoPair => "Two pair",
        HandCategory::ThreeOfAKind => "Three of a kind",
        HandCategory::Straight => "Straight",
        HandCategory::Flush => "Flush",
        HandCategory::FullHouse => "Full house",
        HandCategory::FourOfAKind => "Four of a kind",
        HandCategory::StraightFlush => "Straight flush",
    };
    match rank.ranks().first() {
        Some(top) => format!("{name} ({top})"),
        None => name.to_string(),
    }
}
