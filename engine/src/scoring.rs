//! Scoring collaborator interface
//!
//! The engine treats hand scoring as an injected capability: anything that can
//! score five encoded cards (lower = stronger) and map a score to one of nine
//! categories can be benchmarked.

use crate::error::BenchError;
use std::fmt;

/// Number of hand categories (Straight Flush .. High Card)
pub const NUM_CATEGORIES: usize = 9;

/// Hand evaluator trait
///
/// Both methods must be pure and total. Implementations are shared read-only
/// across all workers, hence `Sync`.
pub trait HandScorer: Sync {
    /// Score five distinct encoded cards. Lower values represent stronger hands.
    fn score5(&self, cards: [u32; 5]) -> u16;

    /// Category of a score: 1 = Straight Flush .. 9 = High Card, 0 = invalid.
    fn category(&self, score: u16) -> u8;
}

impl<S: HandScorer + ?Sized> HandScorer for &S {
    #[inline(always)]
    fn score5(&self, cards: [u32; 5]) -> u16 {
        (**self).score5(cards)
    }

    #[inline(always)]
    fn category(&self, score: u16) -> u8 {
        (**self).category(score)
    }
}

/// Poker hand classes, numbered the way scorers report them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Category {
    StraightFlush = 1,
    FourOfAKind = 2,
    FullHouse = 3,
    Flush = 4,
    Straight = 5,
    ThreeOfAKind = 6,
    TwoPair = 7,
    OnePair = 8,
    HighCard = 9,
}

impl Category {
    pub const ALL: [Category; NUM_CATEGORIES] = [
        Category::StraightFlush,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::Flush,
        Category::Straight,
        Category::ThreeOfAKind,
        Category::TwoPair,
        Category::OnePair,
        Category::HighCard,
    ];

    /// Category for a 1-based index, `None` for anything outside 1..=9.
    pub fn from_index(index: u8) -> Option<Category> {
        match index {
            1..=9 => Some(Category::ALL[index as usize - 1]),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::StraightFlush => "Straight Flush",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::Flush => "Flush",
            Category::Straight => "Straight",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::TwoPair => "Two Pair",
            Category::OnePair => "One Pair",
            Category::HighCard => "High Card",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hand sizes the evaluator adapter can score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandSize {
    Five,
    Seven,
}

impl HandSize {
    pub fn cards(self) -> usize {
        match self {
            HandSize::Five => 5,
            HandSize::Seven => 7,
        }
    }
}

impl TryFrom<usize> for HandSize {
    type Error = BenchError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            5 => Ok(HandSize::Five),
            7 => Ok(HandSize::Seven),
            _ => Err(BenchError::InvalidHandSize(n)),
        }
    }
}

impl fmt::Display for HandSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-card", self.cards())
    }
}

/// Exact number of 5-card hands per category, out of C(52,5) = 2,598,960
const FIVE_CARD_COUNTS: [u64; NUM_CATEGORIES] =
    [40, 624, 3_744, 5_108, 10_200, 54_912, 123_552, 1_098_240, 1_302_540];

/// Exact number of best-of-7 hands per category, out of C(52,7) = 133,784,560
const SEVEN_CARD_COUNTS: [u64; NUM_CATEGORIES] = [
    41_584, 224_848, 3_473_184, 4_047_644, 6_180_020,
    6_461_620, 31_433_400, 58_627_800, 23_294_460,
];

/// Theoretical share of each category in percent, indexed by `category - 1`.
pub fn reference_percentages(size: HandSize) -> [f64; NUM_CATEGORIES] {
    let counts = match size {
        HandSize::Five => &FIVE_CARD_COUNTS,
        HandSize::Seven => &SEVEN_CARD_COUNTS,
    };
    let total: u64 = counts.iter().sum();
    let mut out = [0.0; NUM_CATEGORIES];
    for (slot, &count) in out.iter_mut().zip(counts.iter()) {
        *slot = count as f64 * 100.0 / total as f64;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_totals() {
        assert_eq!(FIVE_CARD_COUNTS.iter().sum::<u64>(), 2_598_960);
        assert_eq!(SEVEN_CARD_COUNTS.iter().sum::<u64>(), 133_784_560);
    }

    #[test]
    fn test_reference_percentages() {
        let five = reference_percentages(HandSize::Five);
        assert!((five[8] - 50.1177).abs() < 1e-3);
        let seven = reference_percentages(HandSize::Seven);
        assert!((seven[6] - 23.4955).abs() < 1e-3);
        assert!((seven.iter().sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_index_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_index(category.index()), Some(category));
        }
        assert_eq!(Category::from_index(0), None);
        assert_eq!(Category::from_index(10), None);
    }

    #[test]
    fn test_hand_size_parsing() {
        assert_eq!(HandSize::try_from(5), Ok(HandSize::Five));
        assert_eq!(HandSize::try_from(7), Ok(HandSize::Seven));
        assert_eq!(HandSize::try_from(6), Err(BenchError::InvalidHandSize(6)));
        assert_eq!(HandSize::try_from(0), Err(BenchError::InvalidHandSize(0)));
    }
}
