//! Hand categories.

use serde::{Deserialize, Serialize};

/// Poker-style hand category, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandCategory {
    /// All categories, weakest first.
    pub const ALL: [HandCategory; 10] = [
        HandCategory::HighCard,
        HandCategory::Pair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];

    /// Base strength of the category.
    ///
    /// Each base exceeds the previous base plus the largest rank bonus (14),
    /// so strength scores never overlap between categories.
    #[must_use]
    pub const fn base_strength(self) -> i64 {
        match self {
            HandCategory::HighCard => 10,
            HandCategory::Pair => 30,
            HandCategory::TwoPair => 50,
            HandCategory::ThreeOfAKind => 70,
            HandCategory::Straight => 90,
            HandCategory::Flush => 110,
            HandCategory::FullHouse => 130,
            HandCategory::FourOfAKind => 150,
            HandCategory::StraightFlush => 170,
            HandCategory::RoyalFlush => 200,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl std::fmt::Display for HandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_strength_strictly_increasing_without_overlap() {
        for pair in HandCategory::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].base_strength() + 14 < pair[1].base_strength());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(HandCategory::FullHouse.to_string(), "Full House");
    }
}
