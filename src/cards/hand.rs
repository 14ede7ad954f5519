//! A dealt hand. Immutable once dealt.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, ParseCardError, Suit};

/// Cards dealt together and evaluated as one unit.
///
/// Typical hands are five cards, kept inline without heap allocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[Card; 5]>,
}

impl Hand {
    /// Create a hand from dealt cards, preserving deal order.
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Parse a whitespace-separated list of card codes, e.g. `"AS KD 7H 7C 2S"`.
    pub fn parse(codes: &str) -> Result<Self, ParseCardError> {
        codes
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<SmallVec<[Card; 5]>, _>>()
            .map(|cards| Self { cards })
    }

    /// The cards in deal order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether at least one card of `suit` is present.
    #[must_use]
    pub fn contains_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|c| c.suit == suit)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
