//! Cards of the Destiny Deck.
//!
//! A standard 52-card deck: thirteen ranks in four suits. Ranks are
//! totally ordered with the ace high; the evaluator handles the ace-low
//! straight itself.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    /// Single-letter code (`S`, `H`, `C`, `D`).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
        }
    }

    /// Index into per-suit tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Card rank, two low through ace high.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks, ascending.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric value, 2 through 14.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Rank for a numeric value 2..=14.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.value() == value)
    }

    /// Single-character code (`2`-`9`, `T`, `J`, `Q`, `K`, `A`).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

/// A single card. Immutable value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.code(), self.suit.code())
    }
}

/// Failure to parse a card code such as `"AS"` or `"TD"`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid card code `{0}`")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCardError(s.to_string()));
        };

        let rank = Rank::ALL
            .iter()
            .copied()
            .find(|rank| rank.code() == r.to_ascii_uppercase())
            .ok_or_else(|| ParseCardError(s.to_string()))?;
        let suit = Suit::ALL
            .iter()
            .copied()
            .find(|suit| suit.code() == su.to_ascii_uppercase())
            .ok_or_else(|| ParseCardError(s.to_string()))?;

        Ok(Card::new(rank, suit))
    }
}
