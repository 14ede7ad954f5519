//! The Destiny Deck.
//!
//! A deck holds the cards not yet dealt in the current shuffle cycle.
//! `shuffle` restores all 52 cards in a fresh random order; `draw` removes
//! cards from the top. A card is never dealt twice within a cycle, and
//! drawing past the end fails rather than wrapping.

use super::card::{Card, Rank, Suit};
use super::hand::Hand;
use crate::core::{DeckError, GameRng};

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// A deck of cards with a draw pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    /// Remaining cards. The top of the deck is the end of the vector.
    cards: Vec<Card>,
}

impl Deck {
    /// Create a full deck in canonical (unshuffled) order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: Self::full_set(),
        }
    }

    /// Create a full deck in a random order.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    /// Reset to a full deck and permute it uniformly.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        self.cards = Self::full_set();
        rng.shuffle(&mut self.cards);
    }

    /// Remove and return `n` cards from the top.
    ///
    /// Fails without removing anything if fewer than `n` cards remain.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let split = self.cards.len() - n;
        let mut drawn = self.cards.split_off(split);
        drawn.reverse();
        Ok(drawn)
    }

    /// Draw `n` cards as a hand.
    pub fn deal(&mut self, n: usize) -> Result<Hand, DeckError> {
        self.draw(n).map(Hand::new)
    }

    /// Cards left before a reshuffle is needed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn full_set() -> Vec<Card> {
        Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
