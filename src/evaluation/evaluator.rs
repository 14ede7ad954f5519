//! Hand evaluation.
//!
//! `HandEvaluator::evaluate` classifies any hand into a [`HandCategory`] and
//! a strength score. It is a pure, total function: empty hands are high
//! card with no ranks, short hands simply cannot make straights or flushes,
//! and hands larger than five cards are scored by their best five.
//!
//! The strength score is `category.base_strength() + primary rank`, where
//! the primary rank is the first tie-break rank (the pair's rank for a pair,
//! the top card for a straight). Two evaluations compare by category, then
//! tie-break ranks in order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::category::HandCategory;
use crate::cards::{Card, Hand, Rank, Suit};

/// Cards that make up a scored hand.
const SCORED_CARDS: usize = 5;

/// Tie-break ranks, most significant first.
pub type TieBreak = SmallVec<[Rank; 5]>;

/// Category and strength of a hand.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandEvaluation {
    pub category: HandCategory,
    pub strength_score: i64,
    /// Contributing ranks, most significant first.
    pub tiebreak: TieBreak,
}

impl HandEvaluation {
    fn new(category: HandCategory, tiebreak: TieBreak) -> Self {
        let primary = tiebreak.first().map_or(0, |r| i64::from(r.value()));
        Self {
            category,
            strength_score: category.base_strength() + primary,
            tiebreak,
        }
    }
}

impl Ord for HandEvaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.tiebreak.cmp(&other.tiebreak))
    }
}

impl PartialOrd for HandEvaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Classifies hands.
pub struct HandEvaluator;

impl HandEvaluator {
    /// Evaluate a hand.
    #[must_use]
    pub fn evaluate(hand: &Hand) -> HandEvaluation {
        Self::evaluate_cards(hand.cards())
    }

    /// Evaluate a slice of cards.
    #[must_use]
    pub fn evaluate_cards(cards: &[Card]) -> HandEvaluation {
        let mut rank_counts = [0usize; 15];
        let mut suit_counts = [0usize; 4];
        for card in cards {
            rank_counts[card.rank.value() as usize] += 1;
            suit_counts[card.suit.index()] += 1;
        }

        // Straight flush / royal flush
        let flush_suit = Suit::ALL
            .iter()
            .copied()
            .find(|s| suit_counts[s.index()] >= SCORED_CARDS);

        if let Some(suit) = flush_suit {
            let mut suited = [0usize; 15];
            for card in cards.iter().filter(|c| c.suit == suit) {
                suited[card.rank.value() as usize] += 1;
            }
            if let Some(high) = straight_high(&suited) {
                let category = if high == Rank::Ace {
                    HandCategory::RoyalFlush
                } else {
                    HandCategory::StraightFlush
                };
                return HandEvaluation::new(category, std::iter::once(high).collect());
            }
        }

        // Groups ordered by size, then rank, largest first
        let mut groups: SmallVec<[(usize, Rank); 8]> = Rank::ALL
            .iter()
            .rev()
            .filter(|r| rank_counts[r.value() as usize] > 0)
            .map(|&r| (rank_counts[r.value() as usize], r))
            .collect();
        groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

        let largest = groups.first().map_or(0, |g| g.0);
        let second = groups.get(1).map_or(0, |g| g.0);

        if largest >= 4 {
            let quad = groups[0].1;
            let mut tiebreak: TieBreak = std::iter::once(quad).collect();
            tiebreak.extend(kickers(&rank_counts, &[quad], 1));
            return HandEvaluation::new(HandCategory::FourOfAKind, tiebreak);
        }

        if largest == 3 && second >= 2 {
            let trips = groups[0].1;
            // Highest remaining group of two or more fills the house
            let pair = groups[1..]
                .iter()
                .filter(|g| g.0 >= 2)
                .map(|g| g.1)
                .max()
                .unwrap_or(groups[1].1);
            return HandEvaluation::new(HandCategory::FullHouse, [trips, pair].into_iter().collect());
        }

        if let Some(suit) = flush_suit {
            let mut ranks: SmallVec<[Rank; 8]> = cards
                .iter()
                .filter(|c| c.suit == suit)
                .map(|c| c.rank)
                .collect();
            ranks.sort_unstable_by(|a, b| b.cmp(a));
            ranks.truncate(SCORED_CARDS);
            return HandEvaluation::new(HandCategory::Flush, ranks.into_iter().collect());
        }

        if let Some(high) = straight_high(&rank_counts) {
            return HandEvaluation::new(HandCategory::Straight, std::iter::once(high).collect());
        }

        if largest == 3 {
            let trips = groups[0].1;
            let mut tiebreak: TieBreak = std::iter::once(trips).collect();
            tiebreak.extend(kickers(&rank_counts, &[trips], 2));
            return HandEvaluation::new(HandCategory::ThreeOfAKind, tiebreak);
        }

        if largest == 2 && second == 2 {
            let high = groups[0].1;
            let low = groups[1].1;
            let mut tiebreak: TieBreak = [high, low].into_iter().collect();
            tiebreak.extend(kickers(&rank_counts, &[high, low], 1));
            return HandEvaluation::new(HandCategory::TwoPair, tiebreak);
        }

        if largest == 2 {
            let pair = groups[0].1;
            let mut tiebreak: TieBreak = std::iter::once(pair).collect();
            tiebreak.extend(kickers(&rank_counts, &[pair], 3));
            return HandEvaluation::new(HandCategory::Pair, tiebreak);
        }

        HandEvaluation::new(
            HandCategory::HighCard,
            kickers(&rank_counts, &[], SCORED_CARDS).collect(),
        )
    }
}

/// Highest rank ending five consecutive ranks, counting the ace low for the wheel.
fn straight_high(rank_counts: &[usize; 15]) -> Option<Rank> {
    let present = |v: u8| rank_counts[v as usize] > 0 || (v == 1 && rank_counts[14] > 0);

    (5..=14u8)
        .rev()
        .find(|&top| (top - 4..=top).all(present))
        .and_then(Rank::from_value)
}

/// Highest `n` distinct ranks not in `exclude`.
fn kickers<'a>(
    rank_counts: &'a [usize; 15],
    exclude: &'a [Rank],
    n: usize,
) -> impl Iterator<Item = Rank> + 'a {
    Rank::ALL
        .iter()
        .rev()
        .copied()
        .filter(move |r| rank_counts[r.value() as usize] > 0 && !exclude.contains(r))
        .take(n)
}
