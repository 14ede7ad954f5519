//! Destiny Deck and hand evaluation tests.
//!
//! These tests cover the draw protocol and the evaluator's contract:
//! - A shuffled cycle never deals the same card twice
//! - Over-drawing fails instead of wrapping
//! - Evaluation is deterministic and independent of deal order

use std::collections::HashSet;

use destiny_engine::cards::{Card, Deck, Hand, DECK_SIZE};
use destiny_engine::core::{DeckError, GameRng};
use destiny_engine::evaluation::{HandCategory, HandEvaluator};
use destiny_engine::resolution::deal_with_reshuffle;
use proptest::prelude::*;

fn dealt_cards(seed: u64, n: usize) -> Vec<Card> {
    let mut rng = GameRng::new(seed);
    Deck::shuffled(&mut rng).draw(n).expect("deck holds 52 cards")
}

/// Test dealing the whole deck in hands of five.
#[test]
fn test_full_cycle_has_no_duplicates() {
    let mut rng = GameRng::new(2024);
    let mut deck = Deck::shuffled(&mut rng);
    let mut seen = HashSet::new();

    while deck.remaining() >= 5 {
        let hand = deck.deal(5).unwrap();
        for card in hand.cards() {
            assert!(seen.insert(*card), "{card} dealt twice");
        }
    }

    assert_eq!(deck.remaining(), 2);
    assert!(matches!(
        deck.deal(5),
        Err(DeckError::InsufficientCards {
            requested: 5,
            remaining: 2
        })
    ));
    // A failed draw removes nothing
    assert_eq!(deck.remaining(), 2);
}

/// Test that shuffling resets the deck.
#[test]
fn test_shuffle_restores_full_deck() {
    let mut rng = GameRng::new(5);
    let mut deck = Deck::shuffled(&mut rng);
    deck.draw(40).unwrap();

    deck.shuffle(&mut rng);
    assert_eq!(deck.remaining(), DECK_SIZE);
}

/// Test the reshuffle-and-retry path used during resolution.
#[test]
fn test_reshuffle_retry() {
    let mut rng = GameRng::new(6);
    let mut deck = Deck::shuffled(&mut rng);
    deck.draw(49).unwrap();

    assert!(deal_with_reshuffle(&mut deck, 5, 0, &mut rng).is_err());
    let hand = deal_with_reshuffle(&mut deck, 5, 1, &mut rng).unwrap();
    assert_eq!(hand.len(), 5);
}

/// Test the category ladder on known hands.
#[test]
fn test_category_ladder() {
    let cases = [
        ("AS KD 9H 7C 2S", HandCategory::HighCard),
        ("TS TD 4H 7C 2D", HandCategory::Pair),
        ("KS KD 4H 4C 2D", HandCategory::TwoPair),
        ("7S 7H 7D 2C 9H", HandCategory::ThreeOfAKind),
        ("AS 2D 3H 4C 5S", HandCategory::Straight),
        ("2H 5H 8H JH KH", HandCategory::Flush),
        ("QS QH QD 3C 3H", HandCategory::FullHouse),
        ("9S 9H 9D 9C 2H", HandCategory::FourOfAKind),
        ("5D 6D 7D 8D 9D", HandCategory::StraightFlush),
        ("TC JC QC KC AC", HandCategory::RoyalFlush),
    ];

    let mut last = None;
    for (codes, expected) in cases {
        let evaluation = HandEvaluator::evaluate(&Hand::parse(codes).unwrap());
        assert_eq!(evaluation.category, expected, "{codes}");
        if let Some(prev) = last {
            assert!(evaluation.strength_score > prev, "{codes} should outscore the category below");
        }
        last = Some(evaluation.strength_score);
    }
}

/// Test that a pair of tens scores 40.
#[test]
fn test_pair_of_tens_strength() {
    let evaluation = HandEvaluator::evaluate(&Hand::parse("TS TD 4H 7C 2D").unwrap());
    assert_eq!(evaluation.strength_score, 40);
}

/// Test tie-breaks within a category.
#[test]
fn test_tiebreak_ordering() {
    let kings = HandEvaluator::evaluate(&Hand::parse("KS KD 9H 7C 2S").unwrap());
    let kings_better_kicker = HandEvaluator::evaluate(&Hand::parse("KH KC AH 7D 2D").unwrap());
    let queens = HandEvaluator::evaluate(&Hand::parse("QS QD AH 7C 2S").unwrap());

    assert!(kings_better_kicker > kings);
    assert!(kings > queens);

    let wheel = HandEvaluator::evaluate(&Hand::parse("AS 2D 3H 4C 5S").unwrap());
    let six_high = HandEvaluator::evaluate(&Hand::parse("2S 3D 4H 5C 6S").unwrap());
    assert!(six_high > wheel);
}

proptest! {
    /// Evaluating the same cards twice, in any order, gives the same result.
    #[test]
    fn prop_evaluation_deterministic(seed in any::<u64>(), size in 0usize..=7) {
        let cards = dealt_cards(seed, size);
        let mut reversed = cards.clone();
        reversed.reverse();

        let a = HandEvaluator::evaluate_cards(&cards);
        let b = HandEvaluator::evaluate_cards(&cards);
        let c = HandEvaluator::evaluate_cards(&reversed);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&a, &c);
    }

    /// Over-drawing across two draws fails, and draws never repeat a card.
    #[test]
    fn prop_draws_never_exceed_deck(seed in any::<u64>(), n in 0usize..=DECK_SIZE, extra in 1usize..=10) {
        let mut rng = GameRng::new(seed);
        let mut deck = Deck::shuffled(&mut rng);

        let first = deck.draw(n).unwrap();
        let unique: HashSet<_> = first.iter().collect();
        prop_assert_eq!(unique.len(), n);

        let m = DECK_SIZE - n + extra;
        prop_assert_eq!(
            deck.draw(m),
            Err(DeckError::InsufficientCards { requested: m, remaining: DECK_SIZE - n })
        );
    }

    /// The same seed always shuffles the same way.
    #[test]
    fn prop_shuffle_reproducible(seed in any::<u64>()) {
        prop_assert_eq!(dealt_cards(seed, 5), dealt_cards(seed, 5));
    }
}
