//! Card system: cards, the Destiny Deck, and dealt hands.
//!
//! ## Key Types
//!
//! - `Card`: Immutable rank/suit value
//! - `Deck`: Shuffled draw pile, one per resolution attempt
//! - `Hand`: Cards dealt together for evaluation

pub mod card;
pub mod deck;
pub mod hand;

pub use card::{Card, ParseCardError, Rank, Suit};
pub use deck::{Deck, DECK_SIZE};
pub use hand::Hand;
