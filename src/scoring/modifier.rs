//! Score modifiers.
//!
//! A modifier is either flat (added to the running score) or a percentage
//! (applied multiplicatively to the running score). Suit bonuses are
//! modifiers gated on the hand containing their suit; context modifiers
//! always apply.

use serde::{Deserialize, Serialize};

use crate::cards::Suit;

/// How a modifier changes the running score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    /// Added to the running score.
    Flat(i64),
    /// `running * (100 + pct) / 100`, truncated toward zero.
    Percent(i64),
}

impl BonusKind {
    /// Change this modifier makes to `running`.
    ///
    /// Integer arithmetic throughout; percentages truncate toward zero.
    #[must_use]
    pub fn delta(self, running: i64) -> i64 {
        match self {
            BonusKind::Flat(amount) => amount,
            BonusKind::Percent(pct) => running.saturating_mul(pct) / 100,
        }
    }
}

impl std::fmt::Display for BonusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BonusKind::Flat(amount) => write!(f, "{amount:+}"),
            BonusKind::Percent(pct) => write!(f, "{pct:+}%"),
        }
    }
}

/// Suit affinity attached to an action or crafting context.
///
/// Applies once when the hand contains at least one card of `suit`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitBonus {
    pub suit: Suit,
    pub kind: BonusKind,
}

impl SuitBonus {
    /// Flat bonus for a suit.
    #[must_use]
    pub const fn flat(suit: Suit, amount: i64) -> Self {
        Self {
            suit,
            kind: BonusKind::Flat(amount),
        }
    }

    /// Percentage bonus for a suit.
    #[must_use]
    pub const fn percent(suit: Suit, pct: i64) -> Self {
        Self {
            suit,
            kind: BonusKind::Percent(pct),
        }
    }
}

/// A named modifier that always applies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextModifier {
    pub label: String,
    pub kind: BonusKind,
}

impl ContextModifier {
    /// Flat context modifier.
    #[must_use]
    pub fn flat(label: impl Into<String>, amount: i64) -> Self {
        Self {
            label: label.into(),
            kind: BonusKind::Flat(amount),
        }
    }

    /// Percentage context modifier.
    #[must_use]
    pub fn percent(label: impl Into<String>, pct: i64) -> Self {
        Self {
            label: label.into(),
            kind: BonusKind::Percent(pct),
        }
    }
}
