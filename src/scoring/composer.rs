//! Score composition.
//!
//! Starting from a base score, modifiers are applied in a fixed order:
//! matching suit bonuses in declared order, then context modifiers in
//! declared order. Each application is recorded as a [`ScoreStep`], so the
//! resulting [`ScoreBreakdown`] can be replayed term by term.
//!
//! No modifier sees the final score; each only sees the running total
//! before it.

use serde::{Deserialize, Serialize};

use super::modifier::{BonusKind, ContextModifier, SuitBonus};
use crate::cards::{Hand, Suit};
use crate::evaluation::HandEvaluation;

/// Where a step came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepSource {
    SuitBonus(Suit),
    Context,
}

/// One applied modifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreStep {
    pub label: String,
    pub source: StepSource,
    pub kind: BonusKind,
    /// Change to the running score.
    pub delta: i64,
    /// Running score after this step.
    pub running_total: i64,
}

/// Auditable score: the base, every applied step, and the total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base_label: String,
    pub base: i64,
    pub steps: Vec<ScoreStep>,
    pub total: i64,
}

impl ScoreBreakdown {
    /// Every term and its contribution in application order, base first.
    pub fn terms(&self) -> impl Iterator<Item = (&str, i64)> {
        std::iter::once((self.base_label.as_str(), self.base))
            .chain(self.steps.iter().map(|s| (s.label.as_str(), s.delta)))
    }

    /// Suit bonuses that matched the hand.
    pub fn applied_suits(&self) -> impl Iterator<Item = Suit> + '_ {
        self.steps.iter().filter_map(|s| match s.source {
            StepSource::SuitBonus(suit) => Some(suit),
            StepSource::Context => None,
        })
    }

    /// Sum of all terms. Always equals `total`.
    #[must_use]
    pub fn replay(&self) -> i64 {
        self.terms().map(|(_, v)| v).sum()
    }
}

impl std::fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.base_label, self.base)?;
        for step in &self.steps {
            write!(f, " {} {:+}", step.label, step.delta)?;
            if let BonusKind::Percent(pct) = step.kind {
                write!(f, " ({pct:+}%)")?;
            }
        }
        write!(f, " = {}", self.total)
    }
}

/// Composes hand strength and modifiers into a total score.
pub struct ScoringComposer;

impl ScoringComposer {
    /// Compose an action score from a hand evaluation.
    #[must_use]
    pub fn compose(
        evaluation: &HandEvaluation,
        suit_bonuses: &[SuitBonus],
        hand: &Hand,
        context: &[ContextModifier],
    ) -> ScoreBreakdown {
        let base_label = format!("{} strength", evaluation.category);
        Self::compose_from_base(base_label, evaluation.strength_score, suit_bonuses, Some(hand), context)
    }

    /// Compose a score from an arbitrary base.
    ///
    /// Suit bonuses are only considered when a hand is supplied.
    #[must_use]
    pub fn compose_from_base(
        base_label: impl Into<String>,
        base: i64,
        suit_bonuses: &[SuitBonus],
        hand: Option<&Hand>,
        context: &[ContextModifier],
    ) -> ScoreBreakdown {
        let mut running = base;
        let mut steps = Vec::with_capacity(suit_bonuses.len() + context.len());

        if let Some(hand) = hand {
            for bonus in suit_bonuses.iter().filter(|b| hand.contains_suit(b.suit)) {
                let delta = bonus.kind.delta(running);
                running = running.saturating_add(delta);
                steps.push(ScoreStep {
                    label: format!("{:?} bonus", bonus.suit),
                    source: StepSource::SuitBonus(bonus.suit),
                    kind: bonus.kind,
                    delta,
                    running_total: running,
                });
            }
        }

        for modifier in context {
            let delta = modifier.kind.delta(running);
            running = running.saturating_add(delta);
            steps.push(ScoreStep {
                label: modifier.label.clone(),
                source: StepSource::Context,
                kind: modifier.kind,
                delta,
                running_total: running,
            });
        }

        tracing::debug!(base, total = running, steps = steps.len(), "composed score");

        ScoreBreakdown {
            base_label: base_label.into(),
            base,
            steps,
            total: running,
        }
    }
}
