//! Score composition: hand strength plus suit bonuses and context modifiers.
//!
//! ## Numeric policy
//!
//! All scores are `i64`. Flat modifiers add; percentage modifiers scale the
//! running score and truncate toward zero. The same policy applies to action
//! scores and crafting quality scores.

pub mod composer;
pub mod modifier;

pub use composer::{ScoreBreakdown, ScoreStep, ScoringComposer, StepSource};
pub use modifier::{BonusKind, ContextModifier, SuitBonus};
