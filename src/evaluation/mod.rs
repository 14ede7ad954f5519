//! Hand evaluation: poker-style categories and strength scores.
//!
//! Evaluation is deterministic and total. The same cards always produce
//! the same category, strength score and tie-break ranks, regardless of
//! deal order.

pub mod category;
pub mod evaluator;

pub use category::HandCategory;
pub use evaluator::{HandEvaluation, HandEvaluator, TieBreak};
