//! Outcome classification.
//!
//! Every classification here is a pure, stateless function over a score and
//! an ordered threshold table. Nothing is retained between calls.

pub mod action;
pub mod threshold;

pub use action::{classify_action, ActionOutcome};
pub use threshold::{Bound, Threshold, ThresholdTable};
