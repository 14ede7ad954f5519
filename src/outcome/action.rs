//! Action outcome classification.

use serde::{Deserialize, Serialize};

use super::threshold::{Bound, ThresholdTable};

/// Success and signed margin of an action attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    /// `total_score - target_score`. Reported on failure too.
    pub margin: i64,
}

/// Classify a total score against a target.
///
/// Success iff `total_score >= target_score`.
#[must_use]
pub fn classify_action(total_score: i64, target_score: i64) -> ActionOutcome {
    let table = ThresholdTable::binary(target_score, false, true, Bound::Inclusive);
    ActionOutcome {
        success: *table.classify(total_score),
        margin: total_score.saturating_sub(target_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_margin() {
        let outcome = classify_action(55, 50);
        assert!(outcome.success);
        assert_eq!(outcome.margin, 5);
    }

    #[test]
    fn test_exact_target_succeeds() {
        let outcome = classify_action(50, 50);
        assert!(outcome.success);
        assert_eq!(outcome.margin, 0);
    }

    #[test]
    fn test_failure_reports_negative_margin() {
        let outcome = classify_action(41, 50);
        assert!(!outcome.success);
        assert_eq!(outcome.margin, -9);
    }
}
