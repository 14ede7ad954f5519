//! Resolved action attempts.
//!
//! An `ActionResult` is created exactly once per attempt, after the
//! character mutation has been applied, and is never modified afterwards.
//! It records everything needed to verify the outcome independently: the
//! seed, the hand, its evaluation, every score term and the margin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::definition::{ActionReward, ActionType};
use crate::cards::Hand;
use crate::core::{ActionId, CharacterId, LocationId};
use crate::evaluation::HandEvaluation;
use crate::scoring::{ScoreBreakdown, SuitBonus};

/// Outcome of the crime sub-procedure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeResolution {
    /// Effective witness chance after time-of-day scaling, in percent.
    pub detection_percent: i64,
    /// Witness roll. `None` when the crime succeeded and no roll was made.
    pub witness_roll: Option<i64>,
    /// Witness roll must exceed this to catch the criminal.
    pub witness_threshold: i64,
    pub caught: bool,
    /// Jail roll. `None` unless caught.
    pub jail_roll: Option<i64>,
    pub jail_threshold: i64,
    pub jailed: bool,
    pub jail_minutes: Option<u32>,
    pub jail_until: Option<DateTime<Utc>>,
    pub wanted_level_delta: i32,
}

impl CrimeResolution {
    /// Resolution for a successful crime: nothing rolled, nothing lost.
    #[must_use]
    pub fn unwitnessed(detection_percent: i64, witness_threshold: i64) -> Self {
        Self {
            detection_percent,
            witness_roll: None,
            witness_threshold,
            caught: false,
            jail_roll: None,
            jail_threshold: 0,
            jailed: false,
            jail_minutes: None,
            jail_until: None,
            wanted_level_delta: 0,
        }
    }
}

/// One resolved action attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub character_id: CharacterId,
    pub action_id: ActionId,
    pub action_type: ActionType,
    pub location_id: Option<LocationId>,
    /// Seed the attempt was resolved from.
    pub seed: u64,
    pub hand: Hand,
    pub hand_evaluation: HandEvaluation,
    pub applied_suit_bonuses: Vec<SuitBonus>,
    pub breakdown: ScoreBreakdown,
    pub total_score: i64,
    pub target_score: i64,
    pub success: bool,
    pub margin: i64,
    /// Present only on success.
    pub rewards: Option<ActionReward>,
    pub energy_spent: u32,
    pub cooldown_until: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
    /// Present only for crimes.
    pub crime_resolution: Option<CrimeResolution>,
}

impl ActionResult {
    /// Whether the attempt ended with the character caught.
    #[must_use]
    pub fn caught(&self) -> bool {
        self.crime_resolution.as_ref().is_some_and(|c| c.caught)
    }

    /// Whether the attempt ended with the character jailed.
    #[must_use]
    pub fn jailed(&self) -> bool {
        self.crime_resolution.as_ref().is_some_and(|c| c.jailed)
    }
}
