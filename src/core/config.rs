//! Engine configuration.
//!
//! Tuning values live here rather than in the resolution code:
//! - `RewardCurve`: bonus rewards from a positive success margin
//! - `BaseChanceCurve`: crafting base chance from skill vs recipe level
//! - `LuckRange`: the crafting luck term
//! - `CrimeRollConfig`: witness and jail roll die
//! - `EngineConfig`: combines all configuration
//!
//! Everything here is plain data and deserialises from JSON, so the numbers
//! can be tuned without touching the engine.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Margin-to-bonus curve for successful actions.
///
/// `bonus% = clamp(margin * percent_per_point, 0, max_bonus_percent)`.
/// Monotonic non-decreasing in margin; a zero or negative margin grants no bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCurve {
    pub percent_per_point: i64,
    pub max_bonus_percent: i64,
}

impl RewardCurve {
    /// Bonus percentage granted for a success margin.
    #[must_use]
    pub fn bonus_percent(&self, margin: i64) -> i64 {
        margin
            .max(0)
            .saturating_mul(self.percent_per_point)
            .clamp(0, self.max_bonus_percent)
    }
}

impl Default for RewardCurve {
    fn default() -> Self {
        Self {
            percent_per_point: 2,
            max_bonus_percent: 50,
        }
    }
}

/// Crafting base chance from the skill/recipe level gap.
///
/// `clamp(base + (skill - recipe) * per_level, min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseChanceCurve {
    pub base: i64,
    pub per_level: i64,
    pub min: i64,
    pub max: i64,
}

impl BaseChanceCurve {
    /// Base chance for a crafter of `skill_level` making a `recipe_level` recipe.
    #[must_use]
    pub fn base_chance(&self, skill_level: u32, recipe_level: u32) -> i64 {
        let gap = i64::from(skill_level) - i64::from(recipe_level);
        self.base
            .saturating_add(gap.saturating_mul(self.per_level))
            .clamp(self.min, self.max)
    }
}

impl Default for BaseChanceCurve {
    fn default() -> Self {
        Self {
            base: 20,
            per_level: 2,
            min: 0,
            max: 60,
        }
    }
}

/// Inclusive range of the uniform crafting luck roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckRange {
    pub min: i64,
    pub max: i64,
}

impl Default for LuckRange {
    fn default() -> Self {
        Self { min: 0, max: 20 }
    }
}

/// Die used for crime witness and jail rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeRollConfig {
    /// Rolls are uniform in `1..=die_sides`. Percent chances are scaled to this die.
    pub die_sides: i64,
}

impl Default for CrimeRollConfig {
    fn default() -> Self {
        Self { die_sides: 100 }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cards dealt per action attempt.
    pub hand_size: usize,

    /// Reshuffle-and-retry attempts when a draw fails mid-resolution.
    pub reshuffle_retries: u32,

    pub reward_curve: RewardCurve,
    pub base_chance: BaseChanceCurve,
    pub luck: LuckRange,
    pub crime: CrimeRollConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hand_size: 5,
            reshuffle_retries: 1,
            reward_curve: RewardCurve::default(),
            base_chance: BaseChanceCurve::default(),
            luck: LuckRange::default(),
            crime: CrimeRollConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the reward curve.
    #[must_use]
    pub fn with_reward_curve(mut self, curve: RewardCurve) -> Self {
        self.reward_curve = curve;
        self
    }

    /// Set the base chance curve.
    #[must_use]
    pub fn with_base_chance(mut self, curve: BaseChanceCurve) -> Self {
        self.base_chance = curve;
        self
    }

    /// Set the luck range.
    #[must_use]
    pub fn with_luck(mut self, min: i64, max: i64) -> Self {
        self.luck = LuckRange { min, max };
        self
    }

    /// Check the configuration is internally consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::invalid("hand_size", "must be at least 1"));
        }
        if self.reward_curve.percent_per_point < 0 || self.reward_curve.max_bonus_percent < 0 {
            return Err(ConfigError::invalid("reward_curve", "must not be negative"));
        }
        if self.base_chance.per_level < 0 {
            return Err(ConfigError::invalid("base_chance.per_level", "must not be negative"));
        }
        if self.base_chance.min > self.base_chance.max {
            return Err(ConfigError::invalid("base_chance", "min exceeds max"));
        }
        if self.luck.min > self.luck.max {
            return Err(ConfigError::invalid("luck", "min exceeds max"));
        }
        if self.crime.die_sides < 2 {
            return Err(ConfigError::invalid("crime.die_sides", "must be at least 2"));
        }
        Ok(())
    }
}
