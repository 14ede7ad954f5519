//! Action definitions - static action data.
//!
//! `ActionDefinition` holds the immutable properties of an action: what it
//! costs, what it must beat, which suits it favours, what it pays and who
//! may attempt it. Definitions are loaded once and only ever read.
//!
//! Category-specific data rides in [`ActionCategory`]; only crimes carry
//! extra fields today.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ActionId, ItemId};
use crate::scoring::SuitBonus;

/// Flat action category, for filtering and history queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Crime,
    Combat,
    Craft,
    Social,
}

/// Category with its extension record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionCategory {
    Crime(CrimeProfile),
    Combat,
    Craft,
    Social,
}

impl ActionCategory {
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionCategory::Crime(_) => ActionType::Crime,
            ActionCategory::Combat => ActionType::Combat,
            ActionCategory::Craft => ActionType::Craft,
            ActionCategory::Social => ActionType::Social,
        }
    }

    /// The crime profile, if this is a crime.
    #[must_use]
    pub fn crime(&self) -> Option<&CrimeProfile> {
        match self {
            ActionCategory::Crime(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Catch and jail parameters for a crime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeProfile {
    /// Chance (percent) a failed attempt is witnessed, before time-of-day scaling.
    pub base_detection_percent: i64,
    /// Chance (percent) a caught criminal is jailed.
    pub jail_chance_percent: i64,
    /// Jail sentence range in minutes, inclusive.
    pub jail_minutes_min: u32,
    pub jail_minutes_max: u32,
    /// Wanted level added when caught.
    pub wanted_level_delta: i32,
}

/// Base rewards for a successful attempt, before margin scaling.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionReward {
    pub xp: u64,
    pub gold: u64,
    #[serde(default)]
    pub items: Vec<ItemReward>,
}

/// An item granted by an action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemReward {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Minimum skill level for an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill: String,
    pub level: u32,
}

/// Who may attempt an action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequirements {
    #[serde(default)]
    pub min_level: u32,
    #[serde(default)]
    pub skills: Vec<SkillRequirement>,
}

/// Actions that must have been completed before this one unlocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRequirements {
    #[serde(default)]
    pub completed_actions: Vec<ActionId>,
}

/// When an action can be attempted again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CooldownPolicy {
    #[default]
    None,
    /// Blocked for `seconds` after every attempt.
    Fixed { seconds: u32 },
    /// Blocked for `seconds` only after a failed attempt.
    OnFailure { seconds: u32 },
}

impl CooldownPolicy {
    /// Cooldown expiry for an attempt made at `now`.
    #[must_use]
    pub fn cooldown_until(self, now: DateTime<Utc>, success: bool) -> Option<DateTime<Utc>> {
        match self {
            CooldownPolicy::None => None,
            CooldownPolicy::Fixed { seconds } => Some(now + Duration::seconds(i64::from(seconds))),
            CooldownPolicy::OnFailure { seconds } if !success => {
                Some(now + Duration::seconds(i64::from(seconds)))
            }
            CooldownPolicy::OnFailure { .. } => None,
        }
    }
}

/// Static action definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub id: ActionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: ActionCategory,
    /// Displayed difficulty rating. `target_score` is what is actually checked.
    pub difficulty: u32,
    pub energy_cost: u32,
    pub target_score: i64,
    #[serde(default)]
    pub suit_bonuses: Vec<SuitBonus>,
    #[serde(default)]
    pub rewards: ActionReward,
    #[serde(default)]
    pub requirements: ActionRequirements,
    #[serde(default)]
    pub cooldown: CooldownPolicy,
    #[serde(default)]
    pub unlock: UnlockRequirements,
}

impl ActionDefinition {
    /// Create an action with no bonuses, rewards or requirements.
    #[must_use]
    pub fn new(
        id: ActionId,
        name: impl Into<String>,
        category: ActionCategory,
        energy_cost: u32,
        target_score: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category,
            difficulty: 1,
            energy_cost,
            target_score,
            suit_bonuses: Vec::new(),
            rewards: ActionReward::default(),
            requirements: ActionRequirements::default(),
            cooldown: CooldownPolicy::None,
            unlock: UnlockRequirements::default(),
        }
    }

    #[must_use]
    pub fn with_suit_bonus(mut self, bonus: SuitBonus) -> Self {
        self.suit_bonuses.push(bonus);
        self
    }

    #[must_use]
    pub fn with_rewards(mut self, rewards: ActionReward) -> Self {
        self.rewards = rewards;
        self
    }

    #[must_use]
    pub fn with_min_level(mut self, level: u32) -> Self {
        self.requirements.min_level = level;
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: impl Into<String>, level: u32) -> Self {
        self.requirements.skills.push(SkillRequirement {
            skill: skill.into(),
            level,
        });
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: CooldownPolicy) -> Self {
        self.cooldown = cooldown;
        self
    }

    #[must_use]
    pub fn with_prerequisite(mut self, action: ActionId) -> Self {
        self.unlock.completed_actions.push(action);
        self
    }

    #[must_use]
    pub fn action_type(&self) -> ActionType {
        self.category.action_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    #[test]
    fn test_builder() {
        let action = ActionDefinition::new(
            ActionId::new(1),
            "Pick Pocket",
            ActionCategory::Social,
            10,
            50,
        )
        .with_suit_bonus(SuitBonus::flat(Suit::Spades, 15))
        .with_min_level(3)
        .with_skill("lockpicking", 2)
        .with_prerequisite(ActionId::new(0));

        assert_eq!(action.action_type(), ActionType::Social);
        assert_eq!(action.suit_bonuses.len(), 1);
        assert_eq!(action.requirements.min_level, 3);
        assert_eq!(action.requirements.skills[0].skill, "lockpicking");
        assert_eq!(action.unlock.completed_actions, vec![ActionId::new(0)]);
        assert!(action.category.crime().is_none());
    }

    #[test]
    fn test_cooldown_policy() {
        let now = Utc::now();
        assert_eq!(CooldownPolicy::None.cooldown_until(now, true), None);
        assert_eq!(
            CooldownPolicy::Fixed { seconds: 60 }.cooldown_until(now, true),
            Some(now + Duration::seconds(60))
        );
        assert_eq!(CooldownPolicy::OnFailure { seconds: 30 }.cooldown_until(now, true), None);
        assert_eq!(
            CooldownPolicy::OnFailure { seconds: 30 }.cooldown_until(now, false),
            Some(now + Duration::seconds(30))
        );
    }

    #[test]
    fn test_deserialize_crime() {
        let json = r#"{
            "id": 7,
            "name": "Rob Stagecoach",
            "category": {
                "type": "crime",
                "base_detection_percent": 40,
                "jail_chance_percent": 50,
                "jail_minutes_min": 10,
                "jail_minutes_max": 30,
                "wanted_level_delta": 1
            },
            "difficulty": 4,
            "energy_cost": 20,
            "target_score": 60,
            "suit_bonuses": [{ "suit": "Spades", "kind": { "flat": 10 } }],
            "rewards": { "xp": 50, "gold": 120 },
            "cooldown": { "type": "fixed", "seconds": 300 }
        }"#;
        let action: ActionDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(action.action_type(), ActionType::Crime);
        assert_eq!(action.category.crime().unwrap().jail_chance_percent, 50);
        assert_eq!(action.rewards.gold, 120);
        assert!(action.rewards.items.is_empty());
        assert_eq!(action.cooldown, CooldownPolicy::Fixed { seconds: 300 });
    }
}
