//! Collaborator ports.
//!
//! The engine reads and writes game state only through these traits.
//! Implementations own storage, networking and time; the engine owns the
//! resolution rules.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::actions::{ActionResult, ActionReward, ActionType};
use crate::core::{ActionId, CharacterId, CollaboratorError, LocationId, StoreError};
use crate::crafting::CraftedItemData;

// =============================================================================
// Character state
// =============================================================================

/// Precondition data for one character, read at a single version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub character_id: CharacterId,
    pub energy: u32,
    pub level: u32,
    #[serde(default)]
    pub skills: FxHashMap<String, u32>,
    /// Per-action cooldown expiry.
    #[serde(default)]
    pub cooldowns: FxHashMap<ActionId, DateTime<Utc>>,
    #[serde(default)]
    pub jailed_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub wanted_level: i32,
    #[serde(default)]
    pub completed_actions: FxHashSet<ActionId>,
    /// Bumped on every applied mutation.
    #[serde(default)]
    pub version: u64,
}

impl CharacterSnapshot {
    #[must_use]
    pub fn new(character_id: CharacterId, energy: u32, level: u32) -> Self {
        Self {
            character_id,
            energy,
            level,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_skill(mut self, skill: impl Into<String>, level: u32) -> Self {
        self.skills.insert(skill.into(), level);
        self
    }

    #[must_use]
    pub fn with_completed(mut self, action: ActionId) -> Self {
        self.completed_actions.insert(action);
        self
    }

    #[must_use]
    pub fn skill(&self, skill: &str) -> u32 {
        self.skills.get(skill).copied().unwrap_or(0)
    }

    /// Cooldown expiry for an action, if still in the future.
    #[must_use]
    pub fn cooldown_until(&self, action: ActionId, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.cooldowns.get(&action).copied().filter(|until| *until > now)
    }

    /// Jail release time, if still in the future.
    #[must_use]
    pub fn jailed_until(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.jailed_until.filter(|until| *until > now)
    }
}

/// State changes from one attempt, applied atomically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterMutation {
    pub energy_cost: u32,
    pub cooldown: Option<(ActionId, DateTime<Utc>)>,
    pub jail_until: Option<DateTime<Utc>>,
    pub wanted_level_delta: i32,
    /// Recorded on success, for unlock requirements.
    pub completed_action: Option<ActionId>,
}

/// Character state with atomic check-and-apply.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterStore: Send + Sync {
    async fn snapshot(&self, id: CharacterId) -> Result<CharacterSnapshot, StoreError>;

    /// Apply a mutation if the character is still at `expected_version` and
    /// can pay the energy cost. Returns the new version.
    ///
    /// Fails with [`StoreError::Conflict`] otherwise, changing nothing.
    async fn apply(
        &self,
        id: CharacterId,
        mutation: CharacterMutation,
        expected_version: u64,
    ) -> Result<u64, StoreError>;
}

// =============================================================================
// Time of day
// =============================================================================

/// Scales crime detection by location and time. `1.0` is neutral.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimeOfDayService: Send + Sync {
    async fn crime_detection_modifier(&self, location: Option<LocationId>, now: DateTime<Utc>) -> f64;
}

// =============================================================================
// Rewards and inventory
// =============================================================================

/// Applies rewards and crafted items. The engine never writes inventory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewardSink: Send + Sync {
    async fn grant_action_reward(
        &self,
        character_id: CharacterId,
        reward: &ActionReward,
    ) -> Result<(), CollaboratorError>;

    async fn grant_crafted_item(&self, item: &CraftedItemData) -> Result<(), CollaboratorError>;
}

// =============================================================================
// Persistence
// =============================================================================

/// Filter for action history. Results come back newest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub character_id: CharacterId,
    pub action_type: Option<ActionType>,
    pub success: Option<bool>,
    pub limit: usize,
    pub offset: usize,
}

impl HistoryQuery {
    pub const DEFAULT_LIMIT: usize = 20;

    #[must_use]
    pub fn for_character(character_id: CharacterId) -> Self {
        Self {
            character_id,
            action_type: None,
            success: None,
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }

    #[must_use]
    pub fn of_type(mut self, action_type: ActionType) -> Self {
        self.action_type = Some(action_type);
        self
    }

    #[must_use]
    pub fn successful(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    #[must_use]
    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    /// Whether a result passes the filters (pagination aside).
    #[must_use]
    pub fn matches(&self, result: &ActionResult) -> bool {
        result.character_id == self.character_id
            && self.action_type.map_or(true, |t| t == result.action_type)
            && self.success.map_or(true, |s| s == result.success)
    }
}

/// Stores immutable results and answers history queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn save_action_result(&self, result: &ActionResult) -> Result<(), CollaboratorError>;

    async fn save_crafted_item(&self, item: &CraftedItemData) -> Result<(), CollaboratorError>;

    async fn action_history(&self, query: &HistoryQuery) -> Result<Vec<ActionResult>, CollaboratorError>;

    async fn crafting_history(
        &self,
        character_id: CharacterId,
        limit: usize,
    ) -> Result<Vec<CraftedItemData>, CollaboratorError>;
}

// =============================================================================
// Clock
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always reports the same instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
