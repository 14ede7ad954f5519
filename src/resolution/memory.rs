//! In-memory collaborators.
//!
//! Enough to run the engine in a single process and in tests. Results are
//! stored `bincode`-encoded so a saved record cannot be changed through a
//! shared reference afterwards.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::RwLock;

use super::ports::{
    CharacterMutation, CharacterSnapshot, CharacterStore, HistoryQuery, ResultRepository,
    RewardSink, TimeOfDayService,
};
use crate::actions::{ActionResult, ActionReward};
use crate::core::{CharacterId, CollaboratorError, LocationId, StoreError};
use crate::crafting::CraftedItemData;

// =============================================================================
// Character store
// =============================================================================

/// Versioned character records with compare-and-swap apply.
#[derive(Debug, Default)]
pub struct InMemoryCharacterStore {
    characters: DashMap<CharacterId, CharacterSnapshot>,
}

impl InMemoryCharacterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a character.
    pub fn insert(&self, character: CharacterSnapshot) {
        self.characters.insert(character.character_id, character);
    }

    /// Current state, outside any attempt.
    #[must_use]
    pub fn get(&self, id: CharacterId) -> Option<CharacterSnapshot> {
        self.characters.get(&id).map(|c| c.value().clone())
    }
}

#[async_trait]
impl CharacterStore for InMemoryCharacterStore {
    async fn snapshot(&self, id: CharacterId) -> Result<CharacterSnapshot, StoreError> {
        self.get(id).ok_or(StoreError::NotFound(id))
    }

    async fn apply(
        &self,
        id: CharacterId,
        mutation: CharacterMutation,
        expected_version: u64,
    ) -> Result<u64, StoreError> {
        let mut entry = self.characters.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let character = entry.value_mut();

        if character.version != expected_version || character.energy < mutation.energy_cost {
            return Err(StoreError::Conflict(id));
        }

        character.energy -= mutation.energy_cost;
        if let Some((action, until)) = mutation.cooldown {
            character.cooldowns.insert(action, until);
        }
        if let Some(until) = mutation.jail_until {
            character.jailed_until = Some(character.jailed_until.map_or(until, |t| t.max(until)));
        }
        character.wanted_level = character.wanted_level.saturating_add(mutation.wanted_level_delta);
        if let Some(action) = mutation.completed_action {
            character.completed_actions.insert(action);
        }
        character.version += 1;

        Ok(character.version)
    }
}

// =============================================================================
// Time of day
// =============================================================================

/// Night-time detection curve: `night` between 20:00 and 06:00 UTC, `day` otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayNightDetection {
    pub day: f64,
    pub night: f64,
}

impl Default for DayNightDetection {
    fn default() -> Self {
        Self { day: 1.0, night: 0.5 }
    }
}

#[async_trait]
impl TimeOfDayService for DayNightDetection {
    async fn crime_detection_modifier(&self, _location: Option<LocationId>, now: DateTime<Utc>) -> f64 {
        use chrono::Timelike;
        let hour = now.hour();
        if !(6..20).contains(&hour) {
            self.night
        } else {
            self.day
        }
    }
}

// =============================================================================
// Rewards
// =============================================================================

/// Records every grant in order.
#[derive(Debug, Default)]
pub struct RewardLedger {
    rewards: RwLock<Vec<(CharacterId, ActionReward)>>,
    items: RwLock<Vec<CraftedItemData>>,
}

impl RewardLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn rewards(&self) -> Vec<(CharacterId, ActionReward)> {
        self.rewards.read().await.clone()
    }

    pub async fn items(&self) -> Vec<CraftedItemData> {
        self.items.read().await.clone()
    }
}

#[async_trait]
impl RewardSink for RewardLedger {
    async fn grant_action_reward(
        &self,
        character_id: CharacterId,
        reward: &ActionReward,
    ) -> Result<(), CollaboratorError> {
        self.rewards.write().await.push((character_id, reward.clone()));
        Ok(())
    }

    async fn grant_crafted_item(&self, item: &CraftedItemData) -> Result<(), CollaboratorError> {
        self.items.write().await.push(item.clone());
        Ok(())
    }
}

// =============================================================================
// Results
// =============================================================================

/// Append-only result log.
#[derive(Debug, Default)]
pub struct InMemoryResultRepository {
    actions: RwLock<Vec<Vec<u8>>>,
    crafted: RwLock<Vec<Vec<u8>>>,
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, CollaboratorError> {
    bincode::serialize(value).map_err(|e| CollaboratorError::Encoding(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, CollaboratorError> {
    bincode::deserialize(bytes).map_err(|e| CollaboratorError::Encoding(e.to_string()))
}

impl InMemoryResultRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored action results.
    pub async fn action_count(&self) -> usize {
        self.actions.read().await.len()
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    async fn save_action_result(&self, result: &ActionResult) -> Result<(), CollaboratorError> {
        let bytes = encode(result)?;
        self.actions.write().await.push(bytes);
        Ok(())
    }

    async fn save_crafted_item(&self, item: &CraftedItemData) -> Result<(), CollaboratorError> {
        let bytes = encode(item)?;
        self.crafted.write().await.push(bytes);
        Ok(())
    }

    async fn action_history(&self, query: &HistoryQuery) -> Result<Vec<ActionResult>, CollaboratorError> {
        let stored = self.actions.read().await;
        let mut matching = Vec::new();
        for bytes in stored.iter().rev() {
            let result: ActionResult = decode(bytes)?;
            if query.matches(&result) {
                matching.push(result);
            }
        }
        // Stable sort keeps insertion order (newest first) for equal timestamps.
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(matching.into_iter().skip(query.offset).take(query.limit).collect())
    }

    async fn crafting_history(
        &self,
        character_id: CharacterId,
        limit: usize,
    ) -> Result<Vec<CraftedItemData>, CollaboratorError> {
        let stored = self.crafted.read().await;
        let mut items = Vec::new();
        for bytes in stored.iter().rev() {
            let item: CraftedItemData = decode(bytes)?;
            if item.character_id == character_id {
                items.push(item);
                if items.len() == limit {
                    break;
                }
            }
        }
        Ok(items)
    }
}
