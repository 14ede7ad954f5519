//! Process-wide reference data.
//!
//! Action definitions, quality tiers and effect pools are loaded once at
//! startup, validated, and shared read-only behind an `Arc`. Nothing in the
//! engine mutates them afterwards.
//!
//! ```
//! use destiny_engine::reference::ReferenceData;
//!
//! let data = ReferenceData::from_json(r#"{
//!     "actions": [{
//!         "id": 1, "name": "Saloon Brawl", "category": { "type": "combat" },
//!         "difficulty": 2, "energy_cost": 10, "target_score": 45
//!     }]
//! }"#).unwrap();
//!
//! assert_eq!(data.actions.len(), 1);
//! assert_eq!(data.qualities.iter().count(), 6);
//! ```

use std::sync::Arc;

use serde::Deserialize;

use crate::actions::{ActionDefinition, ActionRegistry};
use crate::core::ConfigError;
use crate::crafting::{EffectPoolRegistry, QualityTable};

/// Read-only reference tables.
#[derive(Clone, Debug, Default)]
pub struct ReferenceData {
    pub actions: ActionRegistry,
    pub qualities: QualityTable,
    pub effects: EffectPoolRegistry,
}

/// On-disk layout. Quality tiers fall back to the default table.
#[derive(Deserialize)]
struct RawReferenceData {
    #[serde(default)]
    actions: Vec<ActionDefinition>,
    #[serde(default)]
    quality_tiers: Option<QualityTable>,
    #[serde(default)]
    effect_pools: EffectPoolRegistry,
}

impl ReferenceData {
    /// Bundle already-built tables.
    #[must_use]
    pub fn new(actions: ActionRegistry, qualities: QualityTable, effects: EffectPoolRegistry) -> Self {
        Self {
            actions,
            qualities,
            effects,
        }
    }

    /// Parse and validate reference data from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawReferenceData = serde_json::from_str(json)?;
        let actions = ActionRegistry::from_definitions(raw.actions)?;
        raw.effect_pools.validate()?;
        let qualities = raw.quality_tiers.unwrap_or_default();
        let min_effects = qualities.iter().map(|t| t.min_effects).max().unwrap_or(0);
        raw.effect_pools.ensure_capacity(min_effects)?;

        let data = Self {
            actions,
            qualities,
            effects: raw.effect_pools,
        };
        tracing::info!(
            actions = data.actions.len(),
            quality_tiers = data.qualities.iter().count(),
            "loaded reference data"
        );
        Ok(data)
    }

    /// Load and wrap for sharing.
    pub fn load_shared(json: &str) -> Result<Arc<Self>, ConfigError> {
        Self::from_json(json).map(Arc::new)
    }
}
