//! Special effects and their per-category pools.
//!
//! After a crafted item's quality tier is resolved, it receives between
//! the tier's `min_effects` and `max_effects` special effects, drawn by
//! weight from the pool for its item category without replacement.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{ConfigError, EffectId, GameRng};

/// Category of crafted item. Selects the effect pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Weapon,
    Armor,
    Tool,
    Clothing,
    Consumable,
    Accessory,
}

/// A named modifier attached to a crafted item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecialEffect {
    pub id: EffectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Stat the effect modifies.
    pub stat: String,
    pub magnitude: i64,
    /// Relative selection weight. Zero-weight effects are never drawn.
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl SpecialEffect {
    #[must_use]
    pub fn new(id: EffectId, name: impl Into<String>, stat: impl Into<String>, magnitude: i64) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            stat: stat.into(),
            magnitude,
            weight: 1,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

/// Effect pools keyed by item category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectPoolRegistry {
    pools: FxHashMap<ItemCategory, Vec<SpecialEffect>>,
}

impl EffectPoolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect to a category's pool.
    ///
    /// Fails if the pool already holds an effect with the same ID.
    pub fn register(&mut self, category: ItemCategory, effect: SpecialEffect) -> Result<(), ConfigError> {
        let pool = self.pools.entry(category).or_default();
        if pool.iter().any(|e| e.id == effect.id) {
            return Err(ConfigError::Duplicate {
                kind: "effect",
                id: effect.id.to_string(),
            });
        }
        pool.push(effect);
        Ok(())
    }

    /// Check pools for duplicate effect IDs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pool in self.pools.values() {
            for (i, effect) in pool.iter().enumerate() {
                if pool[..i].iter().any(|e| e.id == effect.id) {
                    return Err(ConfigError::Duplicate {
                        kind: "effect",
                        id: effect.id.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Check every non-empty pool can supply `min_effects` distinct draws.
    ///
    /// Categories without a pool craft items with no effects at all.
    pub fn ensure_capacity(&self, min_effects: u32) -> Result<(), ConfigError> {
        for (category, pool) in &self.pools {
            let drawable = pool.iter().filter(|e| e.weight > 0).count();
            if drawable > 0 && drawable < min_effects as usize {
                return Err(ConfigError::invalid(
                    "effect_pools",
                    format!("{category:?} pool has {drawable} drawable effects, tiers need {min_effects}"),
                ));
            }
        }
        Ok(())
    }

    /// The pool for a category. Empty if none is registered.
    #[must_use]
    pub fn pool(&self, category: ItemCategory) -> &[SpecialEffect] {
        self.pools.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Draw up to `count` distinct effects from a category's pool by weight.
    ///
    /// Returns fewer than `count` when the pool runs out of drawable effects.
    /// Reference data loading rejects pools smaller than any tier's minimum.
    pub fn draw(&self, category: ItemCategory, count: usize, rng: &mut GameRng) -> Vec<SpecialEffect> {
        let pool = self.pool(category);
        let mut weights: Vec<f32> = pool.iter().map(|e| e.weight as f32).collect();
        let mut drawn = Vec::with_capacity(count.min(pool.len()));

        while drawn.len() < count {
            let Some(index) = rng.choose_weighted(&weights) else {
                break;
            };
            weights[index] = 0.0;
            drawn.push(pool[index].clone());
        }

        drawn
    }
}
