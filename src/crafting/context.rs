//! Crafting inputs and quality roll records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::effects::{ItemCategory, SpecialEffect};
use super::quality::ItemQuality;
use crate::core::{CharacterId, RecipeId};
use crate::scoring::ScoreBreakdown;

/// Everything a quality roll depends on besides luck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingContext {
    pub character_id: CharacterId,
    pub recipe_id: RecipeId,
    pub item_category: ItemCategory,
    pub skill_level: u32,
    pub recipe_level: u32,
    pub material_bonus: i64,
    pub tool_bonus: i64,
    pub facility_bonus: i64,
    pub specialization_bonus: i64,
    /// Durability of a common-quality item from this recipe.
    pub base_durability: u32,
}

impl CraftingContext {
    /// Context with no bonuses.
    #[must_use]
    pub fn new(
        character_id: CharacterId,
        recipe_id: RecipeId,
        item_category: ItemCategory,
        skill_level: u32,
        recipe_level: u32,
    ) -> Self {
        Self {
            character_id,
            recipe_id,
            item_category,
            skill_level,
            recipe_level,
            material_bonus: 0,
            tool_bonus: 0,
            facility_bonus: 0,
            specialization_bonus: 0,
            base_durability: 100,
        }
    }

    /// Set material, tool, facility and specialization bonuses.
    #[must_use]
    pub fn with_bonuses(mut self, material: i64, tool: i64, facility: i64, specialization: i64) -> Self {
        self.material_bonus = material;
        self.tool_bonus = tool;
        self.facility_bonus = facility;
        self.specialization_bonus = specialization;
        self
    }

    #[must_use]
    pub fn with_base_durability(mut self, durability: u32) -> Self {
        self.base_durability = durability;
        self
    }
}

/// A resolved quality roll.
///
/// `breakdown` lists every term in application order; its terms always sum
/// to `total_score`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityRoll {
    pub base_chance: i64,
    pub material_bonus: i64,
    pub tool_bonus: i64,
    pub facility_bonus: i64,
    pub specialization_bonus: i64,
    pub luck_roll: i64,
    pub total_score: i64,
    pub final_quality: ItemQuality,
    pub breakdown: ScoreBreakdown,
}

impl QualityRoll {
    /// One line per term, e.g. `"Material bonus: +10"`, then the total.
    #[must_use]
    pub fn breakdown_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .breakdown
            .terms()
            .map(|(label, value)| format!("{label}: {value:+}"))
            .collect();
        lines.push(format!("Total: {} ({:?})", self.total_score, self.final_quality));
        lines
    }
}

/// A crafted item, ready for the inventory and persistence collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftedItemData {
    pub character_id: CharacterId,
    pub recipe_id: RecipeId,
    pub item_category: ItemCategory,
    pub quality: ItemQuality,
    pub stat_multiplier_percent: u32,
    pub max_durability: u32,
    pub special_effects: Vec<SpecialEffect>,
    /// Masterwork items may be renamed by their crafter.
    pub can_rename: bool,
    pub quality_roll: QualityRoll,
    pub seed: u64,
    pub crafted_at: DateTime<Utc>,
}
