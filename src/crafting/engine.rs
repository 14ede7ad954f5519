//! Masterwork quality engine.
//!
//! A quality roll follows the same shape as an action attempt: a base
//! score, context modifiers in a fixed order, one random term, then an
//! ordered-threshold lookup. The composed breakdown is the player-facing
//! audit trail, so every term appears in it even when zero.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::context::{CraftedItemData, CraftingContext, QualityRoll};
use super::effects::EffectPoolRegistry;
use super::quality::QualityTable;
use crate::core::{EngineConfig, GameRng, EFFECT_STREAM, LUCK_STREAM};
use crate::scoring::{ContextModifier, ScoringComposer};

/// Breakdown labels, in application order.
pub const BASE_CHANCE_LABEL: &str = "Base chance";
pub const MATERIAL_LABEL: &str = "Material bonus";
pub const TOOL_LABEL: &str = "Tool bonus";
pub const FACILITY_LABEL: &str = "Facility bonus";
pub const SPECIALIZATION_LABEL: &str = "Specialization bonus";
pub const LUCK_LABEL: &str = "Luck";

/// Resolves crafting quality and builds crafted items.
#[derive(Clone, Debug)]
pub struct MasterworkEngine {
    config: EngineConfig,
    qualities: Arc<QualityTable>,
    effects: Arc<EffectPoolRegistry>,
}

impl MasterworkEngine {
    #[must_use]
    pub fn new(config: EngineConfig, qualities: Arc<QualityTable>, effects: Arc<EffectPoolRegistry>) -> Self {
        Self {
            config,
            qualities,
            effects,
        }
    }

    #[must_use]
    pub fn qualities(&self) -> &QualityTable {
        &self.qualities
    }

    /// Compose and classify a quality roll with a known luck term.
    ///
    /// Pure: the same context and luck always give the same roll.
    #[must_use]
    pub fn compose_quality(&self, ctx: &CraftingContext, luck_roll: i64) -> QualityRoll {
        let base_chance = self
            .config
            .base_chance
            .base_chance(ctx.skill_level, ctx.recipe_level);

        let modifiers = [
            ContextModifier::flat(MATERIAL_LABEL, ctx.material_bonus),
            ContextModifier::flat(TOOL_LABEL, ctx.tool_bonus),
            ContextModifier::flat(FACILITY_LABEL, ctx.facility_bonus),
            ContextModifier::flat(SPECIALIZATION_LABEL, ctx.specialization_bonus),
            ContextModifier::flat(LUCK_LABEL, luck_roll),
        ];
        let breakdown =
            ScoringComposer::compose_from_base(BASE_CHANCE_LABEL, base_chance, &[], None, &modifiers);
        let final_quality = self.qualities.classify(breakdown.total).quality;

        QualityRoll {
            base_chance,
            material_bonus: ctx.material_bonus,
            tool_bonus: ctx.tool_bonus,
            facility_bonus: ctx.facility_bonus,
            specialization_bonus: ctx.specialization_bonus,
            luck_roll,
            total_score: breakdown.total,
            final_quality,
            breakdown,
        }
    }

    /// Roll the luck term from the attempt's luck stream and compose.
    #[must_use]
    pub fn roll_quality(&self, ctx: &CraftingContext, rng: &GameRng) -> QualityRoll {
        let mut luck = rng.for_context(LUCK_STREAM);
        let luck_roll = luck.roll(self.config.luck.min, self.config.luck.max);
        self.compose_quality(ctx, luck_roll)
    }

    /// Roll quality, then build the item: multipliers, durability and effects.
    #[must_use]
    pub fn craft(&self, ctx: &CraftingContext, seed: u64, crafted_at: DateTime<Utc>) -> CraftedItemData {
        let rng = GameRng::new(seed);
        let quality_roll = self.roll_quality(ctx, &rng);
        let tier = self.qualities.classify(quality_roll.total_score);

        let mut effect_rng = rng.for_context(EFFECT_STREAM);
        let count = effect_rng.roll(i64::from(tier.min_effects), i64::from(tier.max_effects));
        let count = usize::try_from(count).unwrap_or(0);
        let special_effects = self.effects.draw(ctx.item_category, count, &mut effect_rng);

        let max_durability = u32::try_from(
            u64::from(ctx.base_durability) * u64::from(tier.durability_multiplier_percent) / 100,
        )
        .unwrap_or(u32::MAX);

        tracing::debug!(
            character_id = %ctx.character_id,
            recipe_id = %ctx.recipe_id,
            total_score = quality_roll.total_score,
            quality = ?tier.quality,
            effects = special_effects.len(),
            "crafted item"
        );

        CraftedItemData {
            character_id: ctx.character_id,
            recipe_id: ctx.recipe_id,
            item_category: ctx.item_category,
            quality: tier.quality,
            stat_multiplier_percent: tier.stat_multiplier_percent,
            max_durability,
            special_effects,
            can_rename: tier.quality.allows_custom_name(),
            quality_roll,
            seed,
            crafted_at,
        }
    }
}
