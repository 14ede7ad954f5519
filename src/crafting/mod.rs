//! Crafting: the Masterwork quality engine.
//!
//! ## Key Types
//!
//! - `CraftingContext`: Skill, recipe and bonus inputs to a roll
//! - `QualityRoll`: Every term of a roll and the resulting quality
//! - `QualityTable`: Ascending quality tiers with multipliers and effect ranges
//! - `EffectPoolRegistry`: Special effects available per item category
//! - `MasterworkEngine`: Rolls quality and builds `CraftedItemData`

pub mod context;
pub mod effects;
pub mod engine;
pub mod quality;

pub use context::{CraftedItemData, CraftingContext, QualityRoll};
pub use effects::{EffectPoolRegistry, ItemCategory, SpecialEffect};
pub use engine::MasterworkEngine;
pub use quality::{ItemQuality, QualityTable, QualityTierDef};
