//! Action system: definitions, registry, and resolved results.
//!
//! ## Key Types
//!
//! - `ActionDefinition`: Static action data (cost, target, suits, rewards)
//! - `ActionCategory`: Crime/Combat/Craft/Social with per-category data
//! - `ActionRegistry`: Definition lookup
//! - `ActionResult`: One resolved attempt, immutable once created

pub mod definition;
pub mod registry;
pub mod result;

pub use definition::{
    ActionCategory, ActionDefinition, ActionRequirements, ActionReward, ActionType,
    CooldownPolicy, CrimeProfile, ItemReward, SkillRequirement, UnlockRequirements,
};
pub use registry::ActionRegistry;
pub use result::{ActionResult, CrimeResolution};
