//! # destiny-engine
//!
//! Action resolution for a persistent-world western RPG: the Destiny Deck
//! and the Masterwork crafting quality engine.
//!
//! ## Design Principles
//!
//! 1. **One Pipeline**: Actions and crafting share the same shape. Draw or
//!    roll inputs, compose a score, classify it against an ordered
//!    threshold table, and record every term.
//!
//! 2. **Deterministic From a Seed**: Every attempt resolves from one seed.
//!    Deck, crime, luck and effect rolls each use their own named stream.
//!
//! 3. **Pure Core, Thin Edges**: Evaluation, scoring and classification are
//!    total functions. Only precondition reads, the character mutation and
//!    persistence touch collaborators.
//!
//! ## Architecture
//!
//! - **Integer Scores**: All scores are `i64`; percentages truncate toward zero.
//!
//! - **Read-Only Reference Data**: Action definitions, quality tiers and
//!   effect pools load once and are shared behind an `Arc`.
//!
//! - **Per-Character Serialization**: Attempts by one character never
//!   overlap; different characters never contend.
//!
//! ## Modules
//!
//! - `core`: Identifiers, RNG, configuration, errors
//! - `cards`: Cards, the Destiny Deck, hands
//! - `evaluation`: Poker-style hand evaluation
//! - `scoring`: Suit bonuses, context modifiers, score breakdowns
//! - `outcome`: Ordered-threshold classification
//! - `actions`: Action definitions, registry, results
//! - `crafting`: Quality tiers, special effects, the Masterwork engine
//! - `reference`: Startup-loaded reference data
//! - `resolution`: Orchestrator and collaborator ports

pub mod core;
pub mod cards;
pub mod evaluation;
pub mod scoring;
pub mod outcome;
pub mod actions;
pub mod crafting;
pub mod reference;
pub mod resolution;

// Re-export commonly used types
pub use crate::core::{
    ActionId, CharacterId, EffectId, ItemId, LocationId, RecipeId,
    GameRng,
    EngineConfig, RewardCurve, BaseChanceCurve,
    ResolutionError, PreconditionError, PreconditionKind, DeckError, ConfigError,
};

pub use crate::cards::{Card, Deck, Hand, Rank, Suit};

pub use crate::evaluation::{HandCategory, HandEvaluation, HandEvaluator};

pub use crate::scoring::{BonusKind, ContextModifier, ScoreBreakdown, ScoringComposer, SuitBonus};

pub use crate::outcome::{classify_action, ActionOutcome, Bound, ThresholdTable};

pub use crate::actions::{
    ActionCategory, ActionDefinition, ActionRegistry, ActionResult, ActionReward, ActionType,
    CooldownPolicy, CrimeProfile, CrimeResolution,
};

pub use crate::crafting::{
    CraftedItemData, CraftingContext, EffectPoolRegistry, ItemCategory, ItemQuality,
    MasterworkEngine, QualityRoll, QualityTable, QualityTierDef, SpecialEffect,
};

pub use crate::reference::ReferenceData;

pub use crate::resolution::{
    ActionRequest, CharacterSnapshot, CharacterStore, Collaborators, HistoryQuery,
    ResolutionOrchestrator,
};
