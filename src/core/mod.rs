//! Core engine types: identifiers, RNG, configuration, errors.
//!
//! These are shared by every resolution stage and depend on nothing else
//! in the crate.

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;

pub use config::{BaseChanceCurve, CrimeRollConfig, EngineConfig, LuckRange, RewardCurve};
pub use error::{
    CollaboratorError, ConfigError, DeckError, PreconditionError, PreconditionKind,
    ResolutionError, StoreError,
};
pub use ids::{ActionId, CharacterId, EffectId, ItemId, LocationId, RecipeId};
pub use rng::{GameRng, CRIME_STREAM, DECK_STREAM, EFFECT_STREAM, LUCK_STREAM};
