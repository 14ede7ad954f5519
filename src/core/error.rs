//! Error taxonomy.
//!
//! Scoring and classification are total and never fail. Only the steps that
//! touch the deck, the reference data, or an external collaborator return
//! errors, and only [`ResolutionError`] crosses the public resolution API.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::ids::{ActionId, CharacterId};

/// Deck draw failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// More cards were requested than remain in the deck.
    #[error("Insufficient cards: requested {requested}, {remaining} remaining")]
    InsufficientCards { requested: usize, remaining: usize },
}

/// Invalid configuration or reference data.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A threshold table must have at least one entry.
    #[error("Threshold table is empty")]
    EmptyThresholds,

    /// Threshold entries must be strictly ascending by minimum score.
    #[error("Threshold table not strictly ascending at entry {index} (min score {min_score})")]
    UnsortedThresholds { index: usize, min_score: i64 },

    /// A numeric setting is outside its allowed range.
    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    /// Two reference entries share an identifier.
    #[error("Duplicate {kind} id {id}")]
    Duplicate { kind: &'static str, id: String },

    /// Reference data could not be parsed.
    #[error("Reference data parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create an invalid setting error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            reason: reason.into(),
        }
    }
}

/// A single unmet precondition for an action attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreconditionKind {
    InsufficientEnergy { required: u32, available: u32 },
    LevelTooLow { required: u32, actual: u32 },
    OnCooldown { until: DateTime<Utc> },
    SkillTooLow { skill: String, required: u32, actual: u32 },
    Jailed { until: DateTime<Utc> },
    Locked { missing_action: ActionId },
}

impl std::fmt::Display for PreconditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientEnergy { required, available } => {
                write!(f, "energy {available}/{required}")
            }
            Self::LevelTooLow { required, actual } => write!(f, "level {actual} < {required}"),
            Self::OnCooldown { until } => write!(f, "on cooldown until {until}"),
            Self::SkillTooLow {
                skill,
                required,
                actual,
            } => write!(f, "skill {skill} {actual} < {required}"),
            Self::Jailed { until } => write!(f, "jailed until {until}"),
            Self::Locked { missing_action } => write!(f, "locked: requires {missing_action}"),
        }
    }
}

/// Every precondition an attempt failed. Never empty.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Preconditions not met: {}", join_kinds(.unmet))]
pub struct PreconditionError {
    pub unmet: Vec<PreconditionKind>,
}

fn join_kinds(kinds: &[PreconditionKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl PreconditionError {
    /// Check whether a given kind of precondition is among the failures.
    pub fn has(&self, predicate: impl Fn(&PreconditionKind) -> bool) -> bool {
        self.unmet.iter().any(predicate)
    }
}

/// Errors surfaced by the character-state collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The character changed between snapshot and apply.
    #[error("Concurrent modification of {0}")]
    Conflict(CharacterId),

    #[error("{0} not found")]
    NotFound(CharacterId),

    #[error("Character store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the persistence, reward and inventory collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Reward grant failed: {0}")]
    Reward(String),

    #[error("Encoding failed: {0}")]
    Encoding(String),
}

/// Caller-facing resolution errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// Unmet precondition. No state was changed.
    #[error(transparent)]
    Validation(#[from] PreconditionError),

    /// The character lost the atomic race. Retry the whole attempt.
    #[error("Concurrency conflict for {0}")]
    ConcurrencyConflict(CharacterId),

    /// Fatal for this attempt. No result was persisted.
    #[error("Resolution failed: {0}")]
    ResolutionFailure(String),

    #[error("Unknown action {0}")]
    UnknownAction(ActionId),

    #[error("{0} not found")]
    CharacterNotFound(CharacterId),

    #[error("Character store error: {0}")]
    Store(String),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl From<StoreError> for ResolutionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(id) => Self::ConcurrencyConflict(id),
            StoreError::NotFound(id) => Self::CharacterNotFound(id),
            StoreError::Unavailable(msg) => Self::Store(msg),
        }
    }
}
