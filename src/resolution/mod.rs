//! Action and crafting resolution against external collaborators.
//!
//! ## Key Types
//!
//! - `ResolutionOrchestrator`: Runs an attempt from preconditions to persistence
//! - `CharacterStore`, `TimeOfDayService`, `RewardSink`, `ResultRepository`, `Clock`:
//!   Collaborator ports
//! - `CharacterGuard`: Serializes attempts per character
//! - `InMemoryCharacterStore`, `InMemoryResultRepository`, `RewardLedger`:
//!   In-process collaborators
//!
//! ## Concurrency
//!
//! Two attempts by the same character never both spend energy. The first
//! holds the character's in-flight guard for the whole attempt and a second
//! concurrent attempt fails fast with `ConcurrencyConflict`. Independently,
//! the store applies each mutation only at the snapshot's version, so a
//! writer outside this orchestrator also surfaces as a conflict.

pub mod crime;
pub mod guard;
pub mod memory;
pub mod orchestrator;
pub mod ports;
pub mod preconditions;
pub mod rewards;

pub use crime::{detection_percent, resolve_crime, roll_threshold};
pub use guard::CharacterGuard;
pub use memory::{DayNightDetection, InMemoryCharacterStore, InMemoryResultRepository, RewardLedger};
pub use orchestrator::{deal_with_reshuffle, ActionRequest, Collaborators, ResolutionOrchestrator};
pub use ports::{
    CharacterMutation, CharacterSnapshot, CharacterStore, Clock, FixedClock, HistoryQuery,
    ResultRepository, RewardSink, SystemClock, TimeOfDayService,
};
pub use preconditions::check_preconditions;
pub use rewards::scale_reward;
