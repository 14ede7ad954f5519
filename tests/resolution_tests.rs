//! End-to-end resolution tests with in-memory collaborators.
//!
//! These tests drive the orchestrator the way a game server would:
//! - Reference data loaded from JSON once
//! - Character state behind a versioned store
//! - Results persisted and queried back as history

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use destiny_engine::actions::ActionType;
use destiny_engine::core::{
    ActionId, CharacterId, EngineConfig, LocationId, PreconditionKind, RecipeId, ResolutionError,
    StoreError,
};
use destiny_engine::crafting::{CraftingContext, ItemCategory};
use destiny_engine::reference::ReferenceData;
use destiny_engine::resolution::{
    ActionRequest, CharacterMutation, CharacterSnapshot, CharacterStore, Clock, Collaborators,
    DayNightDetection, FixedClock, HistoryQuery, InMemoryCharacterStore, InMemoryResultRepository,
    ResolutionOrchestrator, ResultRepository, RewardLedger,
};

const HERO: CharacterId = CharacterId::new(1);
const RIVAL: CharacterId = CharacterId::new(2);

const BRAWL: ActionId = ActionId::new(1);
const LOST_CAUSE: ActionId = ActionId::new(2);
const BANK_JOB: ActionId = ActionId::new(3);
const GRAND_HEIST: ActionId = ActionId::new(4);

const WORLD: &str = r#"{
    "actions": [
        { "id": 1, "name": "Saloon Brawl", "difficulty": 1, "energy_cost": 10, "target_score": 0,
          "category": { "type": "combat" },
          "suit_bonuses": [{ "suit": "Spades", "kind": { "flat": 15 } }],
          "rewards": { "xp": 20, "gold": 10 } },
        { "id": 2, "name": "Charm the Sheriff", "difficulty": 9, "energy_cost": 5, "target_score": 10000,
          "category": { "type": "social" },
          "cooldown": { "type": "on_failure", "seconds": 600 } },
        { "id": 3, "name": "Bank Job", "difficulty": 8, "energy_cost": 20, "target_score": 10000,
          "category": { "type": "crime", "base_detection_percent": 100, "jail_chance_percent": 100,
                        "jail_minutes_min": 30, "jail_minutes_max": 60, "wanted_level_delta": 2 } },
        { "id": 4, "name": "Grand Heist", "difficulty": 10, "energy_cost": 30, "target_score": 0,
          "category": { "type": "crime", "base_detection_percent": 50, "jail_chance_percent": 50,
                        "jail_minutes_min": 30, "jail_minutes_max": 60, "wanted_level_delta": 3 },
          "rewards": { "xp": 100, "gold": 500 } }
    ],
    "effect_pools": {
        "weapon": [
            { "id": 1, "name": "Keen", "stat": "damage", "magnitude": 4 },
            { "id": 2, "name": "Balanced", "stat": "accuracy", "magnitude": 3 },
            { "id": 3, "name": "Vicious", "stat": "crit", "magnitude": 5 }
        ]
    }
}"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 14, 12, 0, 0).unwrap()
}

/// Advances one second per reading.
struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        self.start + Duration::seconds(self.ticks.fetch_add(1, Ordering::SeqCst))
    }
}

/// Reads the snapshot, then yields to the scheduler before returning it.
struct YieldingStore {
    inner: Arc<InMemoryCharacterStore>,
}

#[async_trait]
impl CharacterStore for YieldingStore {
    async fn snapshot(&self, id: CharacterId) -> Result<CharacterSnapshot, StoreError> {
        let snapshot = self.inner.snapshot(id).await;
        tokio::task::yield_now().await;
        snapshot
    }

    async fn apply(
        &self,
        id: CharacterId,
        mutation: CharacterMutation,
        expected_version: u64,
    ) -> Result<u64, StoreError> {
        self.inner.apply(id, mutation, expected_version).await
    }
}

struct World {
    store: Arc<InMemoryCharacterStore>,
    results: Arc<InMemoryResultRepository>,
    ledger: Arc<RewardLedger>,
    reference: Arc<ReferenceData>,
}

impl World {
    fn new() -> Self {
        init_tracing();
        let store = Arc::new(InMemoryCharacterStore::new());
        store.insert(CharacterSnapshot::new(HERO, 100, 5));
        store.insert(CharacterSnapshot::new(RIVAL, 100, 5));
        Self {
            store,
            results: Arc::new(InMemoryResultRepository::new()),
            ledger: Arc::new(RewardLedger::new()),
            reference: ReferenceData::load_shared(WORLD).unwrap(),
        }
    }

    fn orchestrator_with(&self, characters: Arc<dyn CharacterStore>, clock: Arc<dyn Clock>) -> ResolutionOrchestrator {
        ResolutionOrchestrator::new(
            EngineConfig::default(),
            Arc::clone(&self.reference),
            Collaborators {
                characters,
                time_of_day: Arc::new(DayNightDetection::default()),
                rewards: self.ledger.clone(),
                results: self.results.clone(),
                clock,
            },
        )
    }

    fn orchestrator(&self) -> ResolutionOrchestrator {
        self.orchestrator_with(self.store.clone(), Arc::new(FixedClock(noon())))
    }
}

/// Test a successful combat action end to end.
#[tokio::test]
async fn test_successful_action() {
    let world = World::new();
    let orchestrator = world.orchestrator();

    let result = orchestrator
        .resolve_action(ActionRequest::new(HERO, BRAWL).with_seed(11))
        .await
        .unwrap();

    assert!(result.success);
    assert!(result.margin >= 0);
    assert_eq!(result.hand.len(), 5);
    assert_eq!(result.total_score, result.breakdown.replay());
    let rewards = result.rewards.clone().unwrap();
    assert!(rewards.xp >= 20);
    assert!(rewards.xp <= 30);

    // Spade bonus is recorded exactly when the hand holds a spade
    let has_spade = result.hand.cards().iter().any(|c| c.suit == destiny_engine::cards::Suit::Spades);
    assert_eq!(result.applied_suit_bonuses.len(), usize::from(has_spade));

    let hero = world.store.get(HERO).unwrap();
    assert_eq!(hero.energy, 90);
    assert_eq!(hero.version, 1);
    assert!(hero.completed_actions.contains(&BRAWL));

    assert_eq!(world.ledger.rewards().await, vec![(HERO, rewards)]);
    assert_eq!(world.results.action_count().await, 1);
}

/// Test that the same seed resolves to an identical result.
#[tokio::test]
async fn test_same_seed_same_result() {
    let first = World::new();
    let second = World::new();

    let a = first
        .orchestrator()
        .resolve_action(ActionRequest::new(HERO, BRAWL).with_seed(777))
        .await
        .unwrap();
    let b = second
        .orchestrator()
        .resolve_action(ActionRequest::new(HERO, BRAWL).with_seed(777))
        .await
        .unwrap();

    assert_eq!(a, b);
}

/// Test that a failed crime is witnessed, jails the character, and grants nothing.
#[tokio::test]
async fn test_failed_crime_caught_and_jailed() {
    let world = World::new();
    let orchestrator = world.orchestrator();

    let result = orchestrator
        .resolve_action(ActionRequest::new(HERO, BANK_JOB).at(LocationId::new(3)).with_seed(5))
        .await
        .unwrap();

    assert!(!result.success);
    assert!(result.rewards.is_none());
    let crime = result.crime_resolution.clone().unwrap();
    assert!(crime.caught);
    assert!(crime.jailed);
    assert_eq!(crime.detection_percent, 100);
    assert!((30..=60).contains(&crime.jail_minutes.unwrap()));

    let hero = world.store.get(HERO).unwrap();
    assert_eq!(hero.energy, 80);
    assert_eq!(hero.wanted_level, 2);
    assert_eq!(hero.jailed_until, crime.jail_until);
    assert!(world.ledger.rewards().await.is_empty());

    // A jailed character cannot act
    let err = orchestrator
        .resolve_action(ActionRequest::new(HERO, BRAWL))
        .await
        .unwrap_err();
    match err {
        ResolutionError::Validation(e) => assert!(e.has(|k| matches!(k, PreconditionKind::Jailed { .. }))),
        other => panic!("expected jailed, got {other:?}"),
    }
    assert_eq!(world.store.get(HERO).unwrap().energy, 80);
}

/// Test that a successful crime is never witnessed.
#[tokio::test]
async fn test_successful_crime_unwitnessed() {
    let world = World::new();
    let result = world
        .orchestrator()
        .resolve_action(ActionRequest::new(HERO, GRAND_HEIST).with_seed(1))
        .await
        .unwrap();

    assert!(result.success);
    assert!(!result.caught());
    assert!(result.rewards.is_some());
    assert_eq!(world.store.get(HERO).unwrap().wanted_level, 0);
}

/// Test that a failure cooldown blocks the next attempt.
#[tokio::test]
async fn test_failure_cooldown_enforced() {
    let world = World::new();
    let orchestrator = world.orchestrator();

    let result = orchestrator
        .resolve_action(ActionRequest::new(HERO, LOST_CAUSE).with_seed(2))
        .await
        .unwrap();
    assert!(!result.success);
    assert_eq!(result.cooldown_until, Some(noon() + Duration::seconds(600)));

    let err = orchestrator
        .resolve_action(ActionRequest::new(HERO, LOST_CAUSE).with_seed(3))
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::Validation(_)));

    // Other actions are unaffected
    assert!(orchestrator
        .resolve_action(ActionRequest::new(HERO, BRAWL).with_seed(4))
        .await
        .is_ok());
}

/// Test two simultaneous attempts with energy for exactly one.
#[tokio::test]
async fn test_concurrent_attempts_same_character() {
    let world = World::new();
    world.store.insert(CharacterSnapshot::new(HERO, 10, 5));
    let store: Arc<dyn CharacterStore> = Arc::new(YieldingStore {
        inner: world.store.clone(),
    });
    let orchestrator = world.orchestrator_with(store, Arc::new(FixedClock(noon())));

    let (a, b) = tokio::join!(
        orchestrator.resolve_action(ActionRequest::new(HERO, BRAWL).with_seed(1)),
        orchestrator.resolve_action(ActionRequest::new(HERO, BRAWL).with_seed(2)),
    );

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(ResolutionError::ConcurrencyConflict(id)) if *id == HERO)));
    assert_eq!(world.store.get(HERO).unwrap().energy, 0);
}

/// Test that the versioned store catches a race the guard cannot see.
#[tokio::test]
async fn test_concurrent_attempts_across_orchestrators() {
    let world = World::new();
    world.store.insert(CharacterSnapshot::new(HERO, 10, 5));
    let store: Arc<dyn CharacterStore> = Arc::new(YieldingStore {
        inner: world.store.clone(),
    });
    let first = world.orchestrator_with(store.clone(), Arc::new(FixedClock(noon())));
    let second = world.orchestrator_with(store, Arc::new(FixedClock(noon())));

    let (a, b) = tokio::join!(
        first.resolve_action(ActionRequest::new(HERO, BRAWL).with_seed(1)),
        second.resolve_action(ActionRequest::new(HERO, BRAWL).with_seed(2)),
    );

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(ResolutionError::ConcurrencyConflict(_)))));
    assert_eq!(world.store.get(HERO).unwrap().energy, 0);
    assert_eq!(world.results.action_count().await, 1);
}

/// Test that different characters never contend.
#[tokio::test]
async fn test_concurrent_attempts_different_characters() {
    let world = World::new();
    let store: Arc<dyn CharacterStore> = Arc::new(YieldingStore {
        inner: world.store.clone(),
    });
    let orchestrator = world.orchestrator_with(store, Arc::new(FixedClock(noon())));

    let (a, b) = tokio::join!(
        orchestrator.resolve_action(ActionRequest::new(HERO, BRAWL).with_seed(1)),
        orchestrator.resolve_action(ActionRequest::new(RIVAL, BRAWL).with_seed(1)),
    );
    assert!(a.is_ok());
    assert!(b.is_ok());
}

/// Test history filters and pagination, newest first.
#[tokio::test]
async fn test_history_queries() {
    let world = World::new();
    let clock = Arc::new(SteppingClock {
        start: noon(),
        ticks: AtomicI64::new(0),
    });
    let orchestrator = world.orchestrator_with(world.store.clone(), clock);

    for seed in 0..3 {
        orchestrator
            .resolve_action(ActionRequest::new(HERO, BRAWL).with_seed(seed))
            .await
            .unwrap();
    }
    orchestrator
        .resolve_action(ActionRequest::new(HERO, LOST_CAUSE).with_seed(9))
        .await
        .unwrap();
    orchestrator
        .resolve_action(ActionRequest::new(RIVAL, BRAWL).with_seed(9))
        .await
        .unwrap();

    let all = orchestrator.history(&HistoryQuery::for_character(HERO)).await.unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].action_id, LOST_CAUSE);
    assert!(all.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

    let failures = orchestrator
        .history(&HistoryQuery::for_character(HERO).successful(false))
        .await
        .unwrap();
    assert_eq!(failures.len(), 1);

    let combat_page = orchestrator
        .history(&HistoryQuery::for_character(HERO).of_type(ActionType::Combat).page(2, 1))
        .await
        .unwrap();
    assert_eq!(combat_page.len(), 2);
    assert_eq!(combat_page[0].seed, 1);
    assert_eq!(combat_page[1].seed, 0);
}

/// Test crafting through the orchestrator.
#[tokio::test]
async fn test_crafting_round_trip() {
    let world = World::new();
    let orchestrator = world.orchestrator();

    let ctx = CraftingContext::new(HERO, RecipeId::new(8), ItemCategory::Weapon, 40, 10)
        .with_bonuses(20, 10, 10, 10)
        .with_base_durability(50);
    let item = orchestrator.craft(&ctx, Some(99)).await.unwrap();

    // 60 + 50 + luck >= 110
    assert_eq!(item.quality, destiny_engine::crafting::ItemQuality::Masterwork);
    assert!(item.can_rename);
    assert_eq!(item.max_durability, 100);
    assert!((2..=3).contains(&item.special_effects.len()));

    let again = world.orchestrator().craft(&ctx, Some(99)).await.unwrap();
    assert_eq!(item, again);

    assert_eq!(world.ledger.items().await.len(), 2);
    let history = world.results.crafting_history(HERO, 10).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], item);
}
