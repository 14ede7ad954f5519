//! Resolution orchestrator.
//!
//! Sequences one action attempt end to end:
//!
//! 1. Claim the character and read a versioned snapshot
//! 2. Check preconditions (nothing has changed if this fails)
//! 3. Deal a hand from a fresh per-attempt deck
//! 4. Evaluate, compose and classify
//! 5. Crimes: witness and jail rolls
//! 6. Scale rewards on success
//! 7. Apply energy, cooldown and crime consequences atomically
//! 8. Grant rewards and persist the result
//!
//! Steps 3 to 6 are pure given the attempt seed. Only steps 1, 7 and 8
//! touch collaborators. Once step 7 succeeds the energy is spent; later
//! collaborator faults are reported but never refund it.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::actions::{ActionDefinition, ActionResult, CrimeResolution};
use crate::cards::{Deck, Hand};
use crate::core::{
    ActionId, CharacterId, DeckError, EngineConfig, GameRng, LocationId, ResolutionError,
    StoreError, CRIME_STREAM, DECK_STREAM,
};
use crate::crafting::{CraftedItemData, CraftingContext, MasterworkEngine};
use crate::evaluation::HandEvaluator;
use crate::outcome::classify_action;
use crate::reference::ReferenceData;
use crate::scoring::ScoringComposer;

use super::crime::resolve_crime;
use super::guard::CharacterGuard;
use super::ports::{
    CharacterMutation, CharacterStore, Clock, HistoryQuery, ResultRepository, RewardSink,
    TimeOfDayService,
};
use super::preconditions::check_preconditions;
use super::rewards::scale_reward;

/// One action attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionRequest {
    pub character_id: CharacterId,
    pub action_id: ActionId,
    pub location_id: Option<LocationId>,
    /// Fixed seed for reproducible resolution. Random when `None`.
    pub seed: Option<u64>,
}

impl ActionRequest {
    #[must_use]
    pub fn new(character_id: CharacterId, action_id: ActionId) -> Self {
        Self {
            character_id,
            action_id,
            location_id: None,
            seed: None,
        }
    }

    #[must_use]
    pub fn at(mut self, location: LocationId) -> Self {
        self.location_id = Some(location);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The collaborators an orchestrator talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub characters: Arc<dyn CharacterStore>,
    pub time_of_day: Arc<dyn TimeOfDayService>,
    pub rewards: Arc<dyn RewardSink>,
    pub results: Arc<dyn ResultRepository>,
    pub clock: Arc<dyn Clock>,
}

/// Deal a hand, reshuffling up to `retries` times if the deck runs short.
pub fn deal_with_reshuffle(
    deck: &mut Deck,
    hand_size: usize,
    retries: u32,
    rng: &mut GameRng,
) -> Result<Hand, DeckError> {
    let mut attempt = 0;
    loop {
        match deck.deal(hand_size) {
            Ok(hand) => return Ok(hand),
            Err(err) if attempt < retries => {
                attempt += 1;
                tracing::warn!(error = %err, attempt, "deck exhausted, reshuffling");
                deck.shuffle(rng);
            }
            Err(err) => return Err(err),
        }
    }
}

/// Resolves action attempts and crafting rolls.
pub struct ResolutionOrchestrator {
    config: EngineConfig,
    reference: Arc<ReferenceData>,
    crafting: MasterworkEngine,
    collaborators: Collaborators,
    guard: CharacterGuard,
}

impl ResolutionOrchestrator {
    #[must_use]
    pub fn new(config: EngineConfig, reference: Arc<ReferenceData>, collaborators: Collaborators) -> Self {
        let crafting = MasterworkEngine::new(
            config.clone(),
            Arc::new(reference.qualities.clone()),
            Arc::new(reference.effects.clone()),
        );
        Self {
            config,
            reference,
            crafting,
            collaborators,
            guard: CharacterGuard::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Resolve one action attempt.
    ///
    /// Validation failures and concurrency conflicts leave the character
    /// untouched. Any other error after the character mutation has been
    /// applied is reported without rolling back.
    pub async fn resolve_action(&self, request: ActionRequest) -> Result<ActionResult, ResolutionError> {
        let action = self
            .reference
            .actions
            .get(request.action_id)
            .ok_or(ResolutionError::UnknownAction(request.action_id))?;

        let Some(_in_flight) = self.guard.try_acquire(request.character_id) else {
            tracing::warn!(
                character_id = %request.character_id,
                action_id = %request.action_id,
                "attempt already in flight"
            );
            return Err(ResolutionError::ConcurrencyConflict(request.character_id));
        };

        let now = self.collaborators.clock.now();
        let snapshot = self.collaborators.characters.snapshot(request.character_id).await?;

        if let Err(err) = check_preconditions(action, &snapshot, now) {
            tracing::info!(
                character_id = %request.character_id,
                action_id = %action.id,
                unmet = err.unmet.len(),
                "preconditions not met"
            );
            return Err(err.into());
        }

        let rng = request.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let seed = rng.seed();
        let hand = self.deal(&rng)?;

        let hand_evaluation = HandEvaluator::evaluate(&hand);
        let breakdown = ScoringComposer::compose(&hand_evaluation, &action.suit_bonuses, &hand, &[]);
        let outcome = classify_action(breakdown.total, action.target_score);

        let crime_resolution = match action.category.crime() {
            Some(profile) => {
                let modifier = self
                    .collaborators
                    .time_of_day
                    .crime_detection_modifier(request.location_id, now)
                    .await;
                let mut crime_rng = rng.for_context(CRIME_STREAM);
                Some(resolve_crime(
                    profile,
                    outcome.success,
                    modifier,
                    &self.config.crime,
                    &mut crime_rng,
                    now,
                ))
            }
            None => None,
        };

        let rewards = outcome
            .success
            .then(|| scale_reward(&action.rewards, outcome.margin, &self.config.reward_curve));
        let cooldown_until = action.cooldown.cooldown_until(now, outcome.success);

        let mutation = Self::mutation_for(action, outcome.success, cooldown_until, crime_resolution.as_ref());
        if let Err(err) = self
            .collaborators
            .characters
            .apply(request.character_id, mutation, snapshot.version)
            .await
        {
            if matches!(err, StoreError::Conflict(_)) {
                tracing::warn!(
                    character_id = %request.character_id,
                    action_id = %action.id,
                    version = snapshot.version,
                    "character changed during resolution"
                );
            }
            return Err(err.into());
        }

        let applied_suit_bonuses = action
            .suit_bonuses
            .iter()
            .filter(|b| hand.contains_suit(b.suit))
            .cloned()
            .collect();

        let result = ActionResult {
            character_id: request.character_id,
            action_id: action.id,
            action_type: action.action_type(),
            location_id: request.location_id,
            seed,
            hand,
            hand_evaluation,
            applied_suit_bonuses,
            total_score: breakdown.total,
            breakdown,
            target_score: action.target_score,
            success: outcome.success,
            margin: outcome.margin,
            rewards,
            energy_spent: action.energy_cost,
            cooldown_until,
            timestamp: now,
            crime_resolution,
        };

        if let Some(reward) = &result.rewards {
            self.collaborators
                .rewards
                .grant_action_reward(result.character_id, reward)
                .await?;
        }
        self.collaborators.results.save_action_result(&result).await?;

        tracing::info!(
            character_id = %result.character_id,
            action_id = %result.action_id,
            category = %result.hand_evaluation.category,
            total_score = result.total_score,
            margin = result.margin,
            success = result.success,
            caught = result.caught(),
            "action resolved"
        );

        Ok(result)
    }

    /// Roll quality for a crafting attempt and hand the item to inventory
    /// and persistence.
    pub async fn craft(&self, context: &CraftingContext, seed: Option<u64>) -> Result<CraftedItemData, ResolutionError> {
        let seed = seed.map_or_else(GameRng::from_entropy, GameRng::new).seed();
        let item = self
            .crafting
            .craft(context, seed, self.collaborators.clock.now());

        self.collaborators.rewards.grant_crafted_item(&item).await?;
        self.collaborators.results.save_crafted_item(&item).await?;

        tracing::info!(
            character_id = %item.character_id,
            recipe_id = %item.recipe_id,
            total_score = item.quality_roll.total_score,
            quality = ?item.quality,
            "item crafted"
        );

        Ok(item)
    }

    /// Past action results, newest first.
    pub async fn history(&self, query: &HistoryQuery) -> Result<Vec<ActionResult>, ResolutionError> {
        Ok(self.collaborators.results.action_history(query).await?)
    }

    fn deal(&self, rng: &GameRng) -> Result<Hand, ResolutionError> {
        let mut deck_rng = rng.for_context(DECK_STREAM);
        let mut deck = Deck::shuffled(&mut deck_rng);
        deal_with_reshuffle(
            &mut deck,
            self.config.hand_size,
            self.config.reshuffle_retries,
            &mut deck_rng,
        )
        .map_err(|err| ResolutionError::ResolutionFailure(err.to_string()))
    }

    fn mutation_for(
        action: &ActionDefinition,
        success: bool,
        cooldown_until: Option<DateTime<Utc>>,
        crime: Option<&CrimeResolution>,
    ) -> CharacterMutation {
        CharacterMutation {
            energy_cost: action.energy_cost,
            cooldown: cooldown_until.map(|until| (action.id, until)),
            jail_until: crime.and_then(|c| c.jail_until),
            wanted_level_delta: crime.map_or(0, |c| c.wanted_level_delta),
            completed_action: success.then_some(action.id),
        }
    }
}
