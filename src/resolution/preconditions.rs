//! Precondition checks for an action attempt.

use chrono::{DateTime, Utc};

use super::ports::CharacterSnapshot;
use crate::actions::ActionDefinition;
use crate::core::{PreconditionError, PreconditionKind};

/// Check every precondition and report all that fail.
///
/// Pure: reads the snapshot, changes nothing.
pub fn check_preconditions(
    action: &ActionDefinition,
    character: &CharacterSnapshot,
    now: DateTime<Utc>,
) -> Result<(), PreconditionError> {
    let mut unmet = Vec::new();

    if let Some(until) = character.jailed_until(now) {
        unmet.push(PreconditionKind::Jailed { until });
    }

    if let Some(missing_action) = action
        .unlock
        .completed_actions
        .iter()
        .copied()
        .find(|a| !character.completed_actions.contains(a))
    {
        unmet.push(PreconditionKind::Locked { missing_action });
    }

    if character.energy < action.energy_cost {
        unmet.push(PreconditionKind::InsufficientEnergy {
            required: action.energy_cost,
            available: character.energy,
        });
    }

    if character.level < action.requirements.min_level {
        unmet.push(PreconditionKind::LevelTooLow {
            required: action.requirements.min_level,
            actual: character.level,
        });
    }

    if let Some(until) = character.cooldown_until(action.id, now) {
        unmet.push(PreconditionKind::OnCooldown { until });
    }

    for requirement in &action.requirements.skills {
        let actual = character.skill(&requirement.skill);
        if actual < requirement.level {
            unmet.push(PreconditionKind::SkillTooLow {
                skill: requirement.skill.clone(),
                required: requirement.level,
                actual,
            });
        }
    }

    if unmet.is_empty() {
        Ok(())
    } else {
        Err(PreconditionError { unmet })
    }
}
