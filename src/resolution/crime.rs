//! Crime resolution: witness and jail rolls.
//!
//! A failed crime may be witnessed. The witness check is a die roll
//! against a threshold derived from the crime's detection chance, scaled by
//! the time-of-day modifier. A caught criminal then faces a second roll for
//! jail. Both checks use the same ordered-threshold lookup as action
//! outcomes, with an exclusive bound: the roll must beat the threshold.
//!
//! Rolls come from the attempt's `"crime"` stream, so they are reproducible
//! from the attempt seed and independent of the cards dealt.

use chrono::{DateTime, Duration, Utc};

use crate::actions::{CrimeProfile, CrimeResolution};
use crate::core::{CrimeRollConfig, GameRng};
use crate::outcome::{Bound, ThresholdTable};

/// Effective detection chance in percent, clamped to `0..=100`.
#[must_use]
pub fn detection_percent(base_detection_percent: i64, time_modifier: f64) -> i64 {
    if !time_modifier.is_finite() {
        return base_detection_percent.clamp(0, 100);
    }
    // Truncation matches the integer policy used for score percentages.
    ((base_detection_percent as f64) * time_modifier).clamp(0.0, 100.0) as i64
}

/// Threshold a `1..=die_sides` roll must exceed for a `chance_percent` event.
#[must_use]
pub fn roll_threshold(chance_percent: i64, die_sides: i64) -> i64 {
    die_sides - chance_percent.clamp(0, 100) * die_sides / 100
}

fn beats(roll: i64, threshold: i64) -> bool {
    *ThresholdTable::binary(threshold, false, true, Bound::Exclusive).classify(roll)
}

/// Resolve the crime branch of an attempt.
///
/// A successful crime is never witnessed and rolls nothing.
#[must_use]
pub fn resolve_crime(
    profile: &CrimeProfile,
    success: bool,
    time_modifier: f64,
    rolls: &CrimeRollConfig,
    rng: &mut GameRng,
    now: DateTime<Utc>,
) -> CrimeResolution {
    let detection = detection_percent(profile.base_detection_percent, time_modifier);
    let witness_threshold = roll_threshold(detection, rolls.die_sides);

    if success {
        return CrimeResolution::unwitnessed(detection, witness_threshold);
    }

    let witness_roll = rng.roll(1, rolls.die_sides);
    let caught = beats(witness_roll, witness_threshold);
    let jail_threshold = roll_threshold(profile.jail_chance_percent, rolls.die_sides);

    let mut resolution = CrimeResolution {
        detection_percent: detection,
        witness_roll: Some(witness_roll),
        witness_threshold,
        caught,
        jail_roll: None,
        jail_threshold,
        jailed: false,
        jail_minutes: None,
        jail_until: None,
        wanted_level_delta: 0,
    };
    if !caught {
        return resolution;
    }

    resolution.wanted_level_delta = profile.wanted_level_delta;
    let jail_roll = rng.roll(1, rolls.die_sides);
    resolution.jail_roll = Some(jail_roll);

    if beats(jail_roll, jail_threshold) {
        let minutes = rng.roll(
            i64::from(profile.jail_minutes_min),
            i64::from(profile.jail_minutes_max),
        );
        resolution.jailed = true;
        resolution.jail_minutes = u32::try_from(minutes).ok();
        resolution.jail_until = Some(now + Duration::minutes(minutes));
    }

    tracing::debug!(
        witness_roll,
        witness_threshold,
        jail_roll,
        jailed = resolution.jailed,
        "crime witnessed"
    );

    resolution
}
