//! Allocation mutation for stochastic search.

use rand::seq::index;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use thrustfit_core::allocation::ThrusterMap;
use thrustfit_core::constants::{CHANGE_FRACTION, DRIFT_FACTOR};

/// Tuning for one mutation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationTuning {
    /// Fraction of levels perturbed per pass. Rounded to a count, floored
    /// to one so every pass on a non-empty map changes something.
    pub change_fraction: f64,
    /// Half-width of the uniform drift applied to a chosen level.
    pub drift_factor: f64,
}

impl Default for MutationTuning {
    fn default() -> Self {
        Self {
            change_fraction: CHANGE_FRACTION,
            drift_factor: DRIFT_FACTOR,
        }
    }
}

/// Perturb a bounded random subset of the map's levels.
///
/// Picks `round(len * change_fraction)` distinct levels (at least one,
/// no index twice) and drifts each by a uniform step in ±drift_factor,
/// clamped back into [0, 1]. The result is not renormalized here;
/// mutation and normalization are orthogonal and the caller sequences
/// them.
pub fn mutate(map: &ThrusterMap, tuning: &MutationTuning, rng: &mut ChaCha8Rng) -> ThrusterMap {
    if map.is_empty() {
        return map.clone();
    }
    let raw_count = (map.len() as f64 * tuning.change_fraction).round() as usize;
    let change_count = raw_count.clamp(1, map.len());

    let mut chosen = vec![false; map.len()];
    for picked in index::sample(rng, map.len(), change_count).iter() {
        chosen[picked] = true;
    }
    map.map_levels(|index, percent| {
        if chosen[index] {
            drift_level(percent, tuning.drift_factor, rng)
        } else {
            percent
        }
    })
}

/// One drift step: uniform in ±drift, clamped back into [0, 1].
fn drift_level(percent: f64, drift: f64, rng: &mut ChaCha8Rng) -> f64 {
    if drift <= 0.0 {
        return percent;
    }
    let step = rng.gen_range(-drift..drift);
    (percent + step).clamp(0.0, 1.0)
}
