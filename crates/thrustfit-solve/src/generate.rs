//! Random allocation seeding and output ceilings.

use glam::DVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use thrustfit_core::allocation::ThrusterMap;
use thrustfit_core::contribution::ContributionModel;
use thrustfit_core::types::{Axis, Objective};

/// Draw a uniformly random allocation over the model's emitters,
/// normalized so it is immediately a usable search seed.
pub fn random_map(model: &ContributionModel, rng: &mut ChaCha8Rng) -> ThrusterMap {
    ThrusterMap::from_fn(model, |_| rng.gen_range(0.0..1.0)).normalized()
}

/// Theoretical output ceiling along `direction`: the summed projection
/// magnitude of every emitter's relevant component, as if all of them
/// fired at 100% at once.
///
/// A loose bound on purpose. It ignores that firing everything may be
/// physically incoherent, and it counts anti-aligned emitters as if they
/// could be reversed. It only normalizes the underpower term and is
/// calibrated together with the underpower weight; tightening one without
/// the other shifts the ranking.
pub fn maximum_possible(model: &ContributionModel, direction: DVec3, axis: Axis) -> f64 {
    let unit = direction.normalize_or_zero();
    if unit == DVec3::ZERO {
        return 0.0;
    }
    model
        .entries()
        .iter()
        .map(|contribution| contribution.component(axis).dot(unit).abs())
        .sum()
}

/// Build an objective against a model, filling each present axis ceiling
/// from [`maximum_possible`].
pub fn objective_for(
    model: &ContributionModel,
    linear: Option<DVec3>,
    rotation: Option<DVec3>,
) -> Objective {
    Objective {
        linear,
        rotation,
        max_linear: linear
            .map(|direction| maximum_possible(model, direction, Axis::Linear))
            .unwrap_or(0.0),
        max_rotation: rotation
            .map(|direction| maximum_possible(model, direction, Axis::Rotational))
            .unwrap_or(0.0),
    }
}
