//! Allocation scoring: the three-term error model.

use glam::DVec3;

use thrustfit_core::allocation::ThrusterMap;
use thrustfit_core::constants::{MAX_ERROR, OPPOSED_DOT_THRESHOLD};
use thrustfit_core::contribution::ContributionModel;
use thrustfit_core::error::{AllocError, AllocResult};
use thrustfit_core::score::{ErrorWeights, SolutionError};
use thrustfit_core::types::{near_zero, Objective};

/// Score one candidate allocation against an objective.
///
/// Applies every level to its contribution, sums net force and net
/// torque, and charges three error terms: balance (net output pointing
/// the wrong way), underpower (short of the axis ceiling), and
/// inefficiency (opposed emitters on one thruster cancelling each
/// other). A candidate that nets nothing on both axes is pinned to the
/// sentinel error per present axis so search never settles on firing
/// nothing.
pub fn score(
    map: &ThrusterMap,
    model: &ContributionModel,
    objective: &Objective,
    weights: &ErrorWeights,
) -> AllocResult<SolutionError> {
    if objective.is_empty() {
        return Err(AllocError::MissingObjective);
    }
    map.ensure_matches(model)?;

    let mut net_force = DVec3::ZERO;
    let mut net_torque = DVec3::ZERO;
    for (level, contribution) in map.entries().iter().zip(model.entries()) {
        net_force += contribution.translation_force * level.percent;
        net_torque += contribution.torque * level.percent;
    }

    let inefficiency = opposed_waste(map, model);

    if near_zero(net_force) && near_zero(net_torque) {
        let mut balance = 0.0;
        let mut underpowered = 0.0;
        if objective.linear.is_some() {
            balance += MAX_ERROR;
            underpowered += MAX_ERROR;
        }
        if objective.rotation.is_some() {
            balance += MAX_ERROR;
            underpowered += MAX_ERROR;
        }
        return Ok(SolutionError::new(
            balance,
            underpowered,
            inefficiency,
            weights,
        ));
    }

    let balance = balance_term(objective.linear, net_force) + balance_term(objective.rotation, net_torque);
    let underpowered = underpower_term(objective.linear, net_force, objective.max_linear)
        + underpower_term(objective.rotation, net_torque, objective.max_rotation);

    Ok(SolutionError::new(
        balance,
        underpowered,
        inefficiency,
        weights,
    ))
}

/// Balance error on one axis: the share of the net output's squared
/// length that points away from the target. With no usable target,
/// anything nonzero on this axis is unwanted and counts in full.
fn balance_term(target: Option<DVec3>, actual: DVec3) -> f64 {
    let len_sq = actual.length_squared();
    let Some(target) = target else {
        return len_sq;
    };
    if near_zero(target) {
        return len_sq;
    }
    if near_zero(actual) {
        // Nothing fired this axis; the underpower term charges for that.
        return 0.0;
    }
    let dot = target.normalize().dot(actual.normalize());
    let difference = (1.0 - dot) / 2.0;
    len_sq * difference
}

/// Underpower on one axis: squared shortfall against the theoretical
/// ceiling, with the full ceiling charged when the net output points
/// backward or nowhere.
fn underpower_term(target: Option<DVec3>, actual: DVec3, max_possible: f64) -> f64 {
    let Some(target) = target else {
        return 0.0;
    };
    if near_zero(target) {
        return 0.0;
    }
    let max_sq = max_possible * max_possible;
    if near_zero(actual) {
        return max_sq;
    }
    let dot = target.normalize().dot(actual.normalize());
    let len_sq = actual.length_squared();
    if len_sq * dot >= max_sq {
        return 0.0;
    }
    if dot > 0.0 {
        max_sq - len_sq * dot
    } else {
        max_sq
    }
}

/// Waste from near-opposed fire directions on one thruster firing at the
/// same time: the cancelled force magnitude, squared, summed over pairs.
/// Opposed emitters on different thrusters are not waste; that is how
/// torque couples work.
fn opposed_waste(map: &ThrusterMap, model: &ContributionModel) -> f64 {
    let entries = model.entries();
    let levels = map.entries();
    let mut total = 0.0;

    // Entries are grouped by thruster in model order.
    let mut group_start = 0;
    while group_start < entries.len() {
        let thruster = entries[group_start].emitter.thruster;
        let mut group_end = group_start + 1;
        while group_end < entries.len() && entries[group_end].emitter.thruster == thruster {
            group_end += 1;
        }
        for i in group_start..group_end {
            for j in (i + 1)..group_end {
                let dir_i = entries[i].translation_force.normalize_or_zero();
                let dir_j = entries[j].translation_force.normalize_or_zero();
                if dir_i.dot(dir_j) < OPPOSED_DOT_THRESHOLD {
                    let applied_i = entries[i].translation_force.length() * levels[i].percent;
                    let applied_j = entries[j].translation_force.length() * levels[j].percent;
                    let wasted = applied_i.min(applied_j);
                    total += wasted * wasted;
                }
            }
        }
        group_start = group_end;
    }
    total
}
