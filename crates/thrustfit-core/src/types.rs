//! Objective types and small vector helpers shared across the workspace.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::NEAR_ZERO_LENGTH;

/// Which component of an emitter's contribution an operation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Translational force through the center of mass.
    Linear,
    /// Torque about the center of mass.
    Rotational,
}

/// The desired net output a candidate allocation is scored against.
///
/// Either axis target may be absent, but not both: scoring an empty
/// objective fails with [`AllocError::MissingObjective`]. The ceilings are
/// the theoretical maxima along each target direction (see
/// `maximum_possible` in the solve crate) and feed only the underpower
/// term.
///
/// [`AllocError::MissingObjective`]: crate::error::AllocError::MissingObjective
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Desired net linear force in the body frame, if any.
    pub linear: Option<DVec3>,
    /// Desired net torque in the body frame, if any.
    pub rotation: Option<DVec3>,
    /// Theoretical output ceiling along `linear`.
    pub max_linear: f64,
    /// Theoretical output ceiling along `rotation`.
    pub max_rotation: f64,
}

impl Objective {
    /// An objective with only a linear target.
    pub fn linear(target: DVec3, max_linear: f64) -> Self {
        Self {
            linear: Some(target),
            rotation: None,
            max_linear,
            max_rotation: 0.0,
        }
    }

    /// An objective with only a rotational target.
    pub fn rotational(target: DVec3, max_rotation: f64) -> Self {
        Self {
            linear: None,
            rotation: Some(target),
            max_linear: 0.0,
            max_rotation,
        }
    }

    /// An objective with targets on both axes.
    pub fn combined(linear: DVec3, rotation: DVec3, max_linear: f64, max_rotation: f64) -> Self {
        Self {
            linear: Some(linear),
            rotation: Some(rotation),
            max_linear,
            max_rotation,
        }
    }

    /// True when neither axis carries a target.
    pub fn is_empty(&self) -> bool {
        self.linear.is_none() && self.rotation.is_none()
    }
}

/// True when a vector is too short to carry a usable direction.
pub fn near_zero(v: DVec3) -> bool {
    v.length_squared() < NEAR_ZERO_LENGTH * NEAR_ZERO_LENGTH
}
