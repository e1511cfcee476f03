//! Thruster geometry: the static input read once per model build.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// One fixed fire direction on a thruster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireDirection {
    /// Unit thrust direction in the body frame.
    pub direction: DVec3,
    /// Force magnitude at 100% fire (newtons).
    pub max_force: f64,
}

impl FireDirection {
    /// Normalizes `direction` on construction. A zero direction stays zero
    /// and contributes nothing.
    pub fn new(direction: DVec3, max_force: f64) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            max_force,
        }
    }
}

/// A thruster mounted on the body. Its identity is its index in the
/// body's thruster list; geometry never changes after model build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thruster {
    /// Mount position relative to the body frame origin (meters).
    pub position: DVec3,
    /// Fire directions in declared order.
    pub directions: Vec<FireDirection>,
}

impl Thruster {
    pub fn new(position: DVec3, directions: Vec<FireDirection>) -> Self {
        Self {
            position,
            directions,
        }
    }

    /// A thruster with a single fire direction.
    pub fn single(position: DVec3, direction: DVec3, max_force: f64) -> Self {
        Self::new(position, vec![FireDirection::new(direction, max_force)])
    }

    /// A thruster that can fire along `direction` and its reverse, at the
    /// same strength. Common for reaction-control pairs.
    pub fn opposed(position: DVec3, direction: DVec3, max_force: f64) -> Self {
        Self::new(
            position,
            vec![
                FireDirection::new(direction, max_force),
                FireDirection::new(-direction, max_force),
            ],
        )
    }
}
