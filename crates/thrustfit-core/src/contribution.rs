//! Per-emitter force and torque contributions about the center of mass.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{AllocError, AllocResult};
use crate::thruster::Thruster;
use crate::types::Axis;

/// Identity of one emitter: a (thruster, fire direction) index pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmitterId {
    /// Index of the thruster in the body's thruster list.
    pub thruster: usize,
    /// Index of the fire direction on that thruster.
    pub direction: usize,
}

/// What one emitter firing at 100% does to the body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub emitter: EmitterId,
    /// Force acting through the center of mass (newtons).
    pub translation_force: DVec3,
    /// Torque about the center of mass (newton-meters).
    pub torque: DVec3,
}

impl Contribution {
    /// The component of this contribution relevant to an axis.
    pub fn component(&self, axis: Axis) -> DVec3 {
        match axis {
            Axis::Linear => self.translation_force,
            Axis::Rotational => self.torque,
        }
    }
}

/// Precomputed contributions for every emitter on a body, in declared
/// order: thrusters in list order, fire directions in declared order
/// within each thruster.
///
/// Immutable for the lifetime of a solving session. Rebuild when the
/// thruster layout or the mass distribution changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionModel {
    entries: Vec<Contribution>,
}

impl ContributionModel {
    /// Decompose every emitter's full-fire output into a force through the
    /// center of mass and a torque about it.
    ///
    /// Fails with [`AllocError::BareThruster`] if any thruster declares no
    /// fire directions; a thruster that can emit nothing is a geometry
    /// authoring mistake, not a solvable input.
    pub fn build(thrusters: &[Thruster], center_of_mass: DVec3) -> AllocResult<Self> {
        let mut entries = Vec::with_capacity(thrusters.iter().map(|t| t.directions.len()).sum());
        for (thruster_index, thruster) in thrusters.iter().enumerate() {
            if thruster.directions.is_empty() {
                return Err(AllocError::BareThruster {
                    thruster: thruster_index,
                });
            }
            let offset = thruster.position - center_of_mass;
            for (direction_index, fire) in thruster.directions.iter().enumerate() {
                let force = fire.direction * fire.max_force;
                entries.push(Contribution {
                    emitter: EmitterId {
                        thruster: thruster_index,
                        direction: direction_index,
                    },
                    translation_force: force,
                    torque: offset.cross(force),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Contribution] {
        &self.entries
    }

    /// Number of emitters, which is also the length of every allocation
    /// built against this model.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
