//! Allocation maps: per-emitter firing levels in model order.

use serde::{Deserialize, Serialize};

use crate::constants::{NORMALIZE_TOLERANCE, USED_PERCENT_FLOOR};
use crate::contribution::{Contribution, ContributionModel, EmitterId};
use crate::error::{AllocError, AllocResult};

/// Firing level for one emitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmitterLevel {
    pub emitter: EmitterId,
    /// Commanded fire fraction, always in [0, 1].
    pub percent: f64,
}

/// A candidate firing allocation: one level per emitter, in the same
/// fixed order as the [`ContributionModel`] it was built against.
///
/// A map is a value. Mutation and normalization return new maps; nothing
/// here mutates in place, so snapshots handed to callbacks stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrusterMap {
    entries: Vec<EmitterLevel>,
}

impl ThrusterMap {
    /// Build a map from raw levels in model order. Levels are clamped
    /// into [0, 1]. Fails if the slice length does not match the model;
    /// levels are never truncated or padded to fit.
    pub fn from_levels(model: &ContributionModel, levels: &[f64]) -> AllocResult<Self> {
        if levels.len() != model.len() {
            return Err(AllocError::AllocationMismatch {
                expected: model.len(),
                actual: levels.len(),
            });
        }
        let entries = model
            .entries()
            .iter()
            .zip(levels)
            .map(|(contribution, &level)| EmitterLevel {
                emitter: contribution.emitter,
                percent: level.clamp(0.0, 1.0),
            })
            .collect();
        Ok(Self { entries })
    }

    /// Build a map by asking `percent` for each emitter's level, clamped
    /// into [0, 1].
    pub fn from_fn(
        model: &ContributionModel,
        mut percent: impl FnMut(&Contribution) -> f64,
    ) -> Self {
        let entries = model
            .entries()
            .iter()
            .map(|contribution| EmitterLevel {
                emitter: contribution.emitter,
                percent: percent(contribution).clamp(0.0, 1.0),
            })
            .collect();
        Self { entries }
    }

    /// An all-zero allocation matching the model.
    pub fn zeroed(model: &ContributionModel) -> Self {
        Self::from_fn(model, |_| 0.0)
    }

    pub fn entries(&self) -> &[EmitterLevel] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw levels in model order, the form the search loop works on.
    pub fn levels(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.percent).collect()
    }

    /// Entries that meaningfully fire. A filtered view, computed on
    /// demand; the full fixed-order map stays the source of truth.
    pub fn used(&self) -> impl Iterator<Item = &EmitterLevel> {
        self.entries
            .iter()
            .filter(|e| e.percent > USED_PERCENT_FLOOR)
    }

    /// Strongest commanded level, 0.0 for an empty map.
    pub fn max_percent(&self) -> f64 {
        self.entries.iter().map(|e| e.percent).fold(0.0, f64::max)
    }

    /// A copy with each level replaced by `f(index, level)`, clamped back
    /// into [0, 1]. Emitter order is untouched.
    pub fn map_levels(&self, mut f: impl FnMut(usize, f64) -> f64) -> Self {
        let entries = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, e)| EmitterLevel {
                emitter: e.emitter,
                percent: f(index, e.percent).clamp(0.0, 1.0),
            })
            .collect();
        Self { entries }
    }

    /// Rescale so the strongest emitter fires at exactly 100% and every
    /// other level keeps its ratio to it. Returns the map unchanged when
    /// it is empty or its strongest level is already within tolerance of
    /// 0 (nothing to scale up) or of 1 (already normalized).
    pub fn normalized(&self) -> Self {
        let max = self.max_percent();
        if self.entries.is_empty()
            || max < NORMALIZE_TOLERANCE
            || (max - 1.0).abs() < NORMALIZE_TOLERANCE
        {
            return self.clone();
        }
        // Division keeps the strongest level at exactly 1.0.
        self.map_levels(|_, percent| percent / max)
    }

    /// Verify this map lines up 1:1 with a model: same length, same
    /// emitters in the same order.
    pub fn ensure_matches(&self, model: &ContributionModel) -> AllocResult<()> {
        let aligned = self.entries.len() == model.len()
            && self
                .entries
                .iter()
                .zip(model.entries())
                .all(|(level, contribution)| level.emitter == contribution.emitter);
        if aligned {
            Ok(())
        } else {
            Err(AllocError::AllocationMismatch {
                expected: model.len(),
                actual: self.entries.len(),
            })
        }
    }
}
