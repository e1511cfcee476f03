//! Scored error breakdown and the weights that combine it.

use serde::{Deserialize, Serialize};

use crate::constants::{BALANCE_WEIGHT, INEFFICIENCY_WEIGHT, UNDERPOWER_WEIGHT};

/// Weights folding the three error terms into one ranking scalar.
///
/// Balance must stay strictly dominant: the other two terms break ties
/// between allocations that point equally well, they never overrule
/// direction. The defaults encode that; callers adjusting them keep the
/// ordering contract themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorWeights {
    pub balance: f64,
    pub underpower: f64,
    pub inefficiency: f64,
}

impl Default for ErrorWeights {
    fn default() -> Self {
        Self {
            balance: BALANCE_WEIGHT,
            underpower: UNDERPOWER_WEIGHT,
            inefficiency: INEFFICIENCY_WEIGHT,
        }
    }
}

/// Error breakdown for one candidate allocation, computed fresh per
/// candidate. Lower is better on every field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolutionError {
    /// Net output pointing away from the desired direction.
    pub balance: f64,
    /// Net output short of the theoretical ceiling along the desired
    /// direction.
    pub underpowered: f64,
    /// Output cancelled between near-opposed emitters on one thruster.
    pub inefficiency: f64,
    /// Weighted sum of the three terms, the ranking scalar.
    pub total: f64,
}

impl SolutionError {
    pub fn new(balance: f64, underpowered: f64, inefficiency: f64, weights: &ErrorWeights) -> Self {
        let total = weights.balance * balance
            + weights.underpower * underpowered
            + weights.inefficiency * inefficiency;
        Self {
            balance,
            underpowered,
            inefficiency,
            total,
        }
    }
}
