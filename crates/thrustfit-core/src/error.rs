//! Contract-violation errors surfaced by the allocation engine.

use thiserror::Error;

/// Errors raised by model construction, allocation bridging, and scoring.
#[derive(Debug, Error, PartialEq)]
pub enum AllocError {
    /// Scoring was requested with no target on either axis.
    #[error("objective has neither a linear nor a rotational target")]
    MissingObjective,
    /// An allocation does not correspond 1:1 with the contribution model
    /// it is being applied to. Allocations are never truncated or padded.
    #[error("allocation does not correspond to the contribution model (model has {expected} emitters, allocation has {actual} levels)")]
    AllocationMismatch { expected: usize, actual: usize },
    /// A thruster was declared with no fire directions.
    #[error("thruster {thruster} declares no fire directions")]
    BareThruster { thruster: usize },
}

pub type AllocResult<T> = Result<T, AllocError>;
