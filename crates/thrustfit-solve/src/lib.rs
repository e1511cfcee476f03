//! Thruster allocation solving for thrustfit.
//!
//! Headless engine side of the workspace: contribution-aware random
//! seeding, mutation, three-term scoring, and the adapter and session
//! plumbing that an external stochastic search loop drives. Fully
//! deterministic for a given seed; every randomized operation takes the
//! caller's RNG.

pub mod adapter;
pub mod generate;
pub mod mutate;
pub mod score;
pub mod session;

pub use thrustfit_core as core;
