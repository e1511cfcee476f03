//! Core types for the thrustfit allocation engine.
//!
//! This crate defines the vocabulary shared across the workspace:
//! thruster geometry, per-emitter contributions, allocation maps, the
//! scored error breakdown, and the engine's error type.
//! It has no dependency on any runtime framework or random source.

pub mod allocation;
pub mod constants;
pub mod contribution;
pub mod error;
pub mod score;
pub mod thruster;
pub mod types;
