//! Numeric tolerances and default tuning for the allocation engine.

// --- Sentinels ---

/// Error charged per objective axis when an allocation nets no output at all.
/// Large enough to dwarf any real geometry, but finite so weighted totals
/// stay ordered and comparable.
pub const MAX_ERROR: f64 = 1.0e12;

// --- Tolerances ---

/// Vector magnitudes below this are treated as zero when normalizing
/// directions or testing net output.
pub const NEAR_ZERO_LENGTH: f64 = 1.0e-9;

/// Normalization is skipped when the strongest level is within this of
/// 0 (nothing to scale) or of 1 (already normalized).
pub const NORMALIZE_TOLERANCE: f64 = 1.0e-9;

/// Levels below this do not count as firing. Mutation and rescaling leave
/// tiny residues rather than exact zeros.
pub const USED_PERCENT_FLOOR: f64 = 1.0e-3;

/// Unit-direction dot product below which two fire directions on one
/// thruster count as opposed.
pub const OPPOSED_DOT_THRESHOLD: f64 = -0.95;

// --- Error weighting ---

/// Default weight on the balance term. Balance carries the ranking.
pub const BALANCE_WEIGHT: f64 = 1.0;

/// Default weight on the underpower term. Deliberately small: the
/// underpower ceiling is a loose bound, so this weight keeps the term a
/// tiebreaker rather than a driver.
pub const UNDERPOWER_WEIGHT: f64 = 0.01;

/// Default weight on the inefficiency term.
pub const INEFFICIENCY_WEIGHT: f64 = 0.1;

// --- Mutation tuning ---

/// Default fraction of levels perturbed per mutation pass.
pub const CHANGE_FRACTION: f64 = 0.2;

/// Default half-width of the uniform drift applied to a perturbed level.
pub const DRIFT_FACTOR: f64 = 0.1;
