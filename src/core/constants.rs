//! Shared engine constants.
//!
//! All tuning numbers for the odds engine live here.

// =============================================================================
// DICE
// =============================================================================

/// Faces on a die.
pub const FACE_COUNT: usize = 6;

/// The red "Hường" face. Calibration moves weight onto or off this face.
pub const HUONG_FACE: u8 = 4;

/// Dice drawn per round in every traditional ruleset.
pub const DEFAULT_DIE_COUNT: u32 = 6;

// =============================================================================
// ENUMERATION
// =============================================================================

/// Upper bound on count vectors enumerated for a single query.
/// C(n+5, 5) stays below this for n <= 32.
pub const MAX_PARTITIONS: u64 = 500_000;

/// Allowed drift of the total probability mass from 1.0.
pub const MASS_TOLERANCE: f64 = 1e-9;

// =============================================================================
// ECONOMICS
// =============================================================================

/// Default stake scale house edge is measured against.
/// Payouts are multiples of a one-unit bet that is always collected.
pub const DEFAULT_REFERENCE_STAKE: f64 = 1.0;

/// Reported ruin probability when the walk has non-negative drift.
pub const RUIN_SENTINEL: f64 = 1e-4;

// =============================================================================
// CALIBRATION
// =============================================================================

/// Bisection steps. 25 halvings of [0, 1] resolve p to ~3e-8.
pub const CALIBRATION_ITERATIONS: u32 = 25;

pub const CALIBRATION_LOW: f64 = 0.0;
pub const CALIBRATION_HIGH: f64 = 1.0;

/// Reserved id returned when no rule matches a count vector.
pub const NO_EVENT: &str = "NO_EVENT";
