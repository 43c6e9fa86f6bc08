use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid face weights: {0}")]
    InvalidWeights(String),

    #[error("Expected {expected} face weights, found {found}")]
    WrongArity { expected: usize, found: usize },

    #[error("Die count must be positive, got {0}")]
    InvalidDieCount(u32),

    #[error("{die_count} dice produce {partitions} outcome vectors (limit {limit})")]
    CapacityExceeded {
        die_count: u32,
        partitions: u64,
        limit: u64,
    },

    #[error("Prefix of {prefix_len} dice exceeds die count {die_count}")]
    PrefixTooLong { prefix_len: usize, die_count: u32 },

    #[error("Count vector holds {found} dice, configured for {expected}")]
    CountMismatch { expected: u32, found: u32 },

    #[error("Face {face} is not in 1..=6")]
    InvalidFace { face: u8 },

    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid calibration bounds [{low}, {high}]")]
    InvalidBounds { low: f64, high: f64 },

    #[error("Invalid stake: {0}")]
    InvalidStake(String),

    #[error("Invalid probability: {0}")]
    InvalidProbability(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
