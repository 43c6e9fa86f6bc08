//! Xăm Hường odds engine.
//!
//! Exact and sampled outcome statistics for the six-dice Xăm Hường game:
//! pattern classification, multinomial enumeration, expected value and house
//! edge, conditional odds, weight calibration and a gambler's-ruin estimate.

pub mod analyzer;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod report;
pub mod rules;

pub use analyzer::Analyzer;
pub use config::{EngineConfig, EngineSettings};
pub use error::{EngineError, Result};
