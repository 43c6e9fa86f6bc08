//! Probability engine: enumeration, classification, aggregation, calibration.
//!
//! Everything here is a pure function of its inputs; configuration is passed
//! in explicitly and never stored.

pub mod calibrate;
pub mod classifier;
pub mod conditional;
pub mod draw;
pub mod exact;
pub mod partitions;
pub mod risk;

pub use calibrate::{Calibration, CalibrationBounds, CalibrationTarget, Calibrator};
pub use classifier::{classify, classify_and_resolve, resolve, Resolution, RoundOutcome};
pub use conditional::{conditional_stats, ConditionalStats};
pub use draw::draw_counts;
pub use exact::{exact_stats, house_edge, Multinomial, Statistics};
pub use partitions::{enumerate, partition_count, Compositions};
pub use risk::risk_of_ruin;
