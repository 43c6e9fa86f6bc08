//! Dice primitives shared by every engine component.

pub mod constants;
pub mod counts;
pub mod weights;

pub use constants::*;
pub use counts::CountVector;
pub use weights::FaceWeights;
