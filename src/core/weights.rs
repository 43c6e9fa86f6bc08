//! Face weight vectors on the probability simplex.

use super::constants::{FACE_COUNT, HUONG_FACE};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Probability of each face 1..=6. Always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FaceWeights([f64; FACE_COUNT]);

impl FaceWeights {
    /// Fair die, 1/6 per face.
    pub fn uniform() -> Self {
        Self([1.0 / FACE_COUNT as f64; FACE_COUNT])
    }

    /// Normalize raw weights onto the simplex.
    ///
    /// Rejects wrong arity, negative or non-finite entries. An all-zero vector
    /// falls back to uniform weights instead of dividing by zero.
    pub fn from_slice(raw: &[f64]) -> Result<Self> {
        if raw.len() != FACE_COUNT {
            return Err(EngineError::WrongArity {
                expected: FACE_COUNT,
                found: raw.len(),
            });
        }
        if let Some(&bad) = raw.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(EngineError::InvalidWeights(format!(
                "face weight {} is negative or not finite",
                bad
            )));
        }

        // Scale by the largest entry first so the sum stays finite near f64::MAX.
        let max = raw.iter().copied().fold(0.0, f64::max);
        if max == 0.0 {
            return Ok(Self::uniform());
        }

        let mut weights = [0.0; FACE_COUNT];
        for (slot, w) in weights.iter_mut().zip(raw) {
            *slot = w / max;
        }
        let sum: f64 = weights.iter().sum();
        for slot in weights.iter_mut() {
            *slot /= sum;
        }
        Ok(Self(weights))
    }

    /// Weight `p` on the Hường face, the rest split evenly over the other five.
    /// `p` is clamped to [0, 1].
    pub fn with_huong_weight(p: f64) -> Self {
        let p = p.clamp(0.0, 1.0);
        let other = (1.0 - p) / (FACE_COUNT - 1) as f64;
        let mut weights = [other; FACE_COUNT];
        weights[HUONG_FACE as usize - 1] = p;
        Self(weights)
    }

    /// Weight of a face in 1..=6.
    pub fn weight(&self, face: u8) -> f64 {
        match face {
            1..=6 => self.0[face as usize - 1],
            _ => 0.0,
        }
    }

    pub fn as_array(&self) -> &[f64; FACE_COUNT] {
        &self.0
    }

    /// Shannon entropy of the weights in bits. Zero-weight faces contribute nothing.
    pub fn entropy(&self) -> f64 {
        -self
            .0
            .iter()
            .filter(|&&w| w > 0.0)
            .map(|&w| w * w.log2())
            .sum::<f64>()
    }
}

impl Default for FaceWeights {
    fn default() -> Self {
        Self::uniform()
    }
}

impl<'de> Deserialize<'de> for FaceWeights {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<f64>::deserialize(deserializer)?;
        FaceWeights::from_slice(&raw).map_err(serde::de::Error::custom)
    }
}
