//! One live round: a single random draw for the classifier.

use crate::core::{CountVector, FaceWeights, FACE_COUNT};
use crate::error::{EngineError, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Roll `n` dice with the given face weights.
pub fn draw_counts(weights: &FaceWeights, n: u32, rng: &mut impl Rng) -> Result<CountVector> {
    let dist = WeightedIndex::new(weights.as_array())
        .map_err(|e| EngineError::InvalidWeights(format!("cannot sample faces: {}", e)))?;
    let mut counts = [0u32; FACE_COUNT];
    for _ in 0..n {
        counts[dist.sample(rng)] += 1;
    }
    Ok(CountVector::new(counts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HUONG_FACE;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_draw_has_n_dice() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for n in [1, 6, 12] {
            let counts = draw_counts(&FaceWeights::uniform(), n, &mut rng).unwrap();
            assert_eq!(counts.total(), n);
        }
    }

    #[test]
    fn test_draw_respects_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let weights = FaceWeights::with_huong_weight(1.0);
        let counts = draw_counts(&weights, 6, &mut rng).unwrap();
        assert_eq!(counts.count(HUONG_FACE), 6);
    }

    #[test]
    fn test_draw_is_seed_deterministic() {
        let weights = FaceWeights::uniform();
        let a = draw_counts(&weights, 6, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let b = draw_counts(&weights, 6, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_draw_frequency_tracks_weight() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let weights = FaceWeights::with_huong_weight(0.5);
        let mut huong = 0;
        for _ in 0..2000 {
            huong += draw_counts(&weights, 6, &mut rng).unwrap().count(HUONG_FACE);
        }
        let rate = huong as f64 / 12000.0;
        assert!((rate - 0.5).abs() < 0.03, "rate = {}", rate);
    }
}
