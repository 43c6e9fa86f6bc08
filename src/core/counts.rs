//! Per-face occurrence counts for one round.

use super::constants::FACE_COUNT;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a round expressed as how many dice landed on each face.
///
/// Faces are addressed 1..=6. The vector is ephemeral: produced by enumeration
/// or a live draw and consumed straight away by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CountVector([u32; FACE_COUNT]);

impl CountVector {
    pub fn new(counts: [u32; FACE_COUNT]) -> Self {
        Self(counts)
    }

    /// Tally a list of face values (1..=6).
    pub fn from_faces(faces: &[u8]) -> Result<Self> {
        let mut counts = [0u32; FACE_COUNT];
        for &face in faces {
            if !(1..=FACE_COUNT as u8).contains(&face) {
                return Err(EngineError::InvalidFace { face });
            }
            counts[face as usize - 1] += 1;
        }
        Ok(Self(counts))
    }

    /// Count for a face in 1..=6. Out-of-range faces count zero.
    pub fn count(&self, face: u8) -> u32 {
        match face {
            1..=6 => self.0[face as usize - 1],
            _ => 0,
        }
    }

    /// Total dice in the vector.
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn as_array(&self) -> &[u32; FACE_COUNT] {
        &self.0
    }

    /// Iterate `(face, count)` pairs in face order.
    pub fn faces(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.0.iter().enumerate().map(|(i, &c)| (i as u8 + 1, c))
    }

    /// Faces other than `face` that appear exactly `n` times.
    pub fn others_with_count(&self, face: u8, n: u32) -> usize {
        self.faces().filter(|&(f, c)| f != face && c == n).count()
    }

    /// Number of faces appearing exactly `n` times.
    pub fn faces_with_count(&self, n: u32) -> usize {
        self.0.iter().filter(|&&c| c == n).count()
    }

    /// Face-wise sum of two vectors.
    pub fn combined(&self, other: &CountVector) -> CountVector {
        let mut out = self.0;
        for (slot, add) in out.iter_mut().zip(other.0.iter()) {
            *slot += add;
        }
        CountVector(out)
    }
}

impl fmt::Display for CountVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.faces().map(|(face, c)| format!("{}x{}", face, c)).collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_faces_tallies() {
        let counts = CountVector::from_faces(&[4, 4, 1, 6, 4, 1]).unwrap();
        assert_eq!(counts.as_array(), &[2, 0, 0, 3, 0, 1]);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_from_faces_rejects_bad_face() {
        assert!(matches!(
            CountVector::from_faces(&[1, 7]),
            Err(EngineError::InvalidFace { face: 7 })
        ));
        assert!(CountVector::from_faces(&[0]).is_err());
    }

    #[test]
    fn test_count_out_of_range_is_zero() {
        let counts = CountVector::new([1, 1, 1, 1, 1, 1]);
        assert_eq!(counts.count(0), 0);
        assert_eq!(counts.count(7), 0);
        assert_eq!(counts.count(4), 1);
    }

    #[test]
    fn test_others_with_count_skips_face() {
        let counts = CountVector::new([3, 0, 0, 3, 0, 0]);
        assert_eq!(counts.others_with_count(4, 3), 1);
        assert_eq!(counts.faces_with_count(3), 2);
    }

    #[test]
    fn test_combined() {
        let a = CountVector::new([1, 0, 0, 2, 0, 0]);
        let b = CountVector::new([0, 1, 0, 1, 0, 1]);
        assert_eq!(a.combined(&b).as_array(), &[1, 1, 0, 3, 0, 1]);
    }

    #[test]
    fn test_display() {
        let counts = CountVector::new([0, 0, 0, 6, 0, 0]);
        assert_eq!(counts.to_string(), "[1x0 2x0 3x0 4x6 5x0 6x0]");
    }
}
