//! Exhaustive enumeration of count vectors.
//!
//! Every way to spread `n` dice over six faces, in lexicographic order:
//! face 1 runs 0..=n, face 2 runs over what is left, and so on, with face 6
//! taking the remainder. There are C(n+5, 5) of them (462 for n = 6).
//!
//! Cost grows combinatorially with n. Requests past [`MAX_PARTITIONS`]
//! are refused with [`EngineError::CapacityExceeded`] rather than left to run.

use crate::core::{CountVector, FACE_COUNT, MAX_PARTITIONS};
use crate::error::{EngineError, Result};

/// Number of count vectors for `n` dice: C(n+5, 5).
pub fn partition_count(n: u32) -> u64 {
    let k = (FACE_COUNT - 1) as u64;
    let n = n as u64;
    // C(n+k, k) built up incrementally; each prefix product is itself a binomial.
    (1..=k).fold(1u64, |acc, i| acc.saturating_mul(n + i) / i)
}

/// Enumerate all count vectors for `n` dice, or refuse if there are too many.
pub fn enumerate(n: u32) -> Result<Compositions> {
    let partitions = partition_count(n);
    if partitions > MAX_PARTITIONS {
        return Err(EngineError::CapacityExceeded {
            die_count: n,
            partitions,
            limit: MAX_PARTITIONS,
        });
    }
    Ok(Compositions::new(n))
}

/// Lazy lexicographic walk over compositions of `n` into six parts.
///
/// Iterative: the next vector is derived from the current one, so there is
/// no recursion depth to worry about.
#[derive(Debug, Clone)]
pub struct Compositions {
    total: u32,
    current: [u32; FACE_COUNT],
    done: bool,
}

impl Compositions {
    fn new(total: u32) -> Self {
        let mut current = [0; FACE_COUNT];
        current[FACE_COUNT - 1] = total;
        Self {
            total,
            current,
            done: false,
        }
    }

    /// Step to the lexicographic successor. Returns false after the last one.
    fn advance(&mut self) -> bool {
        // Rightmost free position whose tail still holds dice can take one more.
        let mut tail = 0;
        for i in (0..FACE_COUNT - 1).rev() {
            tail += self.current[i + 1];
            if tail > 0 {
                self.current[i] += 1;
                for slot in &mut self.current[i + 1..] {
                    *slot = 0;
                }
                let head: u32 = self.current[..=i].iter().sum();
                self.current[FACE_COUNT - 1] = self.total - head;
                return true;
            }
        }
        false
    }
}

impl Iterator for Compositions {
    type Item = CountVector;

    fn next(&mut self) -> Option<CountVector> {
        if self.done {
            return None;
        }
        let out = CountVector::new(self.current);
        self.done = !self.advance();
        Some(out)
    }
}
