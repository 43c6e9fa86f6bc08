//! Exact outcome statistics by full enumeration.
//!
//! Every count vector for `n` dice is weighted by its multinomial probability
//! `n! / ∏cᵢ! · ∏wᵢ^cᵢ`, classified, and folded into the aggregates. The work
//! is C(n+5, 5) vectors × six faces, fine for game-sized n (≤ ~12) and
//! deliberately capped well before it gets slow.

use super::classifier::{classify, resolve};
use super::partitions::enumerate;
use crate::core::{CountVector, FaceWeights, MASS_TOLERANCE, NO_EVENT};
use crate::error::{EngineError, Result};
use crate::rules::{RuleId, RuleSet};
use serde::Serialize;
use std::collections::BTreeMap;

/// Multinomial probability of count vectors over a fixed number of dice.
#[derive(Debug, Clone)]
pub struct Multinomial {
    factorials: Vec<f64>,
}

impl Multinomial {
    /// Prepare for vectors of up to `n` dice.
    pub fn new(n: u32) -> Self {
        let mut factorials = Vec::with_capacity(n as usize + 1);
        factorials.push(1.0);
        for i in 1..=n as usize {
            let prev = factorials[i - 1];
            factorials.push(prev * i as f64);
        }
        Self { factorials }
    }

    /// P(counts) for `counts.total()` independent draws with `weights`.
    pub fn probability(&self, counts: &CountVector, weights: &FaceWeights) -> f64 {
        let n = counts.total() as usize;
        let mut coefficient = self.factorials[n];
        let mut term = 1.0;
        for (face, c) in counts.faces() {
            coefficient /= self.factorials[c as usize];
            term *= weights.weight(face).powi(c as i32);
        }
        coefficient * term
    }
}

/// Aggregates for one configuration. Recomputed from scratch on every request.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub die_count: u32,
    pub partitions: u64,
    pub expected_value: f64,
    pub variance: f64,
    pub volatility: f64,
    pub house_edge: f64,
    pub reference_stake: f64,
    /// Entropy of the face weights in bits, not of the outcome distribution.
    pub entropy: f64,
    pub total_probability_mass: f64,
    /// Mass of every vector matching each rule; rules overlap.
    pub per_rule: BTreeMap<RuleId, f64>,
    /// Mass of vectors resolving to each rule, `NO_EVENT` included. Sums to 1.
    pub per_best_rule: BTreeMap<RuleId, f64>,
}

impl Statistics {
    /// Probability that `id` matches at all.
    pub fn rule_probability(&self, id: &str) -> f64 {
        self.per_rule.get(id).copied().unwrap_or(0.0)
    }

    /// Probability that `id` is the paying pattern.
    pub fn best_probability(&self, id: &str) -> f64 {
        self.per_best_rule.get(id).copied().unwrap_or(0.0)
    }

    pub fn no_event_probability(&self) -> f64 {
        self.best_probability(NO_EVENT)
    }

    pub fn mass_is_consistent(&self) -> bool {
        (self.total_probability_mass - 1.0).abs() <= MASS_TOLERANCE
    }
}

/// House edge against a stake scale: `(stake − EV) / stake`. The stake must be
/// positive and finite.
pub fn house_edge(expected_value: f64, reference_stake: f64) -> Result<f64> {
    if !reference_stake.is_finite() || reference_stake <= 0.0 {
        return Err(EngineError::InvalidStake(format!(
            "reference stake must be positive, got {}",
            reference_stake
        )));
    }
    Ok((reference_stake - expected_value) / reference_stake)
}

/// Enumerate every outcome of `n` dice and aggregate probabilities and payouts.
pub fn exact_stats(
    weights: &FaceWeights,
    n: u32,
    rules: &RuleSet,
    reference_stake: f64,
) -> Result<Statistics> {
    if n == 0 {
        return Err(EngineError::InvalidDieCount(n));
    }
    // Rejected up front, before any enumeration work.
    house_edge(0.0, reference_stake)?;
    let multinomial = Multinomial::new(n);

    let mut partitions = 0u64;
    let mut total_mass = 0.0;
    let mut ev = 0.0;
    let mut second_moment = 0.0;
    let mut per_rule: BTreeMap<RuleId, f64> = BTreeMap::new();
    let mut per_best_rule: BTreeMap<RuleId, f64> = BTreeMap::new();

    for counts in enumerate(n)? {
        partitions += 1;
        let prob = multinomial.probability(&counts, weights);
        total_mass += prob;

        for id in classify(&counts, rules) {
            *per_rule.entry(id).or_insert(0.0) += prob;
        }

        let best = resolve(&counts, rules);
        *per_best_rule.entry(best.rule_id).or_insert(0.0) += prob;
        ev += prob * best.payout;
        second_moment += prob * best.payout * best.payout;
    }

    if (total_mass - 1.0).abs() > MASS_TOLERANCE {
        log::warn!(
            "Probability mass drifted to {:.12} over {} vectors ({} dice)",
            total_mass,
            partitions,
            n
        );
    }

    let variance = second_moment - ev * ev;
    let stats = Statistics {
        die_count: n,
        partitions,
        expected_value: ev,
        variance,
        volatility: variance.max(0.0).sqrt(),
        house_edge: house_edge(ev, reference_stake)?,
        reference_stake,
        entropy: weights.entropy(),
        total_probability_mass: total_mass,
        per_rule,
        per_best_rule,
    };

    log::debug!(
        "Exact stats: n={} vectors={} ev={:.6} edge={:.6} mass={:.12}",
        n,
        partitions,
        stats.expected_value,
        stats.house_edge,
        stats.total_probability_mass
    );

    Ok(stats)
}
