//! Outcome odds given dice already on the table.

use super::classifier::{classify, resolve};
use super::exact::Multinomial;
use super::partitions::enumerate;
use crate::core::{CountVector, FaceWeights, NO_EVENT};
use crate::error::{EngineError, Result};
use crate::rules::{RuleId, RuleSet};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ConditionalStats {
    pub prefix: Vec<u8>,
    /// Distinct ways the remaining dice can land.
    pub completions: u64,
    /// Mass of completions matching each rule; `NO_EVENT` when none match.
    pub per_rule: BTreeMap<RuleId, f64>,
    /// Expected payout of the completed round under first-match resolution.
    pub expected_value: f64,
    pub total_probability_mass: f64,
}

impl ConditionalStats {
    pub fn rule_probability(&self, id: &str) -> f64 {
        self.per_rule.get(id).copied().unwrap_or(0.0)
    }

    /// Rules sorted by descending probability, ties by id.
    pub fn ranked(&self) -> Vec<(RuleId, f64)> {
        let mut ranked: Vec<_> = self.per_rule.iter().map(|(&id, &p)| (id, p)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(b.0)));
        ranked
    }
}

/// Per-rule odds over every completion of `prefix` to `n` dice.
///
/// `prefix` holds face values already observed. It may not be longer than `n`;
/// at exactly `n` the single completion carries probability 1.
pub fn conditional_stats(
    weights: &FaceWeights,
    n: u32,
    rules: &RuleSet,
    prefix: &[u8],
) -> Result<ConditionalStats> {
    if prefix.len() > n as usize {
        return Err(EngineError::PrefixTooLong {
            prefix_len: prefix.len(),
            die_count: n,
        });
    }
    let base = CountVector::from_faces(prefix)?;
    let remaining = n - prefix.len() as u32;
    let multinomial = Multinomial::new(remaining);

    let mut completions = 0u64;
    let mut total_mass = 0.0;
    let mut ev = 0.0;
    let mut per_rule: BTreeMap<RuleId, f64> = BTreeMap::new();

    for rest in enumerate(remaining)? {
        completions += 1;
        let prob = multinomial.probability(&rest, weights);
        let counts = base.combined(&rest);
        total_mass += prob;

        let matched = classify(&counts, rules);
        if matched.is_empty() {
            *per_rule.entry(NO_EVENT).or_insert(0.0) += prob;
        }
        for id in matched {
            *per_rule.entry(id).or_insert(0.0) += prob;
        }
        ev += prob * resolve(&counts, rules).payout;
    }

    log::debug!(
        "Conditional stats: prefix={:?} remaining={} completions={}",
        prefix,
        remaining,
        completions
    );

    Ok(ConditionalStats {
        prefix: prefix.to_vec(),
        completions,
        per_rule,
        expected_value: ev,
        total_probability_mass: total_mass,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::standard_rule_set;

    #[test]
    fn test_prefix_too_long() {
        let result = conditional_stats(&FaceWeights::uniform(), 2, &standard_rule_set(), &[1, 2, 3]);
        assert!(matches!(
            result,
            Err(EngineError::PrefixTooLong { prefix_len: 3, die_count: 2 })
        ));
    }

    #[test]
    fn test_invalid_face_in_prefix() {
        let result = conditional_stats(&FaceWeights::uniform(), 6, &standard_rule_set(), &[9]);
        assert!(matches!(result, Err(EngineError::InvalidFace { face: 9 })));
    }

    #[test]
    fn test_full_prefix_collapses() {
        let stats = conditional_stats(
            &FaceWeights::uniform(),
            6,
            &standard_rule_set(),
            &[4, 4, 1, 1, 2, 3],
        )
        .unwrap();
        assert_eq!(stats.completions, 1);
        assert_eq!(stats.per_rule.len(), 1);
        assert!((stats.rule_probability("NHI_HUONG") - 1.0).abs() < 1e-12);
        assert!((stats.expected_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_prefix_with_no_match() {
        let stats = conditional_stats(
            &FaceWeights::uniform(),
            6,
            &standard_rule_set(),
            &[1, 1, 2, 3, 5, 6],
        )
        .unwrap();
        assert!((stats.rule_probability(NO_EVENT) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_prefix_matches_unconditional() {
        let rules = standard_rule_set();
        let weights = FaceWeights::uniform();
        let cond = conditional_stats(&weights, 6, &rules, &[]).unwrap();
        let exact = crate::engine::exact::exact_stats(&weights, 6, &rules, 1.0).unwrap();
        assert_eq!(cond.completions, 462);
        for (id, p) in &exact.per_rule {
            assert!((cond.rule_probability(id) - p).abs() < 1e-12, "{}", id);
        }
        assert!((cond.expected_value - exact.expected_value).abs() < 1e-12);
    }

    #[test]
    fn test_five_huong_prefix() {
        // Last die: 1/6 Lục Hường, 5/6 Ngũ Hường.
        let stats =
            conditional_stats(&FaceWeights::uniform(), 6, &standard_rule_set(), &[4, 4, 4, 4, 4])
                .unwrap();
        assert_eq!(stats.completions, 6);
        assert!((stats.rule_probability("LUC_HUONG") - 1.0 / 6.0).abs() < 1e-12);
        assert!((stats.rule_probability("NGU_HUONG") - 5.0 / 6.0).abs() < 1e-12);
        assert!((stats.total_probability_mass - 1.0).abs() < 1e-12);
        let ranked = stats.ranked();
        assert_eq!(ranked[0].0, "NGU_HUONG");
    }
}
