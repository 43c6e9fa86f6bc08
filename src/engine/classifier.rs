//! Pattern classification and payout resolution.
//!
//! Resolution policy: walk the rule set in declared priority order and take the
//! first rule whose predicate holds. The highest-scoring match is NOT preferred
//! over an earlier one.

use crate::core::{CountVector, NO_EVENT};
use crate::rules::{RuleId, RuleSet};
use serde::Serialize;
use std::collections::BTreeSet;

/// The single paying pattern for a count vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resolution {
    pub rule_id: RuleId,
    pub payout: f64,
}

impl Resolution {
    pub fn no_event() -> Self {
        Self {
            rule_id: NO_EVENT,
            payout: 0.0,
        }
    }

    pub fn is_no_event(&self) -> bool {
        self.rule_id == NO_EVENT
    }
}

/// Everything the engine says about one count vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundOutcome {
    pub counts: CountVector,
    pub matched: BTreeSet<RuleId>,
    pub best: RuleId,
    pub payout: f64,
}

/// Every rule whose predicate holds. Independent of rule order; may be empty.
pub fn classify(counts: &CountVector, rules: &RuleSet) -> BTreeSet<RuleId> {
    rules
        .iter()
        .filter(|rule| rule.matches(counts))
        .map(|rule| rule.id)
        .collect()
}

/// First matching rule in priority order, or `NO_EVENT` paying 0.
pub fn resolve(counts: &CountVector, rules: &RuleSet) -> Resolution {
    rules
        .iter()
        .find(|rule| rule.matches(counts))
        .map(|rule| Resolution {
            rule_id: rule.id,
            payout: rule.payout_for(counts),
        })
        .unwrap_or_else(Resolution::no_event)
}

pub fn classify_and_resolve(counts: &CountVector, rules: &RuleSet) -> RoundOutcome {
    let resolution = resolve(counts, rules);
    RoundOutcome {
        counts: *counts,
        matched: classify(counts, rules),
        best: resolution.rule_id,
        payout: resolution.payout,
    }
}
