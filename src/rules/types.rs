//! Rule, payout and rule-set types.

use crate::core::CountVector;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Stable identifier of a scoring pattern, e.g. `"LUC_HUONG"`.
pub type RuleId = &'static str;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleCategory {
    /// Huế court patterns built around the Hường count.
    Imperial,
    /// Village patterns (sequences, pairs).
    Folk,
}

impl RuleCategory {
    pub fn name(&self) -> &'static str {
        match self {
            RuleCategory::Imperial => "Huế Court Style",
            RuleCategory::Folk => "Folk/Common Style",
        }
    }
}

/// What a matching rule pays, in units of the stake.
#[derive(Clone, Copy)]
pub enum Payout {
    Fixed(f64),
    /// `base + bonus(counts)`, evaluated per count vector.
    Dynamic {
        base: f64,
        bonus: fn(&CountVector) -> f64,
    },
}

impl Payout {
    pub fn evaluate(&self, counts: &CountVector) -> f64 {
        match self {
            Payout::Fixed(score) => *score,
            Payout::Dynamic { base, bonus } => base + bonus(counts),
        }
    }

    /// Headline score shown in paytables.
    pub fn base(&self) -> f64 {
        match self {
            Payout::Fixed(score) => *score,
            Payout::Dynamic { base, .. } => *base,
        }
    }

    /// Same payout shape with a different base score.
    pub fn with_base(self, base: f64) -> Self {
        match self {
            Payout::Fixed(_) => Payout::Fixed(base),
            Payout::Dynamic { bonus, .. } => Payout::Dynamic { base, bonus },
        }
    }
}

impl fmt::Debug for Payout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payout::Fixed(score) => write!(f, "Fixed({})", score),
            Payout::Dynamic { base, .. } => write!(f, "Dynamic(base={})", base),
        }
    }
}

/// A named pattern over count vectors.
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: RuleCategory,
    pub predicate: fn(&CountVector) -> bool,
    pub payout: Payout,
}

impl Rule {
    pub fn matches(&self, counts: &CountVector) -> bool {
        (self.predicate)(counts)
    }

    pub fn payout_for(&self, counts: &CountVector) -> f64 {
        self.payout.evaluate(counts)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("payout", &self.payout)
            .finish()
    }
}

/// Ordered rule table. Declared order is resolution priority, index 0 first.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a rule set, rejecting duplicate ids.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id) {
                return Err(EngineError::DuplicateRule(rule.id.to_string()));
            }
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Position in the priority order (0 = highest).
    pub fn priority_of(&self, id: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.id == id)
    }

    /// Subset of this table, kept in this table's order.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Result<RuleSet> {
        for id in ids {
            if !self.contains(id.as_ref()) {
                return Err(EngineError::UnknownRule(id.as_ref().to_string()));
            }
        }
        let rules = self
            .rules
            .iter()
            .filter(|r| ids.iter().any(|id| id.as_ref() == r.id))
            .copied()
            .collect();
        Ok(RuleSet { rules })
    }

    /// Replace base scores by rule id. Unknown ids are rejected.
    pub fn with_paytable(&self, paytable: &BTreeMap<String, f64>) -> Result<RuleSet> {
        if let Some(unknown) = paytable.keys().find(|id| !self.contains(id)) {
            return Err(EngineError::UnknownRule(unknown.clone()));
        }
        let rules = self
            .rules
            .iter()
            .map(|rule| match paytable.get(rule.id) {
                Some(&score) => Rule {
                    payout: rule.payout.with_base(score),
                    ..*rule
                },
                None => *rule,
            })
            .collect();
        Ok(RuleSet { rules })
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        super::catalog::standard_rule_set()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
