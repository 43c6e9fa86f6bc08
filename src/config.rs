//! Engine configuration and the JSON settings file that produces it.

use crate::core::{FaceWeights, DEFAULT_DIE_COUNT, DEFAULT_REFERENCE_STAKE};
use crate::error::{EngineError, Result};
use crate::rules::{find_preset, standard_rule_set, RuleSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Everything a query needs: weights, die count, rule table, stake scale.
///
/// Owned by one writer. Every accepted change bumps `revision`; a rejected
/// change leaves the whole value untouched.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    weights: FaceWeights,
    die_count: u32,
    rules: RuleSet,
    reference_stake: f64,
    revision: u64,
}

impl EngineConfig {
    pub fn new(weights: FaceWeights, die_count: u32, rules: RuleSet) -> Result<Self> {
        if die_count == 0 {
            return Err(EngineError::InvalidDieCount(die_count));
        }
        Ok(Self {
            weights,
            die_count,
            rules,
            reference_stake: DEFAULT_REFERENCE_STAKE,
            revision: 0,
        })
    }

    pub fn weights(&self) -> &FaceWeights {
        &self.weights
    }

    pub fn die_count(&self) -> u32 {
        self.die_count
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn reference_stake(&self) -> f64 {
        self.reference_stake
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Normalize and store raw face weights. All-zero input becomes uniform.
    pub fn set_face_weights(&mut self, raw: &[f64]) -> Result<()> {
        self.weights = FaceWeights::from_slice(raw)?;
        self.bump("face weights");
        Ok(())
    }

    /// Put weight `p` on the Hường face and split the rest evenly.
    pub fn set_huong_weight(&mut self, p: f64) -> Result<()> {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(EngineError::InvalidWeights(format!(
                "Hường weight {} outside [0, 1]",
                p
            )));
        }
        self.weights = FaceWeights::with_huong_weight(p);
        self.bump("Hường weight");
        Ok(())
    }

    pub fn set_die_count(&mut self, n: u32) -> Result<()> {
        if n == 0 {
            return Err(EngineError::InvalidDieCount(n));
        }
        self.die_count = n;
        self.bump("die count");
        Ok(())
    }

    pub fn set_rule_set(&mut self, rules: RuleSet) {
        self.rules = rules;
        self.bump("rule set");
    }

    pub fn set_reference_stake(&mut self, stake: f64) -> Result<()> {
        if !stake.is_finite() || stake <= 0.0 {
            return Err(EngineError::InvalidStake(format!(
                "reference stake must be positive, got {}",
                stake
            )));
        }
        self.reference_stake = stake;
        self.bump("reference stake");
        Ok(())
    }

    /// Replace base scores by rule id.
    pub fn set_paytable(&mut self, paytable: &BTreeMap<String, f64>) -> Result<()> {
        self.rules = self.rules.with_paytable(paytable)?;
        self.bump("paytable");
        Ok(())
    }

    /// Load a heritage preset: its die count, fair weights and rule subset.
    pub fn apply_preset(&mut self, id: &str) -> Result<()> {
        let preset = find_preset(id)?;
        let rules = preset.rule_set()?;
        self.weights = preset.weights();
        self.die_count = preset.die_count;
        self.rules = rules;
        self.bump(preset.id);
        Ok(())
    }

    fn bump(&mut self, what: &str) {
        self.revision += 1;
        log::info!("Config r{}: updated {}", self.revision, what);
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: FaceWeights::uniform(),
            die_count: DEFAULT_DIE_COUNT,
            rules: standard_rule_set(),
            reference_stake: DEFAULT_REFERENCE_STAKE,
            revision: 0,
        }
    }
}

/// On-disk settings. Every field is optional; missing ones keep defaults.
///
/// ```json
/// {
///   "preset": "HUE_COURT",
///   "die_count": 6,
///   "weights": [1, 1, 1, 1.2, 1, 1],
///   "rules": ["LUC_HUONG", "TAM_HUONG"],
///   "paytable": { "LUC_HUONG": 120.0 },
///   "reference_stake": 1.0
/// }
/// ```
///
/// Applied in order: preset, rules, paytable, die count, weights, stake.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub preset: Option<String>,
    pub die_count: Option<u32>,
    pub weights: Option<Vec<f64>>,
    pub rules: Option<Vec<String>>,
    pub paytable: BTreeMap<String, f64>,
    pub reference_stake: Option<f64>,
}

impl EngineSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn into_config(self) -> Result<EngineConfig> {
        let mut config = EngineConfig::default();
        if let Some(preset) = &self.preset {
            config.apply_preset(preset)?;
        }
        if let Some(ids) = &self.rules {
            let rules = standard_rule_set().select(ids.as_slice())?;
            config.set_rule_set(rules);
        }
        if !self.paytable.is_empty() {
            config.set_paytable(&self.paytable)?;
        }
        if let Some(n) = self.die_count {
            config.set_die_count(n)?;
        }
        if let Some(weights) = &self.weights {
            config.set_face_weights(weights)?;
        }
        if let Some(stake) = self.reference_stake {
            config.set_reference_stake(stake)?;
        }
        Ok(config)
    }
}
