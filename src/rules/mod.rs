//! Scoring patterns and the tables that order them.

pub mod catalog;
pub mod presets;
pub mod types;

pub use catalog::{display_name, standard_rule_set, STANDARD_RULES};
pub use presets::{find_preset, HeritagePreset, HERITAGE_PRESETS};
pub use types::{Payout, Rule, RuleCategory, RuleId, RuleSet};
