//! Heritage presets: historically played rule variants.

use super::catalog::standard_rule_set;
use super::types::RuleSet;
use crate::core::{FaceWeights, DEFAULT_DIE_COUNT};
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy)]
pub struct HeritagePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub die_count: u32,
    /// Rule ids enabled by this variant. Priority follows the standard table.
    pub rules: &'static [&'static str],
}

impl HeritagePreset {
    pub fn rule_set(&self) -> Result<RuleSet> {
        standard_rule_set().select(self.rules)
    }

    /// Every traditional variant plays fair dice.
    pub fn weights(&self) -> FaceWeights {
        FaceWeights::uniform()
    }
}

pub const HERITAGE_PRESETS: [HeritagePreset; 3] = [
    HeritagePreset {
        id: "HUE_COURT",
        name: "Huế Imperial Court (Standard)",
        description: "The traditional rules used in the royal court of Huế. \
                      Focuses on strict Hường (Red) counts and hierarchy.",
        die_count: DEFAULT_DIE_COUNT,
        rules: &[
            "LUC_HUONG",
            "LUC_PHU",
            "NGU_HUONG",
            "NGU_TU",
            "TU_HUONG",
            "PHAN_SONG_TAM",
            "TAM_HUONG",
            "NHI_HUONG",
            "NHAT_HUONG",
        ],
    },
    HeritagePreset {
        id: "FOLK_VILLAGE",
        name: "Folk Village / Tet Style",
        description: "Commonly played during Lunar New Year. \
                      Includes Suốt and Thượng Hạ Mã for more dynamic outcomes.",
        die_count: DEFAULT_DIE_COUNT,
        rules: &["LUC_HUONG", "SUUT", "THUONG_HA_MA", "TAM_HUONG", "NHI_HUONG"],
    },
    HeritagePreset {
        id: "COMPETITIVE",
        name: "Competitive Research (Generalized)",
        description: "Balanced for mathematical study. Equal face weights, standard payouts.",
        die_count: DEFAULT_DIE_COUNT,
        rules: &["LUC_HUONG", "NGU_HUONG", "TU_HUONG", "TAM_HUONG", "NHI_HUONG"],
    },
];

/// Look up a preset by id (case-insensitive).
pub fn find_preset(id: &str) -> Result<&'static HeritagePreset> {
    HERITAGE_PRESETS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| EngineError::UnknownPreset(id.to_string()))
}
