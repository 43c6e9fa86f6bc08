//! Standard Xăm Hường pattern table.
//!
//! Order matters: it is the priority used to pick the paying pattern when
//! several match. Tứ Tự Cáp sits ahead of Tứ Hường, so with the full table a
//! four-Hường roll always pays the bonus variant.

use super::types::{Payout, Rule, RuleCategory, RuleSet};
use crate::core::{CountVector, HUONG_FACE};

fn huong(c: &CountVector) -> u32 {
    c.count(HUONG_FACE)
}

fn luc_huong(c: &CountVector) -> bool {
    huong(c) == 6
}

fn luc_phu(c: &CountVector) -> bool {
    c.others_with_count(HUONG_FACE, 6) > 0
}

fn ngu_huong(c: &CountVector) -> bool {
    huong(c) == 5
}

fn tu_huong(c: &CountVector) -> bool {
    huong(c) == 4
}

/// Pip total of the non-Hường dice.
fn tu_tu_cap_bonus(c: &CountVector) -> f64 {
    c.faces()
        .filter(|&(face, _)| face != HUONG_FACE)
        .map(|(face, n)| (face as u32 * n) as f64)
        .sum()
}

fn ngu_tu(c: &CountVector) -> bool {
    c.others_with_count(HUONG_FACE, 5) > 0
}

fn phan_song_tam(c: &CountVector) -> bool {
    huong(c) == 3 && c.others_with_count(HUONG_FACE, 3) > 0
}

fn suut(c: &CountVector) -> bool {
    c.faces().all(|(_, n)| n == 1)
}

fn thuong_ha_ma(c: &CountVector) -> bool {
    c.faces_with_count(2) == 3
}

fn tam_huong(c: &CountVector) -> bool {
    huong(c) == 3
}

fn nhi_huong(c: &CountVector) -> bool {
    huong(c) == 2
}

fn nhat_huong(c: &CountVector) -> bool {
    huong(c) == 1
}

pub const STANDARD_RULES: [Rule; 12] = [
    Rule {
        id: "LUC_HUONG",
        name: "Lục Hường",
        description: "6 Red Dice (Face 4) - Pure Royalty",
        category: RuleCategory::Imperial,
        predicate: luc_huong,
        payout: Payout::Fixed(100.0),
    },
    Rule {
        id: "LUC_PHU",
        name: "Lục Phú",
        description: "6 Dice of any other face",
        category: RuleCategory::Imperial,
        predicate: luc_phu,
        payout: Payout::Fixed(50.0),
    },
    Rule {
        id: "NGU_HUONG",
        name: "Ngũ Hường",
        description: "5 Red Dice",
        category: RuleCategory::Imperial,
        predicate: ngu_huong,
        payout: Payout::Fixed(60.0),
    },
    Rule {
        id: "TU_TU_CAP",
        name: "Tứ Tự Cáp",
        description: "4 Red Dice + Bonus from remaining dice",
        category: RuleCategory::Imperial,
        predicate: tu_huong,
        payout: Payout::Dynamic {
            base: 30.0,
            bonus: tu_tu_cap_bonus,
        },
    },
    Rule {
        id: "NGU_TU",
        name: "Ngũ Tử",
        description: "5 Dice of any other face",
        category: RuleCategory::Imperial,
        predicate: ngu_tu,
        payout: Payout::Fixed(10.0),
    },
    Rule {
        id: "TU_HUONG",
        name: "Tứ Hường",
        description: "4 Red Dice",
        category: RuleCategory::Imperial,
        predicate: tu_huong,
        payout: Payout::Fixed(30.0),
    },
    Rule {
        id: "PHAN_SONG_TAM",
        name: "Phân Song Tam",
        description: "3 Red Dice + 3 of another face",
        category: RuleCategory::Imperial,
        predicate: phan_song_tam,
        payout: Payout::Fixed(20.0),
    },
    Rule {
        id: "SUUT",
        name: "Suốt",
        description: "A sequence 1-2-3-4-5-6",
        category: RuleCategory::Folk,
        predicate: suut,
        payout: Payout::Fixed(10.0),
    },
    Rule {
        id: "THUONG_HA_MA",
        name: "Thượng Hạ Mã",
        description: "3 Pairs",
        category: RuleCategory::Folk,
        predicate: thuong_ha_ma,
        payout: Payout::Fixed(5.0),
    },
    Rule {
        id: "TAM_HUONG",
        name: "Tam Hường",
        description: "3 Red Dice",
        category: RuleCategory::Imperial,
        predicate: tam_huong,
        payout: Payout::Fixed(8.0),
    },
    Rule {
        id: "NHI_HUONG",
        name: "Nhị Hường",
        description: "2 Red Dice",
        category: RuleCategory::Imperial,
        predicate: nhi_huong,
        payout: Payout::Fixed(1.0),
    },
    Rule {
        id: "NHAT_HUONG",
        name: "Nhất Hường",
        description: "1 Red Die",
        category: RuleCategory::Imperial,
        predicate: nhat_huong,
        payout: Payout::Fixed(0.0),
    },
];

/// The full table in priority order.
pub fn standard_rule_set() -> RuleSet {
    // Catalog ids are distinct, so construction cannot fail.
    match RuleSet::new(STANDARD_RULES.to_vec()) {
        Ok(set) => set,
        Err(_) => unreachable!("standard catalog has duplicate ids"),
    }
}

/// Display name for a rule id, falling back to the id itself.
pub fn display_name(id: &str) -> &str {
    STANDARD_RULES
        .iter()
        .find(|r| r.id == id)
        .map(|r| r.name)
        .unwrap_or(id)
}
