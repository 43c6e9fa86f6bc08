//! Text, JSON and CSV renderings of exact statistics.

use crate::core::{FaceWeights, NO_EVENT};
use crate::engine::{Calibration, ConditionalStats, Statistics};
use crate::rules::{display_name, RuleSet};

/// Exact statistics plus the context needed to present them.
#[derive(Debug, Clone)]
pub struct StatsReport<'a> {
    pub stats: &'a Statistics,
    pub rules: &'a RuleSet,
    pub weights: &'a FaceWeights,
    pub risk_of_ruin: Option<f64>,
}

impl<'a> StatsReport<'a> {
    pub fn new(stats: &'a Statistics, rules: &'a RuleSet, weights: &'a FaceWeights) -> Self {
        Self {
            stats,
            rules,
            weights,
            risk_of_ruin: None,
        }
    }

    pub fn with_risk_of_ruin(mut self, ruin: f64) -> Self {
        self.risk_of_ruin = Some(ruin);
        self
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let s = self.stats;
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    XĂM HƯỜNG ODDS REPORT\n");
        report.push_str("                 (Exact Multinomial Enumeration)\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Dice: {}   Outcome vectors: {}   Rules: {}\n\n",
            s.die_count,
            s.partitions,
            self.rules.len()
        ));

        report.push_str("── FACE WEIGHTS ─────────────────────────────────────────────────\n");
        for (i, w) in self.weights.as_array().iter().enumerate() {
            report.push_str(&format!("  Face {}: {:.4}\n", i + 1, w));
        }
        report.push_str(&format!("  Entropy:        {:.3} bits\n\n", s.entropy));

        report.push_str("── ECONOMICS ────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Expected Value: {:.4}\n", s.expected_value));
        report.push_str(&format!(
            "  House Edge:     {:.2}% (stake {})\n",
            s.house_edge * 100.0,
            s.reference_stake
        ));
        report.push_str(&format!("  Variance:       {:.4}\n", s.variance));
        report.push_str(&format!("  Volatility:     {:.2}\n", s.volatility));
        if let Some(ruin) = self.risk_of_ruin {
            report.push_str(&format!("  Risk of Ruin:   {:.1}%\n", ruin * 100.0));
        }
        report.push_str(&format!(
            "  Mass Check:     {:.12}\n\n",
            s.total_probability_mass
        ));

        report.push_str("── PATTERN ODDS ─────────────────────────────────────────────────\n");
        report.push_str("  Pattern              Any Match    Pays As\n");
        report.push_str("  ───────              ─────────    ───────\n");
        for rule in self.rules {
            let any = s.rule_probability(rule.id);
            let best = s.best_probability(rule.id);
            let bar: String = "█".repeat((any * 40.0).round() as usize);
            report.push_str(&format!(
                "  {:<18} {:>9.5}%  {:>9.5}%  {}\n",
                rule.name,
                any * 100.0,
                best * 100.0,
                bar
            ));
        }
        report.push_str(&format!(
            "  {:<18} {:>10}  {:>9.5}%\n\n",
            "(no event)",
            "",
            s.no_event_probability() * 100.0
        ));

        report.push_str("── PATTERN GUIDE ────────────────────────────────────────────────\n");
        for rule in self.rules {
            report.push_str(&format!(
                "  {:<18} [{}] {}\n",
                rule.name,
                rule.category.name(),
                rule.description
            ));
        }
        report.push('\n');

        if !s.mass_is_consistent() {
            report.push_str("  ⚠️  Probability mass does not sum to 1 - check weights\n");
        }
        if s.house_edge < 0.0 {
            report.push_str("  ⚠️  Negative house edge - players are favoured\n");
        }

        report.push_str("═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// `Event,Probability` rows by display name, in priority order.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("Event,Probability\n");
        for rule in self.rules {
            csv.push_str(&format!("{},{}\n", rule.name, self.stats.rule_probability(rule.id)));
        }
        csv
    }
}

impl serde::Serialize for StatsReport<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let s = self.stats;
        let mut state = serializer.serialize_struct("StatsReport", 13)?;
        state.serialize_field("die_count", &s.die_count)?;
        state.serialize_field("partitions", &s.partitions)?;
        state.serialize_field("weights", self.weights)?;
        state.serialize_field("expected_value", &s.expected_value)?;
        state.serialize_field("house_edge", &s.house_edge)?;
        state.serialize_field("reference_stake", &s.reference_stake)?;
        state.serialize_field("variance", &s.variance)?;
        state.serialize_field("volatility", &s.volatility)?;
        state.serialize_field("entropy", &s.entropy)?;
        state.serialize_field("total_probability_mass", &s.total_probability_mass)?;
        state.serialize_field("risk_of_ruin", &self.risk_of_ruin)?;
        state.serialize_field("per_rule", &s.per_rule)?;
        state.serialize_field("per_best_rule", &s.per_best_rule)?;
        state.end()
    }
}

/// Conditional odds, highest first, skipping negligible patterns.
pub fn conditional_text(stats: &ConditionalStats, min_probability: f64) -> String {
    let mut out = format!(
        "── GIVEN {:?} ({} completions) ──\n",
        stats.prefix, stats.completions
    );
    for (id, p) in stats.ranked() {
        if p < min_probability {
            continue;
        }
        let label = if id == NO_EVENT { "(no event)" } else { display_name(id) };
        out.push_str(&format!("  {:<18} {:>6.1}%\n", label, p * 100.0));
    }
    out.push_str(&format!("  Expected payout:   {:.4}\n", stats.expected_value));
    out
}

pub fn calibration_text(calibration: &Calibration) -> String {
    format!(
        "Optimal p4 found: {:.6} (target {:.6}, achieved {:.6}, {} steps)\n",
        calibration.parameter, calibration.target, calibration.achieved, calibration.iterations
    )
}
