//! Query surface over one owned configuration.
//!
//! Reads take `&self`, configuration changes take `&mut self`: the borrow
//! checker enforces the single-writer, many-reader discipline. Hosts sharing an
//! `Analyzer` across threads can clone the config as a per-query snapshot.

use crate::config::EngineConfig;
use crate::core::CountVector;
use crate::engine::{
    classify_and_resolve, conditional_stats, draw_counts, exact_stats, risk_of_ruin, Calibration,
    CalibrationBounds, CalibrationTarget, Calibrator, ConditionalStats, RoundOutcome, Statistics,
};
use crate::error::{EngineError, Result};
use crate::rules::RuleSet;
use rand::Rng;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: EngineConfig,
}

impl Analyzer {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn set_face_weights(&mut self, raw: &[f64]) -> Result<()> {
        self.config.set_face_weights(raw)
    }

    pub fn set_die_count(&mut self, n: u32) -> Result<()> {
        self.config.set_die_count(n)
    }

    pub fn set_rule_set(&mut self, rules: RuleSet) {
        self.config.set_rule_set(rules)
    }

    pub fn set_reference_stake(&mut self, stake: f64) -> Result<()> {
        self.config.set_reference_stake(stake)
    }

    pub fn set_paytable(&mut self, paytable: &BTreeMap<String, f64>) -> Result<()> {
        self.config.set_paytable(paytable)
    }

    pub fn apply_preset(&mut self, id: &str) -> Result<()> {
        self.config.apply_preset(id)
    }

    /// Commit a calibrated Hường weight. Calibration itself never does this.
    pub fn apply_distinguished_weight(&mut self, p: f64) -> Result<()> {
        self.config.set_huong_weight(p)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Resolve one observed round. The counts must cover exactly the configured dice.
    pub fn classify_and_resolve(&self, counts: &CountVector) -> Result<RoundOutcome> {
        let expected = self.config.die_count();
        if counts.total() != expected {
            return Err(EngineError::CountMismatch {
                expected,
                found: counts.total(),
            });
        }
        Ok(classify_and_resolve(counts, self.config.rules()))
    }

    pub fn compute_exact_statistics(&self) -> Result<Statistics> {
        exact_stats(
            self.config.weights(),
            self.config.die_count(),
            self.config.rules(),
            self.config.reference_stake(),
        )
    }

    /// Odds given the first dice already seen.
    pub fn compute_conditional(&self, prefix: &[u8]) -> Result<ConditionalStats> {
        conditional_stats(
            self.config.weights(),
            self.config.die_count(),
            self.config.rules(),
            prefix,
        )
    }

    pub fn calibrate(&self, target: &CalibrationTarget) -> Result<Calibration> {
        self.calibrate_within(target, CalibrationBounds::default())
    }

    pub fn calibrate_within(
        &self,
        target: &CalibrationTarget,
        bounds: CalibrationBounds,
    ) -> Result<Calibration> {
        Calibrator::new(
            self.config.die_count(),
            self.config.rules(),
            self.config.reference_stake(),
        )
        .with_bounds(bounds)
        .solve(target)
    }

    /// Ruin odds using the current configuration's no-event rate as the loss rate.
    pub fn estimate_risk_of_ruin(&self, bankroll: f64, bet: f64, target_profit: f64) -> Result<f64> {
        let stats = self.compute_exact_statistics()?;
        let p_loss = stats.no_event_probability().clamp(0.0, 1.0);
        risk_of_ruin(bankroll, bet, target_profit, 1.0 - p_loss, p_loss)
    }

    /// One live round: draw, then resolve.
    pub fn play_round(&self, rng: &mut impl Rng) -> Result<RoundOutcome> {
        let counts = draw_counts(self.config.weights(), self.config.die_count(), rng)?;
        self.classify_and_resolve(&counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RUIN_SENTINEL;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_calibration_does_not_touch_config() {
        let analyzer = Analyzer::default();
        let target = CalibrationTarget::EventProbability {
            rule_id: "LUC_HUONG".to_string(),
            target: 0.05,
        };
        let result = analyzer.calibrate(&target).unwrap();
        assert!(result.parameter > 0.5);
        assert_eq!(analyzer.config().revision(), 0);
        assert_eq!(*analyzer.config().weights(), crate::core::FaceWeights::uniform());
    }

    #[test]
    fn test_apply_distinguished_weight() {
        let mut analyzer = Analyzer::default();
        analyzer.apply_distinguished_weight(0.25).unwrap();
        assert!((analyzer.config().weights().weight(4) - 0.25).abs() < 1e-12);
        assert!(analyzer.apply_distinguished_weight(-0.1).is_err());
    }

    #[test]
    fn test_uniform_risk_is_sentinel() {
        // Most uniform rounds match something, so the walk drifts upward.
        let analyzer = Analyzer::default();
        let ruin = analyzer.estimate_risk_of_ruin(1000.0, 10.0, 500.0).unwrap();
        assert_eq!(ruin, RUIN_SENTINEL);
    }

    #[test]
    fn test_cold_dice_risk_is_real() {
        let mut analyzer = Analyzer::default();
        analyzer.apply_distinguished_weight(0.02).unwrap();
        let ruin = analyzer.estimate_risk_of_ruin(100.0, 10.0, 50.0).unwrap();
        assert!(ruin > 0.5 && ruin <= 1.0, "ruin = {}", ruin);
    }

    #[test]
    fn test_play_round_resolves_draw() {
        let analyzer = Analyzer::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let outcome = analyzer.play_round(&mut rng).unwrap();
        assert_eq!(outcome.counts.total(), 6);
        let again = analyzer.classify_and_resolve(&outcome.counts).unwrap();
        assert_eq!(again, outcome);
    }

    #[test]
    fn test_classify_rejects_wrong_die_total() {
        let analyzer = Analyzer::default();
        let seven = CountVector::new([0, 0, 0, 7, 0, 0]);
        assert!(matches!(
            analyzer.classify_and_resolve(&seven),
            Err(EngineError::CountMismatch { expected: 6, found: 7 })
        ));
        let five = CountVector::new([1, 1, 1, 1, 1, 0]);
        assert!(analyzer.classify_and_resolve(&five).is_err());
    }

    #[test]
    fn test_huge_weights_still_play() {
        let mut analyzer = Analyzer::default();
        analyzer
            .set_face_weights(&[f64::MAX, f64::MAX, 1.0, 1.0, 1.0, 1.0])
            .unwrap();
        let stats = analyzer.compute_exact_statistics().unwrap();
        assert!(stats.mass_is_consistent());

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let outcome = analyzer.play_round(&mut rng).unwrap();
        assert_eq!(outcome.counts.total(), 6);
        assert_eq!(outcome.counts.count(1) + outcome.counts.count(2), 6);
    }
}
