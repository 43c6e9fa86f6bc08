//! Inverse solving: find the Hường weight that hits a target statistic.
//!
//! One parameter `p` is searched: the weight on face 4, with `(1 − p) / 5` on
//! each other face. The search is a fixed number of bisection steps, so the
//! precision is known up front (2⁻²⁵ of the interval by default).
//!
//! The metric must be monotonic in `p` over the bounds. Direction is read from
//! the two endpoints and nothing else is checked; outside the monotonic regime
//! the answer is best-effort only. A rule that needs many Hường (Lục Hường,
//! Ngũ Hường at high p) or the house edge of a Hường-count paytable are safe
//! choices. A band rule such as Nhị Hường rises then falls and is not.
//!
//! Solving never touches the caller's configuration. Applying the result is a
//! separate step.

use super::exact::exact_stats;
use crate::core::{FaceWeights, CALIBRATION_HIGH, CALIBRATION_ITERATIONS, CALIBRATION_LOW};
use crate::error::{EngineError, Result};
use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalibrationTarget {
    /// Probability that a rule matches (any-match mass, not best-match).
    EventProbability { rule_id: String, target: f64 },
    /// House edge against the configured reference stake.
    HouseEdge { target: f64 },
}

impl CalibrationTarget {
    pub fn target(&self) -> f64 {
        match self {
            CalibrationTarget::EventProbability { target, .. } => *target,
            CalibrationTarget::HouseEdge { target } => *target,
        }
    }
}

/// Search interval for `p`, within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBounds {
    pub low: f64,
    pub high: f64,
}

impl CalibrationBounds {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        let valid = low.is_finite() && high.is_finite() && 0.0 <= low && low < high && high <= 1.0;
        if !valid {
            return Err(EngineError::InvalidBounds { low, high });
        }
        Ok(Self { low, high })
    }
}

impl Default for CalibrationBounds {
    fn default() -> Self {
        Self {
            low: CALIBRATION_LOW,
            high: CALIBRATION_HIGH,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Calibration {
    /// Weight to put on the Hường face.
    pub parameter: f64,
    /// Metric value at `parameter`.
    pub achieved: f64,
    pub target: f64,
    pub iterations: u32,
}

impl Calibration {
    /// Face weights corresponding to the solved parameter.
    pub fn weights(&self) -> FaceWeights {
        FaceWeights::with_huong_weight(self.parameter)
    }
}

/// Bisection solver over a borrowed rule table.
#[derive(Debug, Clone)]
pub struct Calibrator<'a> {
    die_count: u32,
    rules: &'a RuleSet,
    reference_stake: f64,
    bounds: CalibrationBounds,
    iterations: u32,
}

impl<'a> Calibrator<'a> {
    pub fn new(die_count: u32, rules: &'a RuleSet, reference_stake: f64) -> Self {
        Self {
            die_count,
            rules,
            reference_stake,
            bounds: CalibrationBounds::default(),
            iterations: CALIBRATION_ITERATIONS,
        }
    }

    pub fn with_bounds(mut self, bounds: CalibrationBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn solve_for_event_probability(&self, rule_id: &str, target: f64) -> Result<Calibration> {
        self.solve(&CalibrationTarget::EventProbability {
            rule_id: rule_id.to_string(),
            target,
        })
    }

    pub fn solve_for_house_edge(&self, target: f64) -> Result<Calibration> {
        self.solve(&CalibrationTarget::HouseEdge { target })
    }

    pub fn solve(&self, target: &CalibrationTarget) -> Result<Calibration> {
        if let CalibrationTarget::EventProbability { rule_id, .. } = target {
            if !self.rules.contains(rule_id) {
                return Err(EngineError::UnknownRule(rule_id.clone()));
            }
        }
        let goal = target.target();

        let mut low = self.bounds.low;
        let mut high = self.bounds.high;
        let increasing = self.metric(target, high)? >= self.metric(target, low)?;

        for _ in 0..self.iterations {
            let mid = (low + high) / 2.0;
            let value = self.metric(target, mid)?;
            if (value < goal) == increasing {
                low = mid;
            } else {
                high = mid;
            }
        }

        let parameter = (low + high) / 2.0;
        let achieved = self.metric(target, parameter)?;
        log::info!(
            "Calibrated {:?}: p={:.8} achieved={:.8} after {} steps",
            target,
            parameter,
            achieved,
            self.iterations
        );

        Ok(Calibration {
            parameter,
            achieved,
            target: goal,
            iterations: self.iterations,
        })
    }

    /// Evaluate the target metric at Hường weight `p`.
    fn metric(&self, target: &CalibrationTarget, p: f64) -> Result<f64> {
        let weights = FaceWeights::with_huong_weight(p);
        let stats = exact_stats(&weights, self.die_count, self.rules, self.reference_stake)?;
        Ok(match target {
            CalibrationTarget::EventProbability { rule_id, .. } => stats.rule_probability(rule_id),
            CalibrationTarget::HouseEdge { .. } => stats.house_edge,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{find_preset, standard_rule_set};

    #[test]
    fn test_luc_huong_closed_form() {
        // P(six Hường) = p^6, so p = target^(1/6).
        let rules = standard_rule_set();
        let result = Calibrator::new(6, &rules, 1.0)
            .solve_for_event_probability("LUC_HUONG", 0.01)
            .unwrap();
        assert!((result.parameter - 0.01f64.powf(1.0 / 6.0)).abs() < 1e-6);
        assert!((result.achieved - 0.01).abs() < 1e-6);
        assert_eq!(result.iterations, CALIBRATION_ITERATIONS);
    }

    #[test]
    fn test_house_edge_decreasing_metric() {
        let rules = find_preset("COMPETITIVE").unwrap().rule_set().unwrap();
        let result = Calibrator::new(6, &rules, 1.0)
            .solve_for_house_edge(0.05)
            .unwrap();
        assert!((result.achieved - 0.05).abs() < 1e-4);
        assert!(result.parameter > 1.0 / 6.0);
    }

    #[test]
    fn test_narrow_bounds_clamp_result() {
        let rules = standard_rule_set();
        let bounds = CalibrationBounds::new(0.05, 0.5).unwrap();
        // Unreachable inside the bounds: converges to the upper edge.
        let result = Calibrator::new(6, &rules, 1.0)
            .with_bounds(bounds)
            .solve_for_event_probability("LUC_HUONG", 0.9)
            .unwrap();
        assert!(result.parameter <= 0.5);
        assert!(result.parameter > 0.4999);
    }

    #[test]
    fn test_more_iterations_tighter() {
        let rules = standard_rule_set();
        let coarse = Calibrator::new(6, &rules, 1.0)
            .with_iterations(5)
            .solve_for_event_probability("LUC_HUONG", 0.01)
            .unwrap();
        let fine = Calibrator::new(6, &rules, 1.0)
            .solve_for_event_probability("LUC_HUONG", 0.01)
            .unwrap();
        assert!((fine.achieved - 0.01).abs() <= (coarse.achieved - 0.01).abs());
    }

    #[test]
    fn test_unknown_rule() {
        let rules = standard_rule_set();
        let result = Calibrator::new(6, &rules, 1.0).solve_for_event_probability("NOPE", 0.5);
        assert!(matches!(result, Err(EngineError::UnknownRule(_))));
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(CalibrationBounds::new(0.6, 0.4).is_err());
        assert!(CalibrationBounds::new(-0.1, 0.4).is_err());
        assert!(CalibrationBounds::new(0.0, 1.5).is_err());
        assert!(CalibrationBounds::new(0.0, f64::NAN).is_err());
    }
}
