//! Integration test: conditional odds and ruin estimates through the analyzer

use xamhuong::core::{FaceWeights, NO_EVENT, RUIN_SENTINEL};
use xamhuong::engine::{conditional_stats, exact_stats, risk_of_ruin};
use xamhuong::rules::standard_rule_set;
use xamhuong::{Analyzer, EngineError};

#[test]
fn test_empty_prefix_is_unconditional() {
    let weights = FaceWeights::from_slice(&[1.0, 2.0, 1.0, 1.5, 1.0, 0.5]).unwrap();
    let rules = standard_rule_set();
    let stats = exact_stats(&weights, 6, &rules, 1.0).unwrap();
    let given = conditional_stats(&weights, 6, &rules, &[]).unwrap();

    assert_eq!(given.completions, stats.partitions);
    assert!((given.expected_value - stats.expected_value).abs() < 1e-12);
    for rule in &rules {
        assert!((given.rule_probability(rule.id) - stats.rule_probability(rule.id)).abs() < 1e-12);
    }
    assert!((given.rule_probability(NO_EVENT) - stats.no_event_probability()).abs() < 1e-12);
}

#[test]
fn test_five_huong_showing() {
    let analyzer = Analyzer::default();
    let given = analyzer.compute_conditional(&[4, 4, 4, 4, 4]).unwrap();

    assert_eq!(given.completions, 6);
    assert!((given.total_probability_mass - 1.0).abs() < 1e-12);
    assert!((given.rule_probability("LUC_HUONG") - 1.0 / 6.0).abs() < 1e-12);
    assert!((given.rule_probability("NGU_HUONG") - 5.0 / 6.0).abs() < 1e-12);
    assert!((given.expected_value - (100.0 + 5.0 * 60.0) / 6.0).abs() < 1e-9);

    let ranked = given.ranked();
    assert_eq!(ranked[0].0, "NGU_HUONG");
}

#[test]
fn test_prefix_order_does_not_matter() {
    let analyzer = Analyzer::default();
    let a = analyzer.compute_conditional(&[4, 1, 4]).unwrap();
    let b = analyzer.compute_conditional(&[1, 4, 4]).unwrap();
    assert_eq!(a.per_rule, b.per_rule);
    assert_eq!(a.expected_value, b.expected_value);
}

#[test]
fn test_conditional_rejections() {
    let analyzer = Analyzer::default();
    assert!(matches!(
        analyzer.compute_conditional(&[1, 1, 1, 1, 1, 1, 1]),
        Err(EngineError::PrefixTooLong { prefix_len: 7, die_count: 6 })
    ));
    assert!(matches!(
        analyzer.compute_conditional(&[0]),
        Err(EngineError::InvalidFace { face: 0 })
    ));
}

#[test]
fn test_ruin_grows_with_target_under_negative_drift() {
    let mut previous = 0.0;
    for profit in [10.0, 50.0, 100.0, 500.0] {
        let ruin = risk_of_ruin(100.0, 10.0, profit, 0.45, 0.55).unwrap();
        assert!(ruin > previous, "profit {} gave {}", profit, ruin);
        assert!(ruin <= 1.0);
        previous = ruin;
    }
}

#[test]
fn test_ruin_through_analyzer() {
    let mut analyzer = Analyzer::default();
    assert_eq!(
        analyzer.estimate_risk_of_ruin(500.0, 5.0, 100.0).unwrap(),
        RUIN_SENTINEL
    );

    // Almost never a Hường: most rounds resolve to no event
    analyzer.set_face_weights(&[1.0, 1.0, 1.0, 0.01, 1.0, 1.0]).unwrap();
    let ruin = analyzer.estimate_risk_of_ruin(100.0, 10.0, 100.0).unwrap();
    assert!(ruin > 0.5 && ruin <= 1.0, "ruin = {}", ruin);

    assert!(matches!(
        analyzer.estimate_risk_of_ruin(100.0, 0.0, 10.0),
        Err(EngineError::InvalidStake(_))
    ));
}
