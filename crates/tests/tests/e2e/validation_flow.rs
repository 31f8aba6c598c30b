//! End-to-end validation flow: delta computation, bias aggregation, and
//! the curvature/harm audit.

use arbor_types::{ActualOutcome, AffectiveState, Fork, PredictiveVector};
use arbor_validator::{BiasAnalysis, EffectivenessAnalysis, OutcomeValidator};

fn make_fork(risk: f64, reward: f64, trust: f64, satisfaction: f64) -> Fork {
    Fork::new("validation", "candidate")
        .with_affect(AffectiveState::new(trust, 0.1, 0.3, satisfaction, 0.1))
        .with_prediction(PredictiveVector::new(risk, reward, 0.3, 0.8))
}

#[test]
fn scenario_d_exact_deltas() {
    let mut validator = OutcomeValidator::new();
    let mut fork = make_fork(0.2, 0.8, 0.7, 0.7);
    let outcome = ActualOutcome::new()
        .with_risk(0.3)
        .with_reward(0.7)
        .with_sentiment_quality(0.8);
    let record = validator.validate(&mut fork, &outcome);
    let delta = record.delta.unwrap();
    assert!((delta.risk_error - 0.1).abs() < 1e-9);
    assert!((delta.reward_error - (-0.1)).abs() < 1e-9);
    assert!((delta.sentiment_accuracy - 0.9).abs() < 1e-9);
}

#[test]
fn partial_outcome_means_zero_error() {
    let mut validator = OutcomeValidator::new();
    let mut fork = make_fork(0.4, 0.6, 0.5, 0.5);
    let record = validator.validate(&mut fork, &ActualOutcome::new());
    let delta = record.delta.unwrap();
    assert_eq!(delta.risk_error, 0.0);
    assert_eq!(delta.reward_error, 0.0);
}

#[test]
fn bias_accumulates_across_validations() {
    let mut validator = OutcomeValidator::new();
    for actual_risk in [0.3, 0.4, 0.5] {
        let mut fork = make_fork(0.2, 0.8, 0.7, 0.7);
        validator.validate(&mut fork, &ActualOutcome::new().with_risk(actual_risk));
    }
    match validator.detect_bias() {
        BiasAnalysis::Report(report) => {
            // Mean of +0.1, +0.2, +0.3: risk systematically underestimated.
            assert!((report.risk_bias - 0.2).abs() < 1e-9);
            assert_eq!(report.sample_size, 3);
        }
        BiasAnalysis::InsufficientData => panic!("expected a report"),
    }
}

#[test]
fn harm_audit_separates_partitions() {
    let mut validator = OutcomeValidator::new();
    // High-curvature forks that really were harmful.
    for _ in 0..2 {
        let mut fork = make_fork(0.2, 0.8, 0.7, 0.7).with_curvature(0.9);
        validator.validate(&mut fork, &ActualOutcome::new().with_harm(0.7));
    }
    // A benign low-curvature fork.
    let mut fork = make_fork(0.2, 0.8, 0.7, 0.7).with_curvature(0.1);
    validator.validate(&mut fork, &ActualOutcome::new().with_harm(0.0));

    match validator.curvature_effectiveness() {
        EffectivenessAnalysis::Report(report) => {
            assert!(report.high_curvature_mean_harm > report.low_curvature_mean_harm);
            assert_eq!(report.curvature_signal_effective, Some(true));
        }
        EffectivenessAnalysis::InsufficientData => panic!("expected a report"),
    }
}

#[test]
fn sparse_logs_return_sentinels() {
    let validator = OutcomeValidator::new();
    assert_eq!(validator.detect_bias(), BiasAnalysis::InsufficientData);
    assert_eq!(
        validator.curvature_effectiveness(),
        EffectivenessAnalysis::InsufficientData
    );
}
