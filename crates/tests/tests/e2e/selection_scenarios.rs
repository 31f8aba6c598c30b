//! End-to-end selection scenarios: gate admission, rejection, and the
//! minimum-curvature fallback.

use arbor_curvature::{CurvatureEngine, CurvatureError};
use arbor_types::Fork;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_fork(curvature: f64, confidence: f64) -> Fork {
    Fork::new("scenario", "candidate")
        .with_confidence(confidence)
        .with_curvature(curvature)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_a_gated_fork_wins() {
    // Curvatures [0.9, 0.3] with kappa_max 0.8: the 0.9 fork fails the
    // gate even with the better raw confidence.
    let engine = CurvatureEngine::new().with_kappa_max(0.8);
    let forks = vec![make_fork(0.9, 0.95), make_fork(0.3, 0.5)];
    let winner = engine.select_best(&forks).unwrap();
    assert_eq!(winner.curvature, 0.3);
}

#[test]
fn scenario_b_fallback_to_minimum_curvature() {
    // Curvatures [0.95, 0.85] with kappa_max 0.8: both fail, the caller
    // still gets a fork, the least-curved one.
    let engine = CurvatureEngine::new().with_kappa_max(0.8);
    let forks = vec![make_fork(0.95, 0.9), make_fork(0.85, 0.1)];
    let winner = engine.select_best(&forks).unwrap();
    assert_eq!(winner.curvature, 0.85);
}

#[test]
fn gate_boundary_is_exclusive() {
    let engine = CurvatureEngine::new().with_kappa_max(0.8);
    let at_threshold = make_fork(0.8, 0.9);
    let below = make_fork(0.7, 0.1);
    assert!(!engine.gate(&at_threshold));
    let forks = vec![at_threshold, below];
    // The at-threshold fork is excluded despite its higher confidence.
    let winner = engine.select_best(&forks).unwrap();
    assert_eq!(winner.curvature, 0.7);
}

#[test]
fn empty_batch_is_the_only_failure() {
    let engine = CurvatureEngine::new();
    assert!(matches!(
        engine.select_best(&[]),
        Err(CurvatureError::EmptyBatch)
    ));
    let single = vec![make_fork(1.9, 0.0)];
    assert!(engine.select_best(&single).is_ok());
}

#[test]
fn highest_score_wins_among_gated() {
    let engine = CurvatureEngine::new().with_kappa_max(0.8);
    let forks = vec![
        make_fork(0.2, 0.5),
        make_fork(0.1, 0.9),
        make_fork(0.3, 0.7),
    ];
    let winner = engine.select_best(&forks).unwrap();
    assert_eq!(winner.confidence, 0.9);
}
