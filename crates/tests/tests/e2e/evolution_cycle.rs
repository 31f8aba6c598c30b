//! End-to-end evolution cycles: snapshotting, gating, deployment, and the
//! bounded rollback ring.

use arbor_evolution::EvolutionController;
use arbor_types::{MutationKind, OutcomeDelta, OutcomeRecord};

fn validated(accuracy: f64, risk_error: f64, reward_error: f64) -> OutcomeRecord {
    OutcomeRecord::validated(OutcomeDelta {
        risk_error,
        reward_error,
        sentiment_accuracy: accuracy,
    })
}

#[test]
fn scenario_c_first_cycle_state() {
    let mut controller = EvolutionController::new().with_seed(77);
    let before = controller.params().clone();
    controller.evolve(&[]);
    assert_eq!(controller.generation(), 1);
    assert_eq!(controller.rollback_depth(), 1);
    assert_eq!(
        controller.rollback_ring().latest().unwrap().params,
        before
    );
}

#[test]
fn empty_outcomes_never_fail() {
    let mut controller = EvolutionController::new().with_seed(77);
    for _ in 0..20 {
        controller.evolve(&[]);
    }
    assert_eq!(controller.generation(), 20);
}

#[test]
fn baseline_follows_observed_performance() {
    let mut controller = EvolutionController::new().with_seed(5);
    controller.evolve(&[validated(0.8, 0.1, 0.1)]);
    // 0.8 - 0.5 * 0.2 = 0.7
    assert!((controller.performance_baseline() - 0.7).abs() < 1e-9);
}

#[test]
fn rejected_mutations_never_touch_live_params() {
    let mut controller = EvolutionController::new().with_seed(13).with_kappa_max(0.01);
    let before = controller.params().clone();
    for _ in 0..5 {
        controller.evolve(&[]);
    }
    assert_eq!(controller.params(), &before);
    assert!(controller
        .history()
        .iter()
        .all(|r| r.mutation == MutationKind::RejectedCurvature && !r.accepted));
}

#[test]
fn projected_curvature_invariant_across_cycles() {
    for seed in [1_u64, 2, 3, 4, 5] {
        let mut controller = EvolutionController::new().with_seed(seed);
        for _ in 0..12 {
            controller.evolve(&[validated(0.9, 0.05, 0.05)]);
            let projected = EvolutionController::projected_curvature(controller.params());
            assert!(
                projected < controller.kappa_max(),
                "seed {} left projected curvature {} >= {}",
                seed,
                projected,
                controller.kappa_max()
            );
        }
    }
}

#[test]
fn rollback_chain_walks_history_backwards() {
    let mut controller = EvolutionController::new().with_seed(21);
    let snapshots: Vec<_> = (0..3)
        .map(|_| {
            let params = controller.params().clone();
            controller.evolve(&[]);
            params
        })
        .collect();
    // Pops restore in reverse order of the cycles that took them.
    assert_eq!(controller.rollback().cloned(), Some(snapshots[2].clone()));
    assert_eq!(controller.rollback().cloned(), Some(snapshots[1].clone()));
    assert_eq!(controller.rollback().cloned(), Some(snapshots[0].clone()));
    assert!(controller.rollback().is_none());
}

#[test]
fn ring_capacity_bounds_history() {
    let mut controller = EvolutionController::new().with_seed(2).with_rollback_capacity(4);
    for _ in 0..10 {
        controller.evolve(&[]);
    }
    assert_eq!(controller.rollback_depth(), 4);
}

#[test]
fn audit_log_is_append_only_per_cycle() {
    let mut controller = EvolutionController::new().with_seed(31);
    let mut last_len = 0;
    for _ in 0..6 {
        controller.evolve(&[]);
        assert!(controller.history().len() >= last_len);
        last_len = controller.history().len();
    }
    for record in controller.history() {
        assert!(record.generation >= 1);
        assert_eq!(record.accepted, record.mutation == MutationKind::Accepted);
    }
}
