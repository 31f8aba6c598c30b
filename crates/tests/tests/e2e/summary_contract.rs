//! The persisted-shape contract: the fork summary projection keeps the
//! exact key layout callers and serializers depend on.

use arbor_runtime::CognitiveCore;
use arbor_types::{AffectiveState, Fork, PredictiveVector, ReasoningMode};

fn make_fork() -> Fork {
    Fork::new("contract", "summarized hypothesis")
        .with_mode(ReasoningMode::Empathetic)
        .with_confidence(0.65)
        .with_curvature(0.4)
        .with_logic_step("first step")
        .with_logic_step("second step")
        .with_affect(AffectiveState::new(0.7, 0.2, 0.3, 0.6, 0.1))
        .with_prediction(PredictiveVector::new(0.25, 0.8, 0.3, 0.75))
}

#[test]
fn summary_serializes_expected_keys() {
    let json = serde_json::to_value(make_fork().summary()).unwrap();

    assert!(json["fork_id"].is_string());
    assert_eq!(json["hypothesis"], "summarized hypothesis");
    assert_eq!(json["confidence"], 0.65);
    assert_eq!(json["curvature"], 0.4);
    assert_eq!(json["reasoning_mode"], "empathetic");

    for key in ["trust", "fear", "urgency", "satisfaction", "frustration"] {
        assert!(json["sentiment"][key].is_number(), "missing sentiment.{}", key);
    }
    for key in ["risk", "reward", "volatility", "stability"] {
        assert!(json["future"][key].is_number(), "missing future.{}", key);
    }

    let path = json["logic_path"].as_array().unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path[0], "first step");
}

#[test]
fn summary_round_trips_through_json() {
    let fork = make_fork();
    let json = serde_json::to_string(&fork.summary()).unwrap();
    let restored: arbor_types::ForkSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, fork.summary());
}

#[test]
fn archived_fork_summary_reflects_scored_curvature() {
    let mut core = CognitiveCore::new().with_seed(11);
    let winner = core
        .score_and_select(vec![make_fork(), make_fork()])
        .unwrap();
    let archived = core.fork(&winner.id).unwrap();
    let summary = archived.summary();
    assert_eq!(summary.curvature, archived.curvature);
    assert!((0.0..=2.0).contains(&summary.curvature));
}
