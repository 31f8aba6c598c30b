#![deny(unsafe_code)]
//! Arbor demo binary.
//!
//! Runs a self-contained walkthrough of the core loop:
//! 1. Score a batch of simulated forks and select a winner
//! 2. Record observed outcomes against the selected forks
//! 3. Run evolution cycles over the live parameter set
//! 4. Roll back the last deployed mutation
//!
//! The affective/predictive projections are hand-written stand-ins for a
//! field projector; no external services required.

use arbor_runtime::{CognitiveCore, CoreError};
use arbor_types::{ActualOutcome, AffectiveState, Fork, PredictiveVector, ReasoningMode};

fn section(title: &str) {
    println!();
    println!("── {} {}", title, "─".repeat(50_usize.saturating_sub(title.len())));
}

/// A simulated projector pass: three candidate paths with deliberately
/// divergent field projections.
fn make_batch(cycle: u64) -> Vec<Fork> {
    let session = format!("demo-session-{}", cycle);
    vec![
        Fork::new(&session, "Take the well-understood route")
            .with_mode(ReasoningMode::Analytic)
            .with_confidence(0.8)
            .with_logic_step("prior outcomes on this route were positive")
            .with_logic_step("constraints verified")
            .with_affect(AffectiveState::new(0.8, 0.1, 0.2, 0.7, 0.1))
            .with_prediction(PredictiveVector::new(0.1, 0.75, 0.2, 0.9)),
        Fork::new(&session, "Try the novel shortcut")
            .with_mode(ReasoningMode::Creative)
            .with_confidence(0.55)
            .with_logic_step("shortcut unproven, payoff large")
            .with_affect(AffectiveState::new(0.4, 0.6, 0.8, 0.5, 0.3))
            .with_prediction(PredictiveVector::new(0.7, 0.9, 0.8, 0.3)),
        Fork::new(&session, "Defer and gather more signal")
            .with_mode(ReasoningMode::Empathetic)
            .with_confidence(0.6)
            .with_logic_step("waiting costs little")
            .with_affect(AffectiveState::new(0.6, 0.2, 0.1, 0.5, 0.2))
            .with_prediction(PredictiveVector::new(0.2, 0.5, 0.3, 0.8)),
    ]
}

fn run_demo() -> Result<(), CoreError> {
    let mut core = CognitiveCore::new().with_kappa_max(0.8).with_seed(2024);

    section("Selection");
    let mut selected_ids = Vec::new();
    for cycle in 1..=5 {
        let winner = core.score_and_select(make_batch(cycle))?;
        println!(
            "  cycle {}: selected {} (curvature {:.3}, score {:.3})",
            cycle,
            winner.id,
            winner.curvature,
            winner.score()
        );
        selected_ids.push(winner.id.clone());
    }

    section("Winner summary");
    let winner = core
        .fork(&selected_ids[0])
        .ok_or_else(|| CoreError::ForkNotFound(selected_ids[0].clone()))?;
    match serde_json::to_string_pretty(&winner.summary()) {
        Ok(json) => println!("{}", json),
        Err(e) => println!("  (summary unavailable: {})", e),
    }

    section("Outcome recording");
    for (i, fork_id) in selected_ids.iter().enumerate() {
        // Outcomes drift slightly riskier than predicted.
        let outcome = ActualOutcome::new()
            .with_risk(0.2 + 0.05 * i as f64)
            .with_reward(0.7)
            .with_sentiment_quality(0.75)
            .with_harm(0.05 * i as f64);
        let record = core.record_outcome(fork_id, &outcome)?;
        if let Some(delta) = record.delta {
            println!(
                "  {}: risk_error {:+.3}, reward_error {:+.3}, sentiment_accuracy {:.3}",
                fork_id, delta.risk_error, delta.reward_error, delta.sentiment_accuracy
            );
        }
    }

    section("Bias analysis");
    println!("  {:?}", core.detect_bias());
    println!("  {:?}", core.curvature_effectiveness());

    section("Evolution");
    let outcomes = core.validated_outcomes();
    for _ in 0..3 {
        core.run_evolution_cycle(&outcomes);
        let status = core.status();
        println!(
            "  generation {}: baseline {:.3}, accepted {}, rejected {}",
            status.generation,
            status.performance_baseline,
            status.mutations_accepted,
            status.mutations_rejected
        );
    }

    section("Rollback");
    match core.rollback_parameters() {
        Some(params) => println!(
            "  restored configuration (alpha {:.4}, fork_depth {})",
            params.alpha, params.fork_depth
        ),
        None => println!("  nothing to roll back"),
    }

    section("Final status");
    match serde_json::to_string_pretty(&core.status()) {
        Ok(json) => println!("{}", json),
        Err(e) => println!("  (status unavailable: {})", e),
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("arbor demo: curvature-gated selection and bounded self-tuning");

    if let Err(e) = run_demo() {
        eprintln!("demo failed: {}", e);
        std::process::exit(1);
    }
}
