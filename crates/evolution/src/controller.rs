//! The self-tuning control loop: observe, hypothesize, gate, deploy, and
//! roll back over the live parameter set.

use std::collections::VecDeque;

use arbor_types::{
    CognitiveParameters, EvolutionRecord, MutationKind, OutcomeRecord, ParameterSnapshot,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::mutation::{self, MutationProposal};

/// Snapshots retained for rollback.
const DEFAULT_ROLLBACK_CAPACITY: usize = 10;
/// Mutation candidates examined per cycle.
const DEFAULT_MAX_CANDIDATES: usize = 5;
/// Performance baseline before any outcome has been observed.
const INITIAL_BASELINE: f64 = 0.5;

// ── Rollback ring ───────────────────────────────────────────────────

/// Fixed-capacity snapshot ring. Pushing beyond capacity evicts the oldest
/// snapshot first.
#[derive(Clone, Debug)]
pub struct RollbackRing {
    snapshots: VecDeque<ParameterSnapshot>,
    capacity: usize,
}

impl RollbackRing {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: ParameterSnapshot) {
        if self.snapshots.len() >= self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Most recent snapshot, removed from the ring.
    pub fn pop(&mut self) -> Option<ParameterSnapshot> {
        self.snapshots.pop_back()
    }

    pub fn latest(&self) -> Option<&ParameterSnapshot> {
        self.snapshots.back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RollbackRing {
    fn default() -> Self {
        Self::new(DEFAULT_ROLLBACK_CAPACITY)
    }
}

// ── Controller ──────────────────────────────────────────────────────

/// Snapshot of controller state for callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionStatus {
    pub generation: u64,
    pub performance_baseline: f64,
    pub kappa_max: f64,
    pub mutations_accepted: usize,
    pub mutations_rejected: usize,
    pub current_fork_depth: u32,
    pub current_alpha: f64,
    pub current_risk_tolerance: f64,
}

/// Owns the single live [`CognitiveParameters`] instance and evolves it
/// under the curvature constraint.
///
/// Single evolution authority: one controller instance per parameter set,
/// no concurrent `evolve`/`rollback` callers.
pub struct EvolutionController {
    params: CognitiveParameters,
    kappa_max: f64,
    generation: u64,
    history: Vec<EvolutionRecord>,
    performance_baseline: f64,
    rollback: RollbackRing,
    rng: StdRng,
    max_candidates: usize,
}

impl EvolutionController {
    pub fn new() -> Self {
        Self {
            params: CognitiveParameters::default(),
            kappa_max: 0.8,
            generation: 0,
            history: Vec::new(),
            performance_baseline: INITIAL_BASELINE,
            rollback: RollbackRing::new(DEFAULT_ROLLBACK_CAPACITY),
            rng: StdRng::from_entropy(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    pub fn with_params(mut self, params: CognitiveParameters) -> Self {
        self.params = params;
        self
    }

    pub fn with_kappa_max(mut self, kappa_max: f64) -> Self {
        self.kappa_max = kappa_max.clamp(0.0, 2.0);
        self
    }

    /// Seed the mutation rng for reproducible cycles.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_rollback_capacity(mut self, capacity: usize) -> Self {
        self.rollback = RollbackRing::new(capacity);
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn params(&self) -> &CognitiveParameters {
        &self.params
    }

    pub fn history(&self) -> &[EvolutionRecord] {
        &self.history
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn performance_baseline(&self) -> f64 {
        self.performance_baseline
    }

    pub fn rollback_depth(&self) -> usize {
        self.rollback.len()
    }

    pub fn rollback_ring(&self) -> &RollbackRing {
        &self.rollback
    }

    pub fn kappa_max(&self) -> f64 {
        self.kappa_max
    }

    /// Aggregate validated outcome deltas into a performance scalar.
    ///
    /// With no validated records the previous baseline is returned
    /// unchanged; returning zero would read as a regression that never
    /// happened.
    pub fn observe(&self, outcomes: &[OutcomeRecord]) -> f64 {
        let scores: Vec<f64> = outcomes
            .iter()
            .filter(|o| o.validated)
            .filter_map(|o| o.delta)
            .map(|d| d.sentiment_accuracy - 0.5 * (d.risk_error.abs() + d.reward_error.abs()))
            .collect();
        if scores.is_empty() {
            return self.performance_baseline;
        }
        scores.iter().sum::<f64>() / scores.len() as f64
    }

    /// Generate this cycle's mutation candidates.
    pub fn hypothesize(&mut self) -> Vec<MutationProposal> {
        mutation::propose(&self.params, &mut self.rng, self.max_candidates)
    }

    /// Projected curvature of a parameter configuration.
    ///
    /// Closed-form heuristic: high risk tolerance with a low fear weight,
    /// a low deductive weight, and a hot learning rate all raise tension.
    pub fn projected_curvature(params: &CognitiveParameters) -> f64 {
        (params.risk_tolerance * (1.0 - params.fear_weight) * 0.4
            + (1.0 - params.deductive_weight) * 0.3
            + params.alpha * 2.0 * 0.3)
            .clamp(0.0, 2.0)
    }

    /// Run one evolution cycle: snapshot, observe, test candidates against
    /// the curvature gate, deploy the best survivor.
    ///
    /// Gate-rejected candidates are logged and discarded without ever
    /// touching the live parameters. With no surviving candidate the cycle
    /// deploys nothing. Never fails on empty input.
    pub fn evolve(&mut self, outcomes: &[OutcomeRecord]) -> &CognitiveParameters {
        self.generation += 1;
        let current_performance = self.observe(outcomes);

        self.rollback.push(ParameterSnapshot {
            generation: self.generation,
            params: self.params.clone(),
            taken_at: Utc::now(),
        });

        let mut best: Option<(MutationProposal, CognitiveParameters)> = None;
        for proposal in self.hypothesize() {
            let old_value = proposal.param.get(&self.params);

            let mut trial = self.params.clone();
            if proposal.param.apply(&mut trial, proposal.new_value).is_err() {
                // Proposals come from the typed registry, so kinds always
                // line up; a mismatch would be a planner bug.
                warn!(parameter = %proposal.param, "proposal value kind mismatch, skipping");
                continue;
            }
            trial.normalize_reasoning_weights();
            trial.normalize_retrieval_weights();

            let projected = Self::projected_curvature(&trial);
            if projected >= self.kappa_max {
                debug!(
                    parameter = %proposal.param,
                    projected,
                    kappa_max = self.kappa_max,
                    "mutation rejected by curvature gate"
                );
                self.history.push(EvolutionRecord {
                    generation: self.generation,
                    mutation: MutationKind::RejectedCurvature,
                    parameter: proposal.param,
                    old_value,
                    new_value: proposal.new_value,
                    expected_improvement: proposal.expected_improvement,
                    actual_improvement: None,
                    accepted: false,
                    timestamp: Utc::now(),
                });
                continue;
            }

            let improves = match &best {
                Some((incumbent, _)) => {
                    proposal.expected_improvement > incumbent.expected_improvement
                }
                None => proposal.expected_improvement > 0.0,
            };
            if improves {
                best = Some((proposal, trial));
            }
        }

        if let Some((proposal, trial)) = best {
            let old_value = proposal.param.get(&self.params);
            self.params = trial;
            info!(
                generation = self.generation,
                parameter = %proposal.param,
                expected_improvement = proposal.expected_improvement,
                "mutation deployed"
            );
            self.history.push(EvolutionRecord {
                generation: self.generation,
                mutation: MutationKind::Accepted,
                parameter: proposal.param,
                old_value,
                new_value: proposal.new_value,
                expected_improvement: proposal.expected_improvement,
                actual_improvement: Some(proposal.expected_improvement - current_performance),
                accepted: true,
                timestamp: Utc::now(),
            });
        }

        self.performance_baseline = current_performance;
        &self.params
    }

    /// Restore the most recent snapshot verbatim. Silent no-op on an empty
    /// ring.
    pub fn rollback(&mut self) -> Option<&CognitiveParameters> {
        let snapshot = self.rollback.pop()?;
        debug!(generation = snapshot.generation, "parameters rolled back");
        self.params = snapshot.params;
        Some(&self.params)
    }

    pub fn status(&self) -> EvolutionStatus {
        EvolutionStatus {
            generation: self.generation,
            performance_baseline: self.performance_baseline,
            kappa_max: self.kappa_max,
            mutations_accepted: self.history.iter().filter(|r| r.accepted).count(),
            mutations_rejected: self.history.iter().filter(|r| !r.accepted).count(),
            current_fork_depth: self.params.fork_depth,
            current_alpha: self.params.alpha,
            current_risk_tolerance: self.params.risk_tolerance,
        }
    }
}

impl Default for EvolutionController {
    fn default() -> Self {
        Self::new()
    }
}
