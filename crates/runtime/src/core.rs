use std::collections::HashMap;

use arbor_curvature::CurvatureEngine;
use arbor_evolution::{EvolutionController, EvolutionStatus};
use arbor_types::{
    ActualOutcome, CognitiveParameters, Fork, ForkId, OutcomeRecord, ValidationRecord,
};
use arbor_validator::{BiasAnalysis, EffectivenessAnalysis, OutcomeValidator};
use tracing::info;

use crate::error::CoreError;

/// Facade over the selection, validation, and evolution engines.
///
/// Owns the fork archive: every scored fork is retained, rejected ones
/// included, so later outcome recording and counterfactual analysis can
/// find them by id. The archive only grows; the core never deletes a fork.
pub struct CognitiveCore {
    engine: CurvatureEngine,
    validator: OutcomeValidator,
    controller: EvolutionController,
    forks: HashMap<ForkId, Fork>,
}

impl CognitiveCore {
    pub fn new() -> Self {
        Self {
            engine: CurvatureEngine::new(),
            validator: OutcomeValidator::new(),
            controller: EvolutionController::new(),
            forks: HashMap::new(),
        }
    }

    /// Set the safety threshold for both the fork gate and the mutation
    /// gate.
    pub fn with_kappa_max(mut self, kappa_max: f64) -> Self {
        self.engine = self.engine.with_kappa_max(kappa_max);
        self.controller = self.controller.with_kappa_max(kappa_max);
        self
    }

    pub fn with_params(mut self, params: CognitiveParameters) -> Self {
        self.controller = self.controller.with_params(params);
        self
    }

    /// Seed the evolution rng for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.controller = self.controller.with_seed(seed);
        self
    }

    /// Score a batch of projector-enriched forks and select the winner.
    ///
    /// Each fork's curvature is computed against its siblings, the winner
    /// is marked selected, and the entire batch is archived. Fails only on
    /// an empty batch.
    pub fn score_and_select(&mut self, mut forks: Vec<Fork>) -> Result<Fork, CoreError> {
        self.engine.score_batch(&mut forks);
        let winner_id = self.engine.select_best(&forks)?.id.clone();

        let mut winner = None;
        for mut fork in forks {
            fork.selected = fork.id == winner_id;
            if fork.selected {
                winner = Some(fork.clone());
            }
            self.forks.insert(fork.id.clone(), fork);
        }

        match winner {
            Some(fork) => {
                info!(
                    fork_id = %fork.id,
                    curvature = fork.curvature,
                    score = fork.score(),
                    "fork selected"
                );
                Ok(fork)
            }
            None => Err(CoreError::ForkNotFound(winner_id)),
        }
    }

    /// Record an observed outcome for a previously archived fork.
    pub fn record_outcome(
        &mut self,
        fork_id: &ForkId,
        outcome: &ActualOutcome,
    ) -> Result<ValidationRecord, CoreError> {
        let fork = self
            .forks
            .get_mut(fork_id)
            .ok_or_else(|| CoreError::ForkNotFound(fork_id.clone()))?;
        Ok(self.validator.validate(fork, outcome))
    }

    /// The validated/delta projection of the archive, ready to feed an
    /// evolution cycle.
    pub fn validated_outcomes(&self) -> Vec<OutcomeRecord> {
        self.forks
            .values()
            .filter(|f| f.validation.validated)
            .map(|f| OutcomeRecord::from(&f.validation))
            .collect()
    }

    /// Run one evolution cycle and return the live parameters after it.
    pub fn run_evolution_cycle(&mut self, outcomes: &[OutcomeRecord]) -> CognitiveParameters {
        self.controller.evolve(outcomes).clone()
    }

    /// Restore the previous parameter configuration, if any snapshot
    /// remains.
    pub fn rollback_parameters(&mut self) -> Option<CognitiveParameters> {
        self.controller.rollback().cloned()
    }

    pub fn status(&self) -> EvolutionStatus {
        self.controller.status()
    }

    pub fn detect_bias(&self) -> BiasAnalysis {
        self.validator.detect_bias()
    }

    pub fn curvature_effectiveness(&self) -> EffectivenessAnalysis {
        self.validator.curvature_effectiveness()
    }

    pub fn params(&self) -> &CognitiveParameters {
        self.controller.params()
    }

    pub fn fork(&self, fork_id: &ForkId) -> Option<&Fork> {
        self.forks.get(fork_id)
    }

    pub fn fork_count(&self) -> usize {
        self.forks.len()
    }
}

impl Default for CognitiveCore {
    fn default() -> Self {
        Self::new()
    }
}
