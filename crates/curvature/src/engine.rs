use arbor_types::Fork;
use tracing::warn;

use crate::error::CurvatureError;

fn euclidean<const N: usize>(a: [f64; N], b: [f64; N]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Mean distance between consecutive vectors in the sequence.
///
/// First-order neighbor approximation: pairs (i, i+1) only, not the full
/// pairwise mean. Preserved as-is for score compatibility.
fn consecutive_mean_distance<const N: usize>(vectors: &[[f64; N]]) -> f64 {
    if vectors.len() < 2 {
        return 0.0;
    }
    let total: f64 = vectors
        .windows(2)
        .map(|pair| euclidean(pair[0], pair[1]))
        .sum();
    total / (vectors.len() - 1) as f64
}

/// Computes fork curvature, applies the safety gate, and selects the
/// winning fork from a batch.
#[derive(Clone, Debug)]
pub struct CurvatureEngine {
    /// Forks must stay strictly below this curvature to pass the gate.
    kappa_max: f64,
}

impl CurvatureEngine {
    pub fn new() -> Self {
        Self { kappa_max: 0.8 }
    }

    pub fn with_kappa_max(mut self, kappa_max: f64) -> Self {
        self.kappa_max = kappa_max.clamp(0.0, 2.0);
        self
    }

    pub fn kappa_max(&self) -> f64 {
        self.kappa_max
    }

    /// Curvature of one fork against its sibling context, in [0,2].
    ///
    /// Internal tension reads conflict between the two field projections:
    /// high fear against high reward, high trust against high risk, high
    /// frustration against low confidence, and volatile urgency.
    pub fn fork_curvature(&self, fork: &Fork, context: &[&Fork]) -> f64 {
        let affect = &fork.affective_state;
        let predict = &fork.predictive_vector;

        let internal_tension = (affect.fear - (1.0 - predict.reward)).abs() * 0.3
            + (affect.trust - (1.0 - predict.risk)).abs() * 0.3
            + (affect.frustration - (1.0 - fork.confidence)).abs() * 0.2
            + predict.volatility * affect.urgency * 0.2;

        let contextual_divergence = if context.is_empty() {
            0.0
        } else {
            let mut affects = Vec::with_capacity(context.len() + 1);
            affects.push(affect.to_vector());
            affects.extend(context.iter().map(|f| f.affective_state.to_vector()));

            let mut predictions = Vec::with_capacity(context.len() + 1);
            predictions.push(predict.to_vector());
            predictions.extend(context.iter().map(|f| f.predictive_vector.to_vector()));

            consecutive_mean_distance(&affects) + consecutive_mean_distance(&predictions)
        };

        (internal_tension + contextual_divergence * 0.1).clamp(0.0, 2.0)
    }

    /// Compute and store curvature for every fork in the batch, each one
    /// seeing its siblings as context.
    pub fn score_batch(&self, forks: &mut [Fork]) {
        let curvatures: Vec<f64> = (0..forks.len())
            .map(|i| {
                let context: Vec<&Fork> = forks
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, f)| f)
                    .collect();
                self.fork_curvature(&forks[i], &context)
            })
            .collect();
        for (fork, curvature) in forks.iter_mut().zip(curvatures) {
            fork.set_curvature(curvature);
        }
    }

    /// The safety gate: strict inequality, so curvature equal to the
    /// threshold fails.
    pub fn gate(&self, fork: &Fork) -> bool {
        fork.curvature < self.kappa_max
    }

    /// Select the winning fork: highest score among gate-passing candidates.
    ///
    /// Ties keep the earliest candidate (stable max). When the gate rejects
    /// every fork, degrades to the minimum-curvature fork of the whole
    /// batch, so a non-empty batch always yields a winner. Errors only on
    /// an empty batch.
    pub fn select_best<'a>(&self, forks: &'a [Fork]) -> Result<&'a Fork, CurvatureError> {
        if forks.is_empty() {
            return Err(CurvatureError::EmptyBatch);
        }

        let mut best: Option<&Fork> = None;
        for fork in forks {
            if !self.gate(fork) {
                continue;
            }
            match best {
                Some(current) if fork.score() <= current.score() => {}
                _ => best = Some(fork),
            }
        }
        if let Some(winner) = best {
            return Ok(winner);
        }

        warn!(
            batch = forks.len(),
            kappa_max = self.kappa_max,
            "every fork failed the gate, falling back to minimum curvature"
        );
        let mut fallback = &forks[0];
        for fork in &forks[1..] {
            if fork.curvature < fallback.curvature {
                fallback = fork;
            }
        }
        Ok(fallback)
    }
}

impl Default for CurvatureEngine {
    fn default() -> Self {
        Self::new()
    }
}
