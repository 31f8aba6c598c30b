//! Mutation proposal machinery: bounded stochastic perturbations over the
//! tunable-parameter whitelist.

use arbor_types::{CognitiveParameters, ParamValue, TunableParam};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Standard deviation of the Gaussian float perturbation.
const FLOAT_SIGMA: f64 = 0.05;
/// Perturbed float parameters stay inside these bounds.
const FLOAT_MIN: f64 = 0.01;
const FLOAT_MAX: f64 = 1.0;
/// Upper bound on the uniform expected improvement drawn for float params.
const FLOAT_IMPROVEMENT_CAP: f64 = 0.1;
/// Upper bound on the uniform expected improvement drawn for int params.
const INT_IMPROVEMENT_CAP: f64 = 0.05;

/// A single candidate change to the live parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MutationProposal {
    pub param: TunableParam,
    pub new_value: ParamValue,
    pub expected_improvement: f64,
}

/// Propose up to `max_candidates` single-parameter perturbations.
///
/// Whitelist entries are sampled without replacement through the injected
/// rng, so a seeded controller replays the same proposal sequence.
pub(crate) fn propose(
    params: &CognitiveParameters,
    rng: &mut StdRng,
    max_candidates: usize,
) -> Vec<MutationProposal> {
    let picks: Vec<TunableParam> = TunableParam::ALL
        .choose_multiple(rng, max_candidates)
        .copied()
        .collect();
    picks
        .into_iter()
        .map(|param| perturb(param, params, rng))
        .collect()
}

fn perturb(param: TunableParam, params: &CognitiveParameters, rng: &mut StdRng) -> MutationProposal {
    match param.get(params) {
        ParamValue::Float(current) => {
            let next = (current + gaussian(rng, FLOAT_SIGMA)).clamp(FLOAT_MIN, FLOAT_MAX);
            MutationProposal {
                param,
                new_value: ParamValue::Float(next),
                expected_improvement: rng.gen_range(0.0..FLOAT_IMPROVEMENT_CAP),
            }
        }
        ParamValue::Int(current) => {
            let step = rng.gen_range(-1i64..=1);
            let next = (current as i64 + step).max(1) as u32;
            MutationProposal {
                param,
                new_value: ParamValue::Int(next),
                expected_improvement: rng.gen_range(0.0..INT_IMPROVEMENT_CAP),
            }
        }
    }
}

/// Zero-mean Gaussian sample via the Box-Muller transform.
fn gaussian(rng: &mut StdRng, sigma: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    sigma * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
