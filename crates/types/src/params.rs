//! The live cognitive parameter set and its tunable-parameter registry.
//!
//! Mutation eligibility is an explicit enum, not a name lookup: the
//! whitelist is [`TunableParam::ALL`], and every entry carries a typed
//! getter/setter pair over [`CognitiveParameters`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalars governing reasoning, retrieval, affect weighting, forecasting,
/// and fork generation. Exactly one live instance exists per controller;
/// snapshots are plain value copies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CognitiveParameters {
    // Reasoning strategy weights (normalized to sum 1).
    pub deductive_weight: f64,
    pub inductive_weight: f64,
    pub abductive_weight: f64,

    // Retrieval heuristics (normalized to sum 1).
    pub vector_search_weight: f64,
    pub graph_search_weight: f64,

    // Relative importance of the affect dimensions.
    pub trust_weight: f64,
    pub fear_weight: f64,
    pub urgency_weight: f64,
    pub satisfaction_weight: f64,
    pub frustration_weight: f64,

    /// Steps ahead to predict.
    pub forecast_horizon: u32,
    /// Maximum acceptable risk.
    pub risk_tolerance: f64,

    /// Hypotheses generated per query.
    pub fork_depth: u32,
    /// Maximum tolerated curvature. Not mutation-eligible.
    pub kappa_max: f64,

    /// Learning rate.
    pub alpha: f64,
}

impl Default for CognitiveParameters {
    fn default() -> Self {
        Self {
            deductive_weight: 0.4,
            inductive_weight: 0.35,
            abductive_weight: 0.25,
            vector_search_weight: 0.6,
            graph_search_weight: 0.4,
            trust_weight: 0.3,
            fear_weight: 0.2,
            urgency_weight: 0.15,
            satisfaction_weight: 0.25,
            frustration_weight: 0.1,
            forecast_horizon: 5,
            risk_tolerance: 0.3,
            fork_depth: 3,
            kappa_max: 0.8,
            alpha: 0.01,
        }
    }
}

impl CognitiveParameters {
    /// Rescale the reasoning weight triple to sum to 1. A zero-sum triple
    /// is left untouched.
    pub fn normalize_reasoning_weights(&mut self) {
        let total = self.deductive_weight + self.inductive_weight + self.abductive_weight;
        if total > 0.0 {
            self.deductive_weight /= total;
            self.inductive_weight /= total;
            self.abductive_weight /= total;
        }
    }

    /// Rescale the retrieval weight pair to sum to 1. A zero-sum pair is
    /// left untouched.
    pub fn normalize_retrieval_weights(&mut self) {
        let total = self.vector_search_weight + self.graph_search_weight;
        if total > 0.0 {
            self.vector_search_weight /= total;
            self.graph_search_weight /= total;
        }
    }

    /// Float-valued fields in fixed order (integer fields excluded).
    pub fn to_vector(&self) -> [f64; 12] {
        [
            self.deductive_weight,
            self.inductive_weight,
            self.abductive_weight,
            self.vector_search_weight,
            self.graph_search_weight,
            self.trust_weight,
            self.fear_weight,
            self.urgency_weight,
            self.satisfaction_weight,
            self.frustration_weight,
            self.risk_tolerance,
            self.alpha,
        ]
    }
}

/// A value read from or written to one tunable parameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(u32),
    Float(f64),
}

impl ParamValue {
    pub fn as_f64(self) -> f64 {
        match self {
            ParamValue::Int(v) => v as f64,
            ParamValue::Float(v) => v,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Errors from the tunable-parameter registry.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("value {value} has the wrong kind for parameter {param}")]
    KindMismatch { param: TunableParam, value: ParamValue },
}

/// The mutation-eligible parameters. `kappa_max` is deliberately absent:
/// the safety threshold may not tune itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TunableParam {
    DeductiveWeight,
    InductiveWeight,
    AbductiveWeight,
    VectorSearchWeight,
    GraphSearchWeight,
    TrustWeight,
    FearWeight,
    UrgencyWeight,
    SatisfactionWeight,
    FrustrationWeight,
    RiskTolerance,
    Alpha,
    ForkDepth,
    ForecastHorizon,
}

impl TunableParam {
    /// The full mutation whitelist.
    pub const ALL: [TunableParam; 14] = [
        TunableParam::DeductiveWeight,
        TunableParam::InductiveWeight,
        TunableParam::AbductiveWeight,
        TunableParam::VectorSearchWeight,
        TunableParam::GraphSearchWeight,
        TunableParam::TrustWeight,
        TunableParam::FearWeight,
        TunableParam::UrgencyWeight,
        TunableParam::SatisfactionWeight,
        TunableParam::FrustrationWeight,
        TunableParam::RiskTolerance,
        TunableParam::Alpha,
        TunableParam::ForkDepth,
        TunableParam::ForecastHorizon,
    ];

    /// Snake-case field name, as written into audit records.
    pub fn name(self) -> &'static str {
        match self {
            TunableParam::DeductiveWeight => "deductive_weight",
            TunableParam::InductiveWeight => "inductive_weight",
            TunableParam::AbductiveWeight => "abductive_weight",
            TunableParam::VectorSearchWeight => "vector_search_weight",
            TunableParam::GraphSearchWeight => "graph_search_weight",
            TunableParam::TrustWeight => "trust_weight",
            TunableParam::FearWeight => "fear_weight",
            TunableParam::UrgencyWeight => "urgency_weight",
            TunableParam::SatisfactionWeight => "satisfaction_weight",
            TunableParam::FrustrationWeight => "frustration_weight",
            TunableParam::RiskTolerance => "risk_tolerance",
            TunableParam::Alpha => "alpha",
            TunableParam::ForkDepth => "fork_depth",
            TunableParam::ForecastHorizon => "forecast_horizon",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, TunableParam::ForkDepth | TunableParam::ForecastHorizon)
    }

    /// Read the current value of this parameter.
    pub fn get(self, params: &CognitiveParameters) -> ParamValue {
        match self {
            TunableParam::DeductiveWeight => ParamValue::Float(params.deductive_weight),
            TunableParam::InductiveWeight => ParamValue::Float(params.inductive_weight),
            TunableParam::AbductiveWeight => ParamValue::Float(params.abductive_weight),
            TunableParam::VectorSearchWeight => ParamValue::Float(params.vector_search_weight),
            TunableParam::GraphSearchWeight => ParamValue::Float(params.graph_search_weight),
            TunableParam::TrustWeight => ParamValue::Float(params.trust_weight),
            TunableParam::FearWeight => ParamValue::Float(params.fear_weight),
            TunableParam::UrgencyWeight => ParamValue::Float(params.urgency_weight),
            TunableParam::SatisfactionWeight => ParamValue::Float(params.satisfaction_weight),
            TunableParam::FrustrationWeight => ParamValue::Float(params.frustration_weight),
            TunableParam::RiskTolerance => ParamValue::Float(params.risk_tolerance),
            TunableParam::Alpha => ParamValue::Float(params.alpha),
            TunableParam::ForkDepth => ParamValue::Int(params.fork_depth),
            TunableParam::ForecastHorizon => ParamValue::Int(params.forecast_horizon),
        }
    }

    /// Write a new value for this parameter. Kind mismatch is an error,
    /// never a silent no-op.
    pub fn apply(self, params: &mut CognitiveParameters, value: ParamValue) -> Result<(), ParamError> {
        match (self, value) {
            (TunableParam::DeductiveWeight, ParamValue::Float(v)) => params.deductive_weight = v,
            (TunableParam::InductiveWeight, ParamValue::Float(v)) => params.inductive_weight = v,
            (TunableParam::AbductiveWeight, ParamValue::Float(v)) => params.abductive_weight = v,
            (TunableParam::VectorSearchWeight, ParamValue::Float(v)) => {
                params.vector_search_weight = v
            }
            (TunableParam::GraphSearchWeight, ParamValue::Float(v)) => {
                params.graph_search_weight = v
            }
            (TunableParam::TrustWeight, ParamValue::Float(v)) => params.trust_weight = v,
            (TunableParam::FearWeight, ParamValue::Float(v)) => params.fear_weight = v,
            (TunableParam::UrgencyWeight, ParamValue::Float(v)) => params.urgency_weight = v,
            (TunableParam::SatisfactionWeight, ParamValue::Float(v)) => {
                params.satisfaction_weight = v
            }
            (TunableParam::FrustrationWeight, ParamValue::Float(v)) => {
                params.frustration_weight = v
            }
            (TunableParam::RiskTolerance, ParamValue::Float(v)) => params.risk_tolerance = v,
            (TunableParam::Alpha, ParamValue::Float(v)) => params.alpha = v,
            (TunableParam::ForkDepth, ParamValue::Int(v)) => params.fork_depth = v,
            (TunableParam::ForecastHorizon, ParamValue::Int(v)) => params.forecast_horizon = v,
            (param, value) => return Err(ParamError::KindMismatch { param, value }),
        }
        Ok(())
    }
}

impl fmt::Display for TunableParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
