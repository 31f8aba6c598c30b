//! The fork primitive: one candidate hypothesis bundle per input, carrying
//! its affective and predictive field projections plus scoring metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Unique short identifier for a fork (8 uppercase hex chars).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForkId(pub String);

impl ForkId {
    pub fn generate() -> Self {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        Self(hex[..8].to_uppercase())
    }
}

impl fmt::Display for ForkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ForkId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ForkId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// 5-dimensional affective field projection.
///
/// Each component lives in [0,1]; `new` clamps, the vector conversions are
/// exact.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AffectiveState {
    /// Confidence in reasoning reliability.
    pub trust: f64,
    /// Anticipated risk or danger.
    pub fear: f64,
    /// Time-sensitivity of the decision.
    pub urgency: f64,
    /// Goal alignment quality.
    pub satisfaction: f64,
    /// Constraint conflict intensity.
    pub frustration: f64,
}

impl Default for AffectiveState {
    fn default() -> Self {
        Self {
            trust: 0.5,
            fear: 0.1,
            urgency: 0.3,
            satisfaction: 0.6,
            frustration: 0.1,
        }
    }
}

impl AffectiveState {
    pub fn new(trust: f64, fear: f64, urgency: f64, satisfaction: f64, frustration: f64) -> Self {
        Self {
            trust: clamp01(trust),
            fear: clamp01(fear),
            urgency: clamp01(urgency),
            satisfaction: clamp01(satisfaction),
            frustration: clamp01(frustration),
        }
    }

    /// Fixed component order: trust, fear, urgency, satisfaction, frustration.
    pub fn to_vector(&self) -> [f64; 5] {
        [
            self.trust,
            self.fear,
            self.urgency,
            self.satisfaction,
            self.frustration,
        ]
    }

    /// Exact inverse of [`to_vector`](Self::to_vector); no clamping.
    pub fn from_vector(v: [f64; 5]) -> Self {
        Self {
            trust: v[0],
            fear: v[1],
            urgency: v[2],
            satisfaction: v[3],
            frustration: v[4],
        }
    }

    pub fn norm(&self) -> f64 {
        self.to_vector().iter().map(|c| c * c).sum::<f64>().sqrt()
    }
}

/// 4-dimensional predictive field projection, components in [0,1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictiveVector {
    /// Probability of negative outcomes.
    pub risk: f64,
    /// Expected value of positive outcomes.
    pub reward: f64,
    /// Outcome variance and unpredictability.
    pub volatility: f64,
    /// Resilience to perturbation.
    pub stability: f64,
}

impl Default for PredictiveVector {
    fn default() -> Self {
        Self {
            risk: 0.2,
            reward: 0.7,
            volatility: 0.3,
            stability: 0.8,
        }
    }
}

impl PredictiveVector {
    pub fn new(risk: f64, reward: f64, volatility: f64, stability: f64) -> Self {
        Self {
            risk: clamp01(risk),
            reward: clamp01(reward),
            volatility: clamp01(volatility),
            stability: clamp01(stability),
        }
    }

    /// Fixed component order: risk, reward, volatility, stability.
    pub fn to_vector(&self) -> [f64; 4] {
        [self.risk, self.reward, self.volatility, self.stability]
    }

    /// Exact inverse of [`to_vector`](Self::to_vector); no clamping.
    pub fn from_vector(v: [f64; 4]) -> Self {
        Self {
            risk: v[0],
            reward: v[1],
            volatility: v[2],
            stability: v[3],
        }
    }

    pub fn norm(&self) -> f64 {
        self.to_vector().iter().map(|c| c * c).sum::<f64>().sqrt()
    }
}

/// Reasoning strategy that produced a fork.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningMode {
    #[default]
    Analytic,
    Creative,
    Empathetic,
}

impl fmt::Display for ReasoningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReasoningMode::Analytic => "analytic",
            ReasoningMode::Creative => "creative",
            ReasoningMode::Empathetic => "empathetic",
        };
        write!(f, "{}", s)
    }
}

/// Observed outcome reported back for a previously selected fork.
///
/// Every field is optional; a missing field defaults to the fork's own
/// prediction (zero error) or the documented fallback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActualOutcome {
    pub risk: Option<f64>,
    pub reward: Option<f64>,
    pub sentiment_quality: Option<f64>,
    pub harm: Option<f64>,
}

impl ActualOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_risk(mut self, risk: f64) -> Self {
        self.risk = Some(clamp01(risk));
        self
    }

    pub fn with_reward(mut self, reward: f64) -> Self {
        self.reward = Some(clamp01(reward));
        self
    }

    pub fn with_sentiment_quality(mut self, quality: f64) -> Self {
        self.sentiment_quality = Some(clamp01(quality));
        self
    }

    pub fn with_harm(mut self, harm: f64) -> Self {
        self.harm = Some(clamp01(harm));
        self
    }
}

/// Prediction error metrics for one validated fork.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDelta {
    /// Actual risk minus predicted risk.
    pub risk_error: f64,
    /// Actual reward minus predicted reward.
    pub reward_error: f64,
    /// 1 minus the absolute sentiment prediction error.
    pub sentiment_accuracy: f64,
}

/// Temporal truth record: populated when the real outcome becomes known.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub validated: bool,
    pub actual_outcome: Option<ActualOutcome>,
    pub delta: Option<OutcomeDelta>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A fork: one complete candidate interpretation/response path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fork {
    pub id: ForkId,
    pub session_id: String,
    pub parent_id: Option<ForkId>,

    /// The candidate hypothesis text.
    pub hypothesis: String,
    /// Ordered reasoning trace.
    pub logic_path: Vec<String>,
    pub affective_state: AffectiveState,
    pub predictive_vector: PredictiveVector,

    /// Ensemble reliability score in [0,1]. Clamped by producers.
    pub confidence: f64,
    /// Tension metric in [0,2]. Clamped by producers.
    pub curvature: f64,

    pub reasoning_mode: ReasoningMode,
    /// Depth in the branching tree.
    pub depth: u32,
    pub selected: bool,
    pub created_at: DateTime<Utc>,

    pub validation: ValidationRecord,
}

impl Fork {
    pub fn new(session_id: impl Into<String>, hypothesis: impl Into<String>) -> Self {
        Self {
            id: ForkId::generate(),
            session_id: session_id.into(),
            parent_id: None,
            hypothesis: hypothesis.into(),
            logic_path: Vec::new(),
            affective_state: AffectiveState::default(),
            predictive_vector: PredictiveVector::default(),
            confidence: 0.5,
            curvature: 0.0,
            reasoning_mode: ReasoningMode::default(),
            depth: 0,
            selected: false,
            created_at: Utc::now(),
            validation: ValidationRecord::default(),
        }
    }

    pub fn with_parent(mut self, parent: ForkId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = clamp01(confidence);
        self
    }

    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature.clamp(0.0, 2.0);
        self
    }

    pub fn with_mode(mut self, mode: ReasoningMode) -> Self {
        self.reasoning_mode = mode;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_affect(mut self, affect: AffectiveState) -> Self {
        self.affective_state = affect;
        self
    }

    pub fn with_prediction(mut self, prediction: PredictiveVector) -> Self {
        self.predictive_vector = prediction;
        self
    }

    pub fn with_logic_step(mut self, step: impl Into<String>) -> Self {
        self.logic_path.push(step.into());
        self
    }

    /// Producer-side curvature update; keeps the [0,2] clamp invariant.
    pub fn set_curvature(&mut self, curvature: f64) {
        self.curvature = curvature.clamp(0.0, 2.0);
    }

    /// Net positive affect in [-0.5, 0.5].
    pub fn affect_score(&self) -> f64 {
        let a = &self.affective_state;
        (a.trust + a.satisfaction - a.fear - a.frustration) / 4.0
    }

    /// Net positive outlook in [-0.5, 0.5].
    pub fn predict_score(&self) -> f64 {
        let p = &self.predictive_vector;
        (p.reward + p.stability - p.risk - p.volatility) / 4.0
    }

    /// Composite score: high confidence, positive affect and outlook, low
    /// curvature.
    pub fn score(&self) -> f64 {
        self.confidence + self.affect_score() * 0.3 + self.predict_score() * 0.3
            - self.curvature * 0.3
    }

    /// The persisted-shape projection consumed by callers and serializers.
    pub fn summary(&self) -> ForkSummary {
        ForkSummary {
            fork_id: self.id.clone(),
            hypothesis: self.hypothesis.clone(),
            confidence: self.confidence,
            curvature: self.curvature,
            sentiment: self.affective_state,
            future: self.predictive_vector,
            reasoning_mode: self.reasoning_mode,
            logic_path: self.logic_path.clone(),
        }
    }
}

/// Serialized projection of a fork.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForkSummary {
    pub fork_id: ForkId,
    pub hypothesis: String,
    pub confidence: f64,
    pub curvature: f64,
    pub sentiment: AffectiveState,
    pub future: PredictiveVector,
    pub reasoning_mode: ReasoningMode,
    pub logic_path: Vec<String>,
}
