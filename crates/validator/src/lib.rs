#![deny(unsafe_code)]
//! # arbor-validator
//!
//! Records actual outcomes against fork predictions and computes delta
//! metrics. The accumulated log feeds two analyses: systematic bias in
//! risk/reward/sentiment forecasting, and a post-hoc audit of whether the
//! curvature signal actually anticipated harm.
//!
//! Analysis queries degrade to [`BiasAnalysis::InsufficientData`] /
//! [`EffectivenessAnalysis::InsufficientData`] on sparse logs; they never
//! fail.

use arbor_types::{ActualOutcome, Fork, ForkId, OutcomeDelta, ValidationRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Curvature above this level counts as a harm prediction in the audit log.
const HARM_SIGNAL_THRESHOLD: f64 = 0.5;
/// Fallback sentiment quality when the outcome omits it.
const DEFAULT_SENTIMENT_QUALITY: f64 = 0.7;
/// Minimum logged outcomes before effectiveness statistics mean anything.
const MIN_EFFECTIVENESS_SAMPLES: usize = 3;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ValidationEntry {
    fork_id: ForkId,
    delta: OutcomeDelta,
    curvature: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct HarmEntry {
    fork_id: ForkId,
    curvature: f64,
    actual_harm: f64,
    /// Whether curvature flagged this fork as harmful, frozen at record time.
    curvature_predicted_harm: bool,
    timestamp: DateTime<Utc>,
}

/// Aggregate forecasting-bias statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    /// Mean risk error. Positive means risk is systematically underestimated.
    pub risk_bias: f64,
    /// Mean reward error. Positive means reward is underestimated.
    pub reward_bias: f64,
    pub sentiment_mean_accuracy: f64,
    /// Risk-error spread above 0.2 reads as overconfident forecasting.
    pub overconfidence_risk: bool,
    pub sample_size: usize,
}

/// Bias query result; sparse logs yield `InsufficientData` rather than an
/// error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BiasAnalysis {
    InsufficientData,
    Report(BiasReport),
}

/// How harm actually distributed across the curvature partitions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurvatureEffectiveness {
    pub high_curvature_mean_harm: f64,
    pub low_curvature_mean_harm: f64,
    /// None when one partition is empty.
    pub curvature_signal_effective: Option<bool>,
}

/// Effectiveness query result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EffectivenessAnalysis {
    InsufficientData,
    Report(CurvatureEffectiveness),
}

/// Compares selected forks' predictions against observed outcomes.
#[derive(Debug, Default)]
pub struct OutcomeValidator {
    records: Vec<ValidationEntry>,
    harm_log: Vec<HarmEntry>,
}

impl OutcomeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an actual outcome against a fork's predictions.
    ///
    /// Missing outcome fields default to the fork's own prediction, so an
    /// absent field contributes zero error. Re-validation overwrites the
    /// fork's previous record; both calls stay in the internal logs.
    pub fn validate(&mut self, fork: &mut Fork, outcome: &ActualOutcome) -> ValidationRecord {
        let predicted_risk = fork.predictive_vector.risk;
        let predicted_reward = fork.predictive_vector.reward;
        let actual_risk = outcome.risk.unwrap_or(predicted_risk);
        let actual_reward = outcome.reward.unwrap_or(predicted_reward);

        let predicted_sentiment =
            (fork.affective_state.trust + fork.affective_state.satisfaction) / 2.0;
        let actual_sentiment = outcome
            .sentiment_quality
            .unwrap_or(DEFAULT_SENTIMENT_QUALITY);

        let delta = OutcomeDelta {
            risk_error: actual_risk - predicted_risk,
            reward_error: actual_reward - predicted_reward,
            sentiment_accuracy: 1.0 - (actual_sentiment - predicted_sentiment).abs(),
        };

        let record = ValidationRecord {
            validated: true,
            actual_outcome: Some(*outcome),
            delta: Some(delta),
            timestamp: Some(Utc::now()),
        };
        fork.validation = record.clone();

        self.harm_log.push(HarmEntry {
            fork_id: fork.id.clone(),
            curvature: fork.curvature,
            actual_harm: outcome.harm.unwrap_or(0.0),
            curvature_predicted_harm: fork.curvature > HARM_SIGNAL_THRESHOLD,
            timestamp: Utc::now(),
        });
        self.records.push(ValidationEntry {
            fork_id: fork.id.clone(),
            delta,
            curvature: fork.curvature,
        });

        debug!(
            fork_id = %fork.id,
            risk_error = delta.risk_error,
            reward_error = delta.reward_error,
            sentiment_accuracy = delta.sentiment_accuracy,
            "outcome validated"
        );
        record
    }

    /// Analyze accumulated deltas for systematic forecasting bias.
    pub fn detect_bias(&self) -> BiasAnalysis {
        if self.records.is_empty() {
            return BiasAnalysis::InsufficientData;
        }

        let risk_errors: Vec<f64> = self.records.iter().map(|r| r.delta.risk_error).collect();
        let reward_errors: Vec<f64> = self.records.iter().map(|r| r.delta.reward_error).collect();
        let accuracies: Vec<f64> = self
            .records
            .iter()
            .map(|r| r.delta.sentiment_accuracy)
            .collect();

        BiasAnalysis::Report(BiasReport {
            risk_bias: mean(&risk_errors),
            reward_bias: mean(&reward_errors),
            sentiment_mean_accuracy: mean(&accuracies),
            overconfidence_risk: std_dev(&risk_errors) > 0.2,
            sample_size: self.records.len(),
        })
    }

    /// Was curvature an effective harm signal? Partitions the harm log by
    /// whether curvature flagged the fork at record time and compares mean
    /// observed harm.
    pub fn curvature_effectiveness(&self) -> EffectivenessAnalysis {
        if self.harm_log.len() < MIN_EFFECTIVENESS_SAMPLES {
            return EffectivenessAnalysis::InsufficientData;
        }

        let high: Vec<f64> = self
            .harm_log
            .iter()
            .filter(|e| e.curvature_predicted_harm)
            .map(|e| e.actual_harm)
            .collect();
        let low: Vec<f64> = self
            .harm_log
            .iter()
            .filter(|e| !e.curvature_predicted_harm)
            .map(|e| e.actual_harm)
            .collect();

        let effective = if high.is_empty() || low.is_empty() {
            None
        } else {
            Some(mean(&high) > mean(&low))
        };

        EffectivenessAnalysis::Report(CurvatureEffectiveness {
            high_curvature_mean_harm: if high.is_empty() { 0.0 } else { mean(&high) },
            low_curvature_mean_harm: if low.is_empty() { 0.0 } else { mean(&low) },
            curvature_signal_effective: effective,
        })
    }

    pub fn sample_size(&self) -> usize {
        self.records.len()
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
