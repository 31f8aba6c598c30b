//! Audit records: the evolution log, aggregated outcome reports, and
//! parameter snapshots retained for rollback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fork::{OutcomeDelta, ValidationRecord};
use crate::params::{CognitiveParameters, ParamValue, TunableParam};

/// What happened to a proposed mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Accepted,
    RejectedCurvature,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MutationKind::Accepted => "accepted",
            MutationKind::RejectedCurvature => "rejected_curvature",
        };
        write!(f, "{}", s)
    }
}

/// One entry in the append-only evolution audit log. Never mutated after
/// creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionRecord {
    pub generation: u64,
    pub mutation: MutationKind,
    pub parameter: TunableParam,
    pub old_value: ParamValue,
    pub new_value: ParamValue,
    pub expected_improvement: f64,
    pub actual_improvement: Option<f64>,
    pub accepted: bool,
    pub timestamp: DateTime<Utc>,
}

/// Aggregation input for the evolution controller: the validated/delta
/// projection of a fork's validation record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub validated: bool,
    pub delta: Option<OutcomeDelta>,
}

impl OutcomeRecord {
    pub fn validated(delta: OutcomeDelta) -> Self {
        Self {
            validated: true,
            delta: Some(delta),
        }
    }

    pub fn unvalidated() -> Self {
        Self::default()
    }
}

impl From<&ValidationRecord> for OutcomeRecord {
    fn from(record: &ValidationRecord) -> Self {
        Self {
            validated: record.validated,
            delta: record.delta,
        }
    }
}

/// A retained copy of the live parameters, taken before a mutation cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    /// Generation of the cycle that took this snapshot.
    pub generation: u64,
    pub params: CognitiveParameters,
    pub taken_at: DateTime<Utc>,
}
