#![deny(unsafe_code)]
//! # arbor-types
//!
//! Value objects shared across the arbor workspace: forks and their field
//! projections, the live cognitive parameter set with its tunable-parameter
//! registry, and the audit records produced by validation and evolution.

pub mod fork;
pub mod params;
pub mod record;

pub use fork::{
    ActualOutcome, AffectiveState, Fork, ForkId, ForkSummary, OutcomeDelta, PredictiveVector,
    ReasoningMode, ValidationRecord,
};
pub use params::{CognitiveParameters, ParamError, ParamValue, TunableParam};
pub use record::{EvolutionRecord, MutationKind, OutcomeRecord, ParameterSnapshot};
