#![deny(unsafe_code)]
//! # arbor-evolution
//!
//! Bounded self-modification of the live cognitive parameter set. Each
//! cycle aggregates recent outcome deltas into a performance signal,
//! proposes small perturbations over the tunable-parameter whitelist,
//! rejects any candidate whose projected curvature would reach the safety
//! threshold, deploys the best survivor, and keeps a bounded snapshot ring
//! for rollback.
//!
//! Objective: maximize expected fork value subject to projected curvature
//! staying below `kappa_max`.

pub mod controller;
pub mod mutation;

pub use controller::{EvolutionController, EvolutionStatus, RollbackRing};
pub use mutation::MutationProposal;
