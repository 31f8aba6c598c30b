#![deny(unsafe_code)]
//! # arbor-curvature
//!
//! Curvature is the scalar tension metric over a fork: internal conflict
//! between its affective and predictive projections, plus divergence from
//! its sibling forks. Forks whose curvature reaches the configured maximum
//! fail the safety gate and are excluded from selection.

pub mod engine;
pub mod error;

pub use engine::CurvatureEngine;
pub use error::CurvatureError;
