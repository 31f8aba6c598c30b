//! Cross-crate test harness for the arbor workspace.
//!
//! The suites live under `tests/`: e2e scenarios exercising the full
//! selection/validation/evolution loop, and property tests over the value
//! objects and the mutation gate.
