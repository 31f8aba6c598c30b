//! Property tests: field projections convert to and from their fixed-order
//! vectors without loss.

use arbor_types::{AffectiveState, PredictiveVector};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn unit_interval() -> impl Strategy<Value = f64> {
    0.0..=1.0f64
}

fn arb_affect() -> impl Strategy<Value = AffectiveState> {
    (
        unit_interval(),
        unit_interval(),
        unit_interval(),
        unit_interval(),
        unit_interval(),
    )
        .prop_map(|(trust, fear, urgency, satisfaction, frustration)| AffectiveState {
            trust,
            fear,
            urgency,
            satisfaction,
            frustration,
        })
}

fn arb_prediction() -> impl Strategy<Value = PredictiveVector> {
    (
        unit_interval(),
        unit_interval(),
        unit_interval(),
        unit_interval(),
    )
        .prop_map(|(risk, reward, volatility, stability)| PredictiveVector {
            risk,
            reward,
            volatility,
            stability,
        })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn affective_round_trip_is_exact(state in arb_affect()) {
        prop_assert_eq!(AffectiveState::from_vector(state.to_vector()), state);
    }

    #[test]
    fn predictive_round_trip_is_exact(prediction in arb_prediction()) {
        prop_assert_eq!(PredictiveVector::from_vector(prediction.to_vector()), prediction);
    }

    #[test]
    fn affective_vector_order_is_fixed(state in arb_affect()) {
        let v = state.to_vector();
        prop_assert_eq!(v[0], state.trust);
        prop_assert_eq!(v[1], state.fear);
        prop_assert_eq!(v[2], state.urgency);
        prop_assert_eq!(v[3], state.satisfaction);
        prop_assert_eq!(v[4], state.frustration);
    }

    #[test]
    fn predictive_vector_order_is_fixed(prediction in arb_prediction()) {
        let v = prediction.to_vector();
        prop_assert_eq!(v[0], prediction.risk);
        prop_assert_eq!(v[1], prediction.reward);
        prop_assert_eq!(v[2], prediction.volatility);
        prop_assert_eq!(v[3], prediction.stability);
    }

    #[test]
    fn constructor_clamp_is_idempotent(
        trust in -2.0..3.0f64,
        fear in -2.0..3.0f64,
        urgency in -2.0..3.0f64,
        satisfaction in -2.0..3.0f64,
        frustration in -2.0..3.0f64,
    ) {
        let state = AffectiveState::new(trust, fear, urgency, satisfaction, frustration);
        for component in state.to_vector() {
            prop_assert!((0.0..=1.0).contains(&component));
        }
        let again = AffectiveState::new(
            state.trust,
            state.fear,
            state.urgency,
            state.satisfaction,
            state.frustration,
        );
        prop_assert_eq!(again, state);
    }
}
