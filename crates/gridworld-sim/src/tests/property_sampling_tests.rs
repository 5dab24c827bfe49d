use proptest::prelude::*;

use crate::{categorical_index, weighted_index};

fn weights_with_zeros() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(prop_oneof![Just(0.0), 0.001f64..10.0], 1..12)
        .prop_filter("needs positive mass", |w| w.iter().any(|x| *x > 0.0))
}

proptest! {
    #[test]
    fn weighted_scan_never_returns_zero_mass(weights in weights_with_zeros(), u in 0.0f64..1.0) {
        let index = weighted_index(&weights, u).expect("weights are valid");

        prop_assert!(index < weights.len());
        prop_assert!(weights[index] > 0.0);
    }

    #[test]
    fn categorical_scan_never_returns_zero_mass(weights in weights_with_zeros(), u in 0.0f64..1.0) {
        let total: f64 = weights.iter().sum();
        let probabilities: Vec<f64> = weights.iter().map(|w| w / total).collect();
        let index = categorical_index(&probabilities, u).expect("probabilities are valid");

        prop_assert!(index < probabilities.len());
        prop_assert!(probabilities[index] > 0.0);
    }
}
