mod policy_tests;
mod property_sampling_tests;

use gridworld_core::{GridSpec, TransitionTable};

fn reference_table() -> TransitionTable {
    GridSpec::reference()
        .and_then(|spec| spec.build_table())
        .expect("reference table should build")
}
