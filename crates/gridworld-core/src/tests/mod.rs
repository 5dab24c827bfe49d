mod property_transition_tests;
mod transition_tests;

use crate::GridSpec;

fn reference_spec() -> GridSpec {
    GridSpec::reference().expect("reference grid should be valid")
}
