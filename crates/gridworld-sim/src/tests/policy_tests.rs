use gridworld_core::{ActionId, StateId};

use super::reference_table;
use crate::{Policy, Sampler, SimError, StartDistribution};

#[test]
fn uniform_policy_fits_the_reference_table() {
    let table = reference_table();
    let policy = Policy::uniform(table.action_count());

    policy.validate(&table).expect("uniform policy is valid");
    assert_eq!(policy.support(StateId::from(1)).len(), 4);
}

#[test]
fn deterministic_policy_looks_up_the_state() {
    let table = reference_table();
    let policy = Policy::deterministic((0..table.live_state_count()).map(|i| i % 4));
    let mut sampler = Sampler::seeded(1);

    policy.validate(&table).expect("deterministic policy is valid");
    assert_eq!(
        policy.choose(StateId::from(1), &mut sampler).expect("state 1"),
        ActionId::from(0)
    );
    assert_eq!(
        policy.choose(StateId::from(7), &mut sampler).expect("state 7"),
        ActionId::from(2)
    );
    assert_eq!(policy.support(StateId::from(7)), vec![ActionId::from(2)]);
    assert!(matches!(
        policy.choose(table.absorbing_state(), &mut sampler),
        Err(SimError::UnknownState { state: 24 })
    ));
}

#[test]
fn zero_probability_actions_are_never_chosen() {
    let policy = Policy::Stochastic {
        action_probabilities: vec![0.0, 0.0, 0.0, 1.0],
    };
    let mut sampler = Sampler::seeded(5);

    for _ in 0..1_000 {
        assert_eq!(
            policy.choose(StateId::from(3), &mut sampler).expect("valid"),
            ActionId::from(3)
        );
    }
    assert_eq!(policy.support(StateId::from(3)), vec![ActionId::from(3)]);
}

#[test]
fn mismatched_policies_are_rejected() {
    let table = reference_table();

    assert!(matches!(
        Policy::uniform(3).validate(&table),
        Err(SimError::PolicyActionCount {
            expected: 4,
            got: 3
        })
    ));
    assert!(matches!(
        Policy::deterministic([0, 1, 2]).validate(&table),
        Err(SimError::PolicyStateCount {
            expected: 23,
            got: 3
        })
    ));

    let mut actions = vec![0; 23];
    actions[4] = 9;
    assert!(matches!(
        Policy::deterministic(actions).validate(&table),
        Err(SimError::PolicyUnknownAction {
            state: 5,
            action: 9
        })
    ));

    let negative = Policy::Stochastic {
        action_probabilities: vec![0.5, 0.5, 0.5, -0.5],
    };
    assert!(matches!(
        negative.validate(&table),
        Err(SimError::InvalidDistribution(_))
    ));
}

#[test]
fn start_distributions_are_checked_against_the_table() {
    let table = reference_table();

    assert_eq!(StartDistribution::uniform(&table).weights().len(), 23);
    assert!(matches!(
        StartDistribution::from_weights(&table, vec![1.0; 5]),
        Err(SimError::StartWeightCount {
            expected: 23,
            got: 5
        })
    ));
    assert!(matches!(
        StartDistribution::from_weights(&table, vec![0.0; 23]),
        Err(SimError::InvalidDistribution(_))
    ));
    assert!(matches!(
        StartDistribution::fixed(&table, table.absorbing_state()),
        Err(SimError::UnknownState { state: 24 })
    ));

    let fixed = StartDistribution::fixed(&table, StateId::from(9)).expect("live state");
    assert_eq!(fixed.support().collect::<Vec<_>>(), vec![StateId::from(9)]);
    let mut sampler = Sampler::seeded(2);
    assert_eq!(fixed.sample(&mut sampler).expect("valid"), StateId::from(9));
}
