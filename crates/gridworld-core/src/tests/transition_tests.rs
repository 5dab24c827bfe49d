use crate::{
    ActionId, ActionModel, ActionSet, ConfigError, Delta, GridModel, Outcome, PROB_TOLERANCE,
    StateId, TransitionBuilder, TransitionTable,
};

use super::reference_spec;

fn reference_table() -> TransitionTable {
    reference_spec()
        .build_table()
        .expect("reference table should build")
}

fn p(table: &TransitionTable, state: usize, action: usize, next: usize) -> f64 {
    table
        .probability(
            StateId::from(state),
            ActionId::from(action),
            StateId::from(next),
        )
        .expect("entry should exist")
}

#[test]
fn every_row_sums_to_one() {
    let table = reference_table();

    assert_eq!(table.state_count(), 24);
    assert_eq!(table.action_count(), 4);
    for state in table.states() {
        for action in table.actions() {
            let sum: f64 = table
                .distribution(state, action)
                .expect("row should exist")
                .iter()
                .sum();
            assert!(
                (sum - 1.0).abs() <= PROB_TOLERANCE,
                "state {} action {} sums to {sum}",
                state.value(),
                action.index()
            );
        }
    }
}

#[test]
fn terminal_states_move_to_absorbing_with_certainty() {
    let table = reference_table();
    let absorbing = table.absorbing_state().value();

    for terminal in [21, 23] {
        assert!(table.is_terminal(StateId::from(terminal)));
        for action in 0..4 {
            assert_eq!(p(&table, terminal, action, absorbing), 1.0);
        }
    }
}

#[test]
fn absorbing_state_loops_on_itself() {
    let table = reference_table();
    let absorbing = table.absorbing_state();

    assert_eq!(absorbing, StateId::from(24));
    assert_eq!(table.reward(absorbing), Some(0.0));
    assert!(!table.is_terminal(absorbing));
    for action in table.actions() {
        assert_eq!(table.probability(absorbing, action, absorbing), Some(1.0));
    }
}

#[test]
fn blocked_outcomes_accumulate_on_the_current_cell() {
    let table = reference_table();

    // (0, 0) heading up: success and veer-left both hit the edge.
    assert!((p(&table, 1, 0, 1) - 0.95).abs() < 1e-12);
    assert!((p(&table, 1, 0, 2) - 0.05).abs() < 1e-12);

    // (1, 2) heading down runs into the obstacle at (2, 2).
    assert!((p(&table, 8, 1, 8) - 0.9).abs() < 1e-12);
    assert!((p(&table, 8, 1, 9) - 0.05).abs() < 1e-12);
    assert!((p(&table, 8, 1, 7) - 0.05).abs() < 1e-12);

    // (4, 3) heading right into the goal; veer-right leaves the grid.
    assert!((p(&table, 22, 3, 23) - 0.8).abs() < 1e-12);
    assert!((p(&table, 22, 3, 22) - 0.15).abs() < 1e-12);
    assert!((p(&table, 22, 3, 17) - 0.05).abs() < 1e-12);
}

#[test]
fn entry_rewards_come_from_the_reward_grid() {
    let table = reference_table();

    assert_eq!(table.reward(StateId::from(23)), Some(10.0));
    assert_eq!(table.reward(StateId::from(21)), Some(-10.0));
    assert_eq!(table.reward(StateId::from(1)), Some(0.0));
    assert_eq!(table.reward(StateId::from(25)), None);
    assert_eq!(table.rewards().len(), 24);
}

#[test]
fn out_of_range_lookups_return_none() {
    let table = reference_table();

    assert!(table.distribution(StateId::from(0), ActionId::from(0)).is_none());
    assert!(table.distribution(StateId::from(25), ActionId::from(0)).is_none());
    assert!(table.distribution(StateId::from(1), ActionId::from(4)).is_none());
    assert!(!table.contains(StateId::from(25)));
    assert!(table.contains(StateId::from(24)));
}

#[test]
fn rebuilding_produces_identical_tables() {
    let spec = reference_spec();
    let (grid, actions) = spec.model().expect("model should build");

    let first = TransitionBuilder::new(&grid, &actions).build();
    let second = TransitionBuilder::new(&grid, &actions).build();

    assert_eq!(first, second);
    assert_eq!(first, reference_table());
}

#[test]
fn cardinal_action_set_matches_reference_outcomes() {
    let spec = reference_spec();
    let grid = GridModel::new(&spec).expect("grid should build");
    let actions = ActionSet::cardinal(0.8, 0.1, 0.05).expect("cardinal set should validate");

    assert_eq!(actions, ActionSet::from_specs(&spec.actions).expect("spec actions"));
    assert_eq!(actions.index_of("left"), Some(ActionId::from(2)));
    assert_eq!(
        TransitionBuilder::new(&grid, &actions).build(),
        reference_table()
    );
}

#[test]
fn probability_sum_must_be_one() {
    let mut spec = reference_spec();
    spec.actions[0].outcomes[0].prob = 0.7;

    let err = spec.build_table().expect_err("build should fail");
    assert!(matches!(err, ConfigError::ProbabilitySum { ref action, .. } if action == "up"));
}

#[test]
fn invalid_outcome_models_are_rejected() {
    let err = ActionSet::new(Vec::new()).expect_err("empty set should fail");
    assert!(matches!(err, ConfigError::NoActions));

    let err = ActionSet::new(vec![ActionModel::new("noop", Vec::new())])
        .expect_err("empty outcomes should fail");
    assert!(matches!(err, ConfigError::EmptyOutcomes { .. }));

    let err = ActionSet::new(vec![ActionModel::new(
        "bad",
        vec![
            Outcome {
                delta: Delta::STAY,
                prob: 1.5,
            },
            Outcome {
                delta: Delta::UP,
                prob: -0.5,
            },
        ],
    )])
    .expect_err("negative probability should fail");
    assert!(matches!(
        err,
        ConfigError::InvalidProbability {
            outcome_index: 1,
            ..
        }
    ));

    let stay = || ActionModel::new("stay", vec![Outcome { delta: Delta::STAY, prob: 1.0 }]);
    let err = ActionSet::new(vec![stay(), stay()]).expect_err("duplicate names should fail");
    assert!(matches!(err, ConfigError::DuplicateAction { .. }));
}
