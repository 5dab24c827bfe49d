use proptest::prelude::*;

use crate::{
    ActionId, ActionSpec, Coordinate, Delta, GridModel, GridSpec, OutcomeSpec, PROB_TOLERANCE,
    StateId,
};

fn random_spec(
    rows: usize,
    cols: usize,
    blocked: &[bool],
    outcomes: &[(i32, i32, f64)],
) -> GridSpec {
    let goal = Coordinate::new(rows - 1, cols - 1);
    let obstacles = (0..rows * cols)
        .filter(|&cell| blocked[cell] && cell != rows * cols - 1)
        .map(|cell| Coordinate::new(cell / cols, cell % cols))
        .collect();
    let mut rewards = vec![vec![0.0; cols]; rows];
    rewards[goal.row][goal.col] = 1.0;

    let total: f64 = outcomes.iter().map(|(_, _, w)| w).sum();
    let action = ActionSpec {
        name: "move".to_string(),
        outcomes: outcomes
            .iter()
            .map(|&(row, col, weight)| OutcomeSpec {
                label: None,
                delta: Delta::new(row, col),
                prob: weight / total,
            })
            .collect(),
    };

    GridSpec {
        rows,
        cols,
        obstacles,
        rewards,
        goal,
        negative_terminals: Vec::new(),
        actions: vec![action],
    }
}

proptest! {
    #[test]
    fn random_layouts_keep_rows_normalized(
        rows in 1usize..6,
        cols in 1usize..6,
        blocked in proptest::collection::vec(any::<bool>(), 36),
        outcomes in proptest::collection::vec((-2i32..=2, -2i32..=2, 0.01f64..1.0), 1..6),
    ) {
        let spec = random_spec(rows, cols, &blocked, &outcomes);
        let grid = GridModel::new(&spec).expect("generated grid is valid");
        let table = spec.build_table().expect("generated spec is valid");

        prop_assert_eq!(table.live_state_count(), grid.state_count());

        for state in table.states() {
            let row = table.distribution(state, ActionId::from(0)).expect("row exists");
            let sum: f64 = row.iter().sum();
            prop_assert!((sum - 1.0).abs() <= PROB_TOLERANCE);
            prop_assert!(row.iter().all(|p| *p >= 0.0));
        }
    }

    #[test]
    fn illegal_outcomes_stay_in_place(
        rows in 1usize..6,
        cols in 1usize..6,
        blocked in proptest::collection::vec(any::<bool>(), 36),
        outcomes in proptest::collection::vec((-2i32..=2, -2i32..=2, 0.01f64..1.0), 1..6),
    ) {
        let spec = random_spec(rows, cols, &blocked, &outcomes);
        let grid = GridModel::new(&spec).expect("generated grid is valid");
        let table = spec.build_table().expect("generated spec is valid");
        let total: f64 = outcomes.iter().map(|(_, _, w)| w).sum();

        for state in grid.states().filter(|s| !grid.is_terminal(*s)) {
            let from = grid.coordinate_of(state).expect("live state has a cell");
            let stuck: f64 = outcomes
                .iter()
                .filter(|(row, col, _)| grid.step(from, Delta::new(*row, *col)).is_none())
                .map(|(_, _, w)| w / total)
                .sum();
            let stay = table
                .probability(state, ActionId::from(0), state)
                .expect("entry exists");
            prop_assert!(stay + PROB_TOLERANCE >= stuck);
        }

        let goal = grid.goal_state();
        prop_assert_eq!(
            table.probability(goal, ActionId::from(0), table.absorbing_state()),
            Some(1.0)
        );
        prop_assert_eq!(table.reward(goal), Some(1.0));
        prop_assert_eq!(table.reward(StateId::from(table.state_count())), Some(0.0));
    }
}
