use log::debug;

use crate::{ActionId, ActionSet, GridModel, StateId};

/// Floating point tolerance used when validating probability sums.
pub const PROB_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
/// Dense `(state, action) -> next state` probability table with entry rewards.
///
/// States are numbered `1..=state_count()`, the last one being the absorbing
/// state. The table is never mutated after [`TransitionBuilder::build`].
pub struct TransitionTable {
    state_count: usize,
    action_names: Vec<String>,
    probabilities: Vec<f64>,
    rewards: Vec<f64>,
    terminal: Vec<bool>,
}

impl TransitionTable {
    /// Total number of states, including the absorbing state.
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Number of states that map to grid cells.
    pub fn live_state_count(&self) -> usize {
        self.state_count - 1
    }

    pub fn action_count(&self) -> usize {
        self.action_names.len()
    }

    pub fn absorbing_state(&self) -> StateId {
        StateId::from(self.state_count)
    }

    pub fn contains(&self, state: StateId) -> bool {
        state.slot().is_some_and(|slot| slot < self.state_count)
    }

    /// Iterate over every state, absorbing last.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        (1..=self.state_count).map(StateId::from)
    }

    pub fn actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        (0..self.action_names.len()).map(ActionId::from)
    }

    pub fn action_name(&self, action: ActionId) -> Option<&str> {
        self.action_names.get(action.index()).map(String::as_str)
    }

    /// Whether a state is the goal or a negative terminal.
    pub fn is_terminal(&self, state: StateId) -> bool {
        state
            .slot()
            .and_then(|slot| self.terminal.get(slot))
            .copied()
            .unwrap_or(false)
    }

    /// Reward collected on entering `state`. Zero for the absorbing state.
    pub fn reward(&self, state: StateId) -> Option<f64> {
        self.rewards.get(state.slot()?).copied()
    }

    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Next-state distribution for `(state, action)`. Entry `i` is the
    /// probability of landing in state `i + 1`.
    pub fn distribution(&self, state: StateId, action: ActionId) -> Option<&[f64]> {
        let row = self.row(state, action)?;
        Some(&self.probabilities[row * self.state_count..(row + 1) * self.state_count])
    }

    pub fn probability(&self, state: StateId, action: ActionId, next: StateId) -> Option<f64> {
        self.distribution(state, action)?
            .get(next.slot()?)
            .copied()
    }

    fn row(&self, state: StateId, action: ActionId) -> Option<usize> {
        let slot = state.slot()?;
        if slot >= self.state_count || action.index() >= self.action_names.len() {
            return None;
        }
        Some(slot * self.action_names.len() + action.index())
    }
}

#[derive(Debug, Clone, Copy)]
/// Derives a [`TransitionTable`] from a grid model and an outcome model.
pub struct TransitionBuilder<'a> {
    grid: &'a GridModel,
    actions: &'a ActionSet,
}

impl<'a> TransitionBuilder<'a> {
    pub fn new(grid: &'a GridModel, actions: &'a ActionSet) -> Self {
        TransitionBuilder { grid, actions }
    }

    /// Build a fresh table.
    ///
    /// Outcomes that would leave the grid or enter an obstacle keep the agent
    /// in place. Several outcomes landing on the same cell add up. Terminal
    /// states move to the absorbing state with certainty, and the absorbing
    /// state loops on itself.
    pub fn build(&self) -> TransitionTable {
        let live = self.grid.state_count();
        let state_count = live + 1;
        let action_count = self.actions.len();
        let absorbing_slot = live;

        let mut probabilities = vec![0.0_f64; state_count * action_count * state_count];
        let mut terminal = vec![false; state_count];

        for state in self.grid.states() {
            let slot = state.value() - 1;
            let is_terminal = self.grid.is_terminal(state);
            terminal[slot] = is_terminal;

            for (action, model) in self.actions.iter() {
                let start = (slot * action_count + action.index()) * state_count;
                let row = &mut probabilities[start..start + state_count];

                if is_terminal {
                    row[absorbing_slot] = 1.0;
                    continue;
                }

                let Some(from) = self.grid.coordinate_of(state) else {
                    continue;
                };
                for outcome in model.outcomes() {
                    let to = self.grid.step(from, outcome.delta).unwrap_or(from);
                    let Some(next) = self.grid.state_of(to) else {
                        continue;
                    };
                    row[next.value() - 1] += outcome.prob;
                }
            }
        }

        for action in 0..action_count {
            let row = (absorbing_slot * action_count + action) * state_count;
            probabilities[row + absorbing_slot] = 1.0;
        }

        let mut rewards: Vec<f64> = self
            .grid
            .states()
            .map(|state| self.grid.state_reward(state))
            .collect();
        rewards.push(0.0);

        debug!(
            "built transition table: {} states ({} live), {} actions, {} terminal",
            state_count,
            live,
            action_count,
            terminal.iter().filter(|t| **t).count()
        );

        TransitionTable {
            state_count,
            action_names: self
                .actions
                .iter()
                .map(|(_, model)| model.name().to_string())
                .collect(),
            probabilities,
            rewards,
            terminal,
        }
    }
}
