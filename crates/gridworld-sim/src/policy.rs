use gridworld_core::{ActionId, StateId, TransitionTable};
use serde::{Deserialize, Serialize};

use crate::{Sampler, SimError, sampling::weighted_index};

/// How the agent picks an action in each state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Policy {
    /// Same action weights in every state.
    Stochastic { action_probabilities: Vec<f64> },
    /// One fixed action per live state; entry `i` belongs to state `i + 1`.
    Deterministic { actions: Vec<ActionId> },
}

impl Policy {
    /// Every action equally likely.
    pub fn uniform(action_count: usize) -> Self {
        Policy::Stochastic {
            action_probabilities: vec![1.0 / action_count as f64; action_count],
        }
    }

    pub fn deterministic(actions: impl IntoIterator<Item = usize>) -> Self {
        Policy::Deterministic {
            actions: actions.into_iter().map(ActionId::from).collect(),
        }
    }

    /// Check that the policy fits the table's action and state counts.
    pub fn validate(&self, table: &TransitionTable) -> Result<(), SimError> {
        match self {
            Policy::Stochastic {
                action_probabilities,
            } => {
                if action_probabilities.len() != table.action_count() {
                    return Err(SimError::PolicyActionCount {
                        expected: table.action_count(),
                        got: action_probabilities.len(),
                    });
                }
                weighted_index(action_probabilities, 0.0)?;
            }
            Policy::Deterministic { actions } => {
                if actions.len() != table.live_state_count() {
                    return Err(SimError::PolicyStateCount {
                        expected: table.live_state_count(),
                        got: actions.len(),
                    });
                }
                if let Some((slot, action)) = actions
                    .iter()
                    .enumerate()
                    .find(|(_, action)| action.index() >= table.action_count())
                {
                    return Err(SimError::PolicyUnknownAction {
                        state: slot + 1,
                        action: action.index(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Choose the action to take in `state`.
    pub fn choose(&self, state: StateId, sampler: &mut Sampler) -> Result<ActionId, SimError> {
        match self {
            Policy::Stochastic {
                action_probabilities,
            } => Ok(ActionId::from(
                sampler.sample_weighted(action_probabilities)?,
            )),
            Policy::Deterministic { actions } => state
                .value()
                .checked_sub(1)
                .and_then(|slot| actions.get(slot))
                .copied()
                .ok_or(SimError::UnknownState {
                    state: state.value(),
                }),
        }
    }

    /// Actions this policy takes in `state` with positive probability.
    pub fn support(&self, state: StateId) -> Vec<ActionId> {
        match self {
            Policy::Stochastic {
                action_probabilities,
            } => action_probabilities
                .iter()
                .enumerate()
                .filter(|(_, p)| **p > 0.0)
                .map(|(i, _)| ActionId::from(i))
                .collect(),
            Policy::Deterministic { actions } => state
                .value()
                .checked_sub(1)
                .and_then(|slot| actions.get(slot))
                .copied()
                .into_iter()
                .collect(),
        }
    }
}
