use gridworld_core::{StateId, TransitionTable};

use crate::{Sampler, SimError, sampling::weighted_index};

#[derive(Debug, Clone, PartialEq)]
/// Unnormalized weights over the live states an episode may start in.
pub struct StartDistribution {
    weights: Vec<f64>,
}

impl StartDistribution {
    /// Equal weight on every live state, terminals included.
    pub fn uniform(table: &TransitionTable) -> Self {
        StartDistribution {
            weights: vec![1.0; table.live_state_count()],
        }
    }

    /// Entry `i` weighs state `i + 1`.
    pub fn from_weights(table: &TransitionTable, weights: Vec<f64>) -> Result<Self, SimError> {
        if weights.len() != table.live_state_count() {
            return Err(SimError::StartWeightCount {
                expected: table.live_state_count(),
                got: weights.len(),
            });
        }
        weighted_index(&weights, 0.0)?;
        Ok(StartDistribution { weights })
    }

    /// Always start in `state`.
    pub fn fixed(table: &TransitionTable, state: StateId) -> Result<Self, SimError> {
        let slot = state
            .value()
            .checked_sub(1)
            .filter(|&slot| slot < table.live_state_count())
            .ok_or(SimError::UnknownState {
                state: state.value(),
            })?;
        let mut weights = vec![0.0; table.live_state_count()];
        weights[slot] = 1.0;
        Ok(StartDistribution { weights })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// States with positive start weight.
    pub fn support(&self) -> impl Iterator<Item = StateId> + '_ {
        self.weights
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > 0.0)
            .map(|(i, _)| StateId::from(i + 1))
    }

    pub fn sample(&self, sampler: &mut Sampler) -> Result<StateId, SimError> {
        Ok(StateId::from(sampler.sample_weighted(&self.weights)? + 1))
    }
}
