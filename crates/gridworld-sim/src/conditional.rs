use std::fmt;

use gridworld_core::{StateId, TransitionTable};
use serde::{Deserialize, Serialize};

use crate::SimError;

/// "After `step` transitions the agent is in `state`". Step 0 is the start state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    pub step: usize,
    pub state: StateId,
}

impl StepEvent {
    pub fn new(step: usize, state: StateId) -> Self {
        StepEvent { step, state }
    }
}

/// Estimate of `P(target | given)` across episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalQuery {
    pub given: StepEvent,
    pub target: StepEvent,
}

impl ConditionalQuery {
    pub fn new(given: StepEvent, target: StepEvent) -> Result<Self, SimError> {
        let query = ConditionalQuery { given, target };
        query.check_order()?;
        Ok(query)
    }

    /// Both events must name table states and the target must come strictly later.
    pub fn validate(&self, table: &TransitionTable) -> Result<(), SimError> {
        self.check_order()?;
        for event in [self.given, self.target] {
            if !table.contains(event.state) {
                return Err(SimError::UnknownState {
                    state: event.state.value(),
                });
            }
        }
        Ok(())
    }

    fn check_order(&self) -> Result<(), SimError> {
        if self.target.step <= self.given.step {
            return Err(SimError::InvalidQuery {
                given: self.given.step,
                target: self.target.step,
            });
        }
        Ok(())
    }
}

/// Event counts behind a conditional probability estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalEstimate {
    pub episodes: usize,
    /// Episodes in which the conditioning event occurred.
    pub given_count: usize,
    /// Episodes in which both events occurred.
    pub joint_count: usize,
}

impl ConditionalEstimate {
    /// Whether the conditioning event never occurred.
    pub fn is_degenerate(&self) -> bool {
        self.given_count == 0
    }

    /// The estimate, or `None` if it is undefined.
    pub fn value(&self) -> Option<f64> {
        (!self.is_degenerate()).then(|| self.joint_count as f64 / self.given_count as f64)
    }

    pub fn ratio(&self) -> Result<f64, SimError> {
        self.value().ok_or_else(|| SimError::DegenerateStatistic {
            statistic: "conditional probability",
            reason: format!(
                "the conditioning event never occurred in {} episodes",
                self.episodes
            ),
        })
    }
}

impl fmt::Display for ConditionalEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(
                f,
                "{value:.5} ({} of {} conditioned episodes)",
                self.joint_count, self.given_count
            ),
            None => write!(f, "undefined (condition never met in {} episodes)", self.episodes),
        }
    }
}
