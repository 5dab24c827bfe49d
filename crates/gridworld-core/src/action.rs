use std::collections::HashSet;

use crate::{ActionId, ActionSpec, ConfigError, Delta, transition::PROB_TOLERANCE};

#[derive(Debug, Clone, Copy, PartialEq)]
/// A movement effect and the probability that an action produces it.
pub struct Outcome {
    pub delta: Delta,
    pub prob: f64,
}

#[derive(Debug, Clone, PartialEq)]
/// A named action with a validated outcome distribution.
pub struct ActionModel {
    name: String,
    outcomes: Vec<Outcome>,
}

impl ActionModel {
    pub fn new(name: impl Into<String>, outcomes: Vec<Outcome>) -> Self {
        ActionModel {
            name: name.into(),
            outcomes,
        }
    }

    /// Intended move succeeds with `success`, nothing happens with `stay`,
    /// and the agent drifts to either side with `veer` each.
    pub fn heading(
        name: impl Into<String>,
        heading: Delta,
        success: f64,
        stay: f64,
        veer: f64,
    ) -> Self {
        ActionModel::new(
            name,
            vec![
                Outcome {
                    delta: heading,
                    prob: success,
                },
                Outcome {
                    delta: Delta::STAY,
                    prob: stay,
                },
                Outcome {
                    delta: heading.left_of(),
                    prob: veer,
                },
                Outcome {
                    delta: heading.right_of(),
                    prob: veer,
                },
            ],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Ordered, validated set of actions shared by every state.
pub struct ActionSet {
    actions: Vec<ActionModel>,
}

impl ActionSet {
    /// Validate names and outcome distributions. Probabilities must already sum to 1.
    pub fn new(actions: Vec<ActionModel>) -> Result<Self, ConfigError> {
        if actions.is_empty() {
            return Err(ConfigError::NoActions);
        }

        let tolerance = PROB_TOLERANCE;
        let mut names = HashSet::with_capacity(actions.len());
        for action in &actions {
            if !names.insert(action.name.as_str()) {
                return Err(ConfigError::DuplicateAction {
                    action: action.name.clone(),
                });
            }

            if action.outcomes.is_empty() {
                return Err(ConfigError::EmptyOutcomes {
                    action: action.name.clone(),
                });
            }

            let mut sum = 0.0_f64;
            for (i, outcome) in action.outcomes.iter().enumerate() {
                if !outcome.prob.is_finite() || outcome.prob < 0.0 {
                    return Err(ConfigError::InvalidProbability {
                        action: action.name.clone(),
                        outcome_index: i,
                        value: outcome.prob,
                    });
                }
                sum += outcome.prob;
            }

            if (sum - 1.0).abs() > tolerance {
                return Err(ConfigError::ProbabilitySum {
                    action: action.name.clone(),
                    sum,
                    tolerance,
                });
            }
        }

        Ok(ActionSet { actions })
    }

    pub fn from_specs(specs: &[ActionSpec]) -> Result<Self, ConfigError> {
        let actions = specs
            .iter()
            .map(|spec| {
                ActionModel::new(
                    spec.name.clone(),
                    spec.outcomes
                        .iter()
                        .map(|outcome| Outcome {
                            delta: outcome.delta,
                            prob: outcome.prob,
                        })
                        .collect(),
                )
            })
            .collect();
        Self::new(actions)
    }

    /// Up, down, left and right, in that order.
    pub fn cardinal(success: f64, stay: f64, veer: f64) -> Result<Self, ConfigError> {
        Self::new(vec![
            ActionModel::heading("up", Delta::UP, success, stay, veer),
            ActionModel::heading("down", Delta::DOWN, success, stay, veer),
            ActionModel::heading("left", Delta::LEFT, success, stay, veer),
            ActionModel::heading("right", Delta::RIGHT, success, stay, veer),
        ])
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, action: ActionId) -> Option<&ActionModel> {
        self.actions.get(action.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActionId, &ActionModel)> {
        self.actions
            .iter()
            .enumerate()
            .map(|(i, action)| (ActionId::from(i), action))
    }

    pub fn index_of(&self, name: &str) -> Option<ActionId> {
        self.actions
            .iter()
            .position(|action| action.name == name)
            .map(ActionId::from)
    }
}
