use std::time::{Duration, Instant};

use gridworld_core::{ActionId, StateId, TransitionTable};
use log::{debug, info, warn};

use crate::{
    ConditionalEstimate, ConditionalQuery, Policy, ReturnStats, Sampler, SimError,
    StartDistribution, termination::check_termination,
};

/// How many episodes to run and, optionally, how long the run may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBudget {
    pub episodes: usize,
    /// Checked between episodes. A run that hits it reports the episodes completed so far.
    pub deadline: Option<Duration>,
}

impl RunBudget {
    pub fn episodes(episodes: usize) -> Self {
        RunBudget {
            episodes,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// One transition of an episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Zero-based step index; the reward is discounted by `gamma^index`.
    pub index: usize,
    pub state: StateId,
    pub action: ActionId,
    pub next_state: StateId,
    pub reward: f64,
}

/// A complete episode from start to absorption.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub start: StateId,
    pub steps: Vec<Step>,
    pub discounted_return: f64,
}

impl Trajectory {
    /// State after `step` transitions, `step = 0` being the start state.
    pub fn state_at(&self, step: usize) -> Option<StateId> {
        match step {
            0 => Some(self.start),
            _ => self.steps.get(step - 1).map(|s| s.next_state),
        }
    }
}

/// Monte Carlo rollouts through a read-only transition table.
#[derive(Debug, Clone)]
pub struct SimulationEngine<'t> {
    table: &'t TransitionTable,
    sampler: Sampler,
    max_steps: Option<usize>,
}

impl<'t> SimulationEngine<'t> {
    pub fn new(table: &'t TransitionTable, sampler: Sampler) -> Self {
        SimulationEngine {
            table,
            sampler,
            max_steps: None,
        }
    }

    /// Fail an episode that has not been absorbed after `max_steps` transitions.
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn table(&self) -> &'t TransitionTable {
        self.table
    }

    /// Validate the policy and start distribution against the table and make
    /// sure every episode ends.
    pub fn preflight(&self, policy: &Policy, start: &StartDistribution) -> Result<(), SimError> {
        policy.validate(self.table)?;
        if start.weights().len() != self.table.live_state_count() {
            return Err(SimError::StartWeightCount {
                expected: self.table.live_state_count(),
                got: start.weights().len(),
            });
        }
        check_termination(self.table, policy, start)?;
        debug!(
            "preflight passed for {} states and {} actions",
            self.table.state_count(),
            self.table.action_count()
        );
        Ok(())
    }

    /// Run one episode and return its discounted return.
    pub fn run_episode(
        &mut self,
        policy: &Policy,
        start: &StartDistribution,
        gamma: f64,
    ) -> Result<f64, SimError> {
        check_gamma(gamma)?;
        self.preflight(policy, start)?;
        let (_, value) = self.walk(policy, start, gamma, |_| {})?;
        Ok(value)
    }

    /// Run one episode and keep every step.
    pub fn run_trajectory(
        &mut self,
        policy: &Policy,
        start: &StartDistribution,
        gamma: f64,
    ) -> Result<Trajectory, SimError> {
        check_gamma(gamma)?;
        self.preflight(policy, start)?;
        let mut steps = Vec::new();
        let (first, discounted_return) =
            self.walk(policy, start, gamma, |step| steps.push(*step))?;
        Ok(Trajectory {
            start: first,
            steps,
            discounted_return,
        })
    }

    /// Run independent episodes and aggregate their returns.
    pub fn run_episodes(
        &mut self,
        budget: &RunBudget,
        policy: &Policy,
        start: &StartDistribution,
        gamma: f64,
    ) -> Result<ReturnStats, SimError> {
        check_gamma(gamma)?;
        self.preflight(policy, start)?;

        let started = Instant::now();
        let mut stats = ReturnStats::new(budget.episodes);
        for _ in 0..budget.episodes {
            if budget.deadline.is_some_and(|limit| started.elapsed() >= limit) {
                warn!(
                    "deadline reached after {} of {} episodes",
                    stats.count(),
                    budget.episodes
                );
                break;
            }
            let (_, value) = self.walk(policy, start, gamma, |_| {})?;
            stats.record(value);
        }

        info!(
            "completed {} of {} episodes in {:?}",
            stats.count(),
            budget.episodes,
            started.elapsed()
        );
        Ok(stats)
    }

    /// Estimate `P(query.target | query.given)` from `episodes` rollouts.
    pub fn estimate_conditional(
        &mut self,
        episodes: usize,
        policy: &Policy,
        start: &StartDistribution,
        query: &ConditionalQuery,
    ) -> Result<ConditionalEstimate, SimError> {
        query.validate(self.table)?;
        self.preflight(policy, start)?;

        let mut estimate = ConditionalEstimate {
            episodes: 0,
            given_count: 0,
            joint_count: 0,
        };
        for _ in 0..episodes {
            let mut given_hit = false;
            let mut target_hit = false;
            let (first, _) = self.walk(policy, start, 1.0, |step| {
                let after = step.index + 1;
                if after == query.given.step && step.next_state == query.given.state {
                    given_hit = true;
                }
                if after == query.target.step && step.next_state == query.target.state {
                    target_hit = true;
                }
            })?;
            if query.given.step == 0 && first == query.given.state {
                given_hit = true;
            }

            estimate.episodes += 1;
            if given_hit {
                estimate.given_count += 1;
                if target_hit {
                    estimate.joint_count += 1;
                }
            }
        }

        if estimate.is_degenerate() {
            warn!(
                "conditioning event (step {}, state {}) never occurred in {} episodes",
                query.given.step,
                query.given.state.value(),
                estimate.episodes
            );
        } else {
            info!("conditional estimate: {estimate}");
        }
        Ok(estimate)
    }

    fn walk<F>(
        &mut self,
        policy: &Policy,
        start: &StartDistribution,
        gamma: f64,
        mut on_step: F,
    ) -> Result<(StateId, f64), SimError>
    where
        F: FnMut(&Step),
    {
        let table = self.table;
        let absorbing = table.absorbing_state();
        let first = start.sample(&mut self.sampler)?;

        let mut state = first;
        let mut index = 0;
        let mut discount = 1.0;
        let mut total_return = 0.0;
        while state != absorbing {
            if let Some(max_steps) = self.max_steps.filter(|&max_steps| index >= max_steps) {
                return Err(SimError::StepLimitExceeded { max_steps });
            }

            let action = policy.choose(state, &mut self.sampler)?;
            let distribution = table
                .distribution(state, action)
                .ok_or(SimError::UnknownState {
                    state: state.value(),
                })?;
            let next_state = StateId::from(self.sampler.sample_categorical(distribution)? + 1);
            let reward = table.reward(next_state).ok_or(SimError::UnknownState {
                state: next_state.value(),
            })?;

            total_return += discount * reward;
            discount *= gamma;
            on_step(&Step {
                index,
                state,
                action,
                next_state,
                reward,
            });

            state = next_state;
            index += 1;
        }

        Ok((first, total_return))
    }
}

fn check_gamma(gamma: f64) -> Result<(), SimError> {
    if !gamma.is_finite() || !(0.0..=1.0).contains(&gamma) {
        return Err(SimError::InvalidConfig(format!(
            "discount factor must be within [0, 1], got {gamma}"
        )));
    }
    Ok(())
}
