use std::{fs, path::Path, time::Duration};

use gridworld_core::TransitionTable;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    ConditionalEstimate, ConditionalQuery, ParallelRunner, Policy, ReturnStats, RunBudget,
    Sampler, SimError, SimulationEngine, StartDistribution,
};

const DEFAULT_SIMULATION_CONFIG_YAML: &str = include_str!("../config/simulation.default.yaml");
const OPTIMAL_POLICY_CONFIG_YAML: &str = include_str!("../config/optimal_policy.yaml");

/// Simulation settings for aggregate and conditional runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub episodes: usize,
    pub gamma: f64,
    /// Fixed seed for reproducible runs. Drawn from the OS when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub workers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
    /// One weight per live state. Uniform when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_weights: Option<Vec<f64>>,
    pub policy: Policy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<ConditionalQuery>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            episodes: 10_000,
            gamma: 0.9,
            seed: None,
            workers: 1,
            deadline_ms: None,
            max_steps: None,
            start_weights: None,
            policy: Policy::uniform(4),
            query: None,
        }
    }
}

impl SimulationConfig {
    /// Parse a simulation config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SimError> {
        let config: SimulationConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a simulation config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SIMULATION_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SimError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Parse the bundled config that follows the precomputed policy for the reference grid.
    pub fn reference_optimal() -> Result<Self, SimError> {
        Self::from_yaml_str(OPTIMAL_POLICY_CONFIG_YAML)
    }

    fn validate(&self) -> Result<(), SimError> {
        if self.episodes == 0 {
            return Err(SimError::InvalidConfig(
                "episodes must be greater than 0".to_string(),
            ));
        }
        if !self.gamma.is_finite() || !(0.0..=1.0).contains(&self.gamma) {
            return Err(SimError::InvalidConfig(
                "gamma must be finite and within [0, 1]".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(SimError::InvalidConfig(
                "workers must be greater than 0".to_string(),
            ));
        }
        if self.max_steps == Some(0) {
            return Err(SimError::InvalidConfig(
                "max_steps must be greater than 0".to_string(),
            ));
        }
        if let Some(query) = &self.query {
            ConditionalQuery::new(query.given, query.target)?;
        }
        Ok(())
    }

    pub fn budget(&self) -> RunBudget {
        RunBudget {
            episodes: self.episodes,
            deadline: self.deadline_ms.map(Duration::from_millis),
        }
    }

    pub fn start_distribution(
        &self,
        table: &TransitionTable,
    ) -> Result<StartDistribution, SimError> {
        match &self.start_weights {
            Some(weights) => StartDistribution::from_weights(table, weights.clone()),
            None => Ok(StartDistribution::uniform(table)),
        }
    }

    fn resolved_seed(&self) -> u64 {
        let seed = self.seed.unwrap_or_else(rand::random);
        info!("simulation seed: {seed}");
        seed
    }

    /// Build an engine over `table` with this config's seed and step limit.
    pub fn engine<'t>(&self, table: &'t TransitionTable) -> SimulationEngine<'t> {
        SimulationEngine::new(table, Sampler::seeded(self.resolved_seed()))
            .with_max_steps(self.max_steps)
    }

    /// Run the configured number of episodes, in parallel if `workers > 1`.
    pub fn run(&self, table: &TransitionTable) -> Result<ReturnStats, SimError> {
        let start = self.start_distribution(table)?;
        if self.workers > 1 {
            ParallelRunner::new(table, self.workers, self.resolved_seed())
                .with_max_steps(self.max_steps)
                .run_episodes(&self.budget(), &self.policy, &start, self.gamma)
        } else {
            self.engine(table)
                .run_episodes(&self.budget(), &self.policy, &start, self.gamma)
        }
    }

    /// Evaluate the configured conditional query.
    pub fn estimate(&self, table: &TransitionTable) -> Result<ConditionalEstimate, SimError> {
        let query = self.query.ok_or_else(|| {
            SimError::InvalidConfig("no conditional query configured".to_string())
        })?;
        let start = self.start_distribution(table)?;
        self.engine(table)
            .estimate_conditional(self.episodes, &self.policy, &start, &query)
    }
}
