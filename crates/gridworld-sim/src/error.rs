use gridworld_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
/// Why a probability or weight vector cannot be sampled from.
pub enum DistributionError {
    #[error("distribution is empty")]
    Empty,

    #[error("entry {index} is negative or not finite: {value}")]
    InvalidEntry { index: usize, value: f64 },

    #[error("probabilities must sum to 1.0 within {tolerance}, got {sum}")]
    NotNormalized { sum: f64, tolerance: f64 },

    #[error("weights must have a positive total, got {sum}")]
    NoMass { sum: f64 },

    #[error("entries are finite but their total is not: {sum}")]
    NonFiniteTotal { sum: f64 },
}

#[derive(Debug, Error)]
/// Error type for sampling, policy validation and episode simulation.
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read simulation config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse simulation config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("invalid distribution: {0}")]
    InvalidDistribution(#[from] DistributionError),

    #[error("stochastic policy has {got} action probabilities but the table has {expected} actions")]
    PolicyActionCount { expected: usize, got: usize },

    #[error("deterministic policy covers {got} states but the table has {expected} live states")]
    PolicyStateCount { expected: usize, got: usize },

    #[error("policy selects unknown action {action} in state {state}")]
    PolicyUnknownAction { state: usize, action: usize },

    #[error("start distribution has {got} weights but the table has {expected} live states")]
    StartWeightCount { expected: usize, got: usize },

    #[error("state {state} is not part of the transition table")]
    UnknownState { state: usize },

    #[error("state {state} cannot reach the absorbing state under this policy")]
    NonTerminating { state: usize },

    #[error("episode was not absorbed within {max_steps} steps")]
    StepLimitExceeded { max_steps: usize },

    #[error("target step {target} must come after the conditioning step {given}")]
    InvalidQuery { given: usize, target: usize },

    #[error("{statistic} is undefined: {reason}")]
    DegenerateStatistic {
        statistic: &'static str,
        reason: String,
    },

    #[error("simulation worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}
