mod conditional;
mod config;
mod engine;
mod error;
mod parallel;
mod policy;
mod sampling;
mod start;
mod stats;
mod termination;

#[cfg(test)]
mod tests;

pub use conditional::{ConditionalEstimate, ConditionalQuery, StepEvent};
pub use config::SimulationConfig;
pub use engine::{RunBudget, SimulationEngine, Step, Trajectory};
pub use error::{DistributionError, SimError};
pub use parallel::ParallelRunner;
pub use policy::Policy;
pub use sampling::{DISTRIBUTION_TOLERANCE, Sampler, categorical_index, weighted_index};
pub use start::StartDistribution;
pub use stats::{ReturnStats, ReturnSummary};
