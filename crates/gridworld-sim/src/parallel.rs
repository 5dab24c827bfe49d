use std::thread;

use gridworld_core::TransitionTable;
use log::info;

use crate::{Policy, ReturnStats, RunBudget, Sampler, SimError, SimulationEngine, StartDistribution};

/// Aggregate-mode runs split across scoped worker threads.
///
/// Every worker owns a sampler on its own ChaCha stream of `seed`, so a
/// given `(seed, workers)` pair always produces the same statistics.
#[derive(Debug, Clone, Copy)]
pub struct ParallelRunner<'t> {
    table: &'t TransitionTable,
    workers: usize,
    seed: u64,
    max_steps: Option<usize>,
}

impl<'t> ParallelRunner<'t> {
    pub fn new(table: &'t TransitionTable, workers: usize, seed: u64) -> Self {
        ParallelRunner {
            table,
            workers: workers.max(1),
            seed,
            max_steps: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Split `budget.episodes` over the workers and merge their statistics.
    pub fn run_episodes(
        &self,
        budget: &RunBudget,
        policy: &Policy,
        start: &StartDistribution,
        gamma: f64,
    ) -> Result<ReturnStats, SimError> {
        SimulationEngine::new(self.table, Sampler::seeded(self.seed)).preflight(policy, start)?;

        let base = budget.episodes / self.workers;
        let extra = budget.episodes % self.workers;

        let results: Vec<Result<ReturnStats, SimError>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..self.workers)
                .map(|worker| {
                    let share = RunBudget {
                        episodes: base + usize::from(worker < extra),
                        deadline: budget.deadline,
                    };
                    let sampler = Sampler::seeded_stream(self.seed, worker as u64);
                    let mut engine =
                        SimulationEngine::new(self.table, sampler).with_max_steps(self.max_steps);
                    scope.spawn(move || engine.run_episodes(&share, policy, start, gamma))
                })
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(worker, handle)| {
                    handle
                        .join()
                        .unwrap_or(Err(SimError::WorkerPanicked { worker }))
                })
                .collect()
        });

        let mut merged = ReturnStats::new(0);
        for result in results {
            merged.merge(&result?);
        }

        info!(
            "{} workers completed {} of {} episodes",
            self.workers,
            merged.count(),
            merged.requested()
        );
        Ok(merged)
    }
}
