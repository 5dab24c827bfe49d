use std::fmt;

/// Running statistics over episode returns.
///
/// Uses Welford's update so that per-worker accumulators can be merged
/// without losing precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStats {
    requested: usize,
    count: usize,
    mean: f64,
    m2: f64,
    max: f64,
    min: f64,
}

impl ReturnStats {
    pub fn new(requested: usize) -> Self {
        ReturnStats {
            requested,
            count: 0,
            mean: 0.0,
            m2: 0.0,
            max: f64::NEG_INFINITY,
            min: f64::INFINITY,
        }
    }

    /// Fold one episode return into the statistics.
    pub fn record(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
        self.max = self.max.max(value);
        self.min = self.min.min(value);
    }

    /// Combine two accumulators as if every value had been recorded into one.
    pub fn merge(&mut self, other: &ReturnStats) {
        self.requested += other.requested;
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            let requested = self.requested;
            *self = *other;
            self.requested = requested;
            return;
        }

        let count = self.count + other.count;
        let delta = other.mean - self.mean;
        let weight = other.count as f64 / count as f64;
        self.mean += delta * weight;
        self.m2 += other.m2 + delta * delta * self.count as f64 * weight;
        self.count = count;
        self.max = self.max.max(other.max);
        self.min = self.min.min(other.min);
    }

    /// Episodes the run was asked for.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Episodes actually completed.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether every requested episode finished.
    pub fn is_complete(&self) -> bool {
        self.count >= self.requested
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Population standard deviation (divides by `n`).
    pub fn std_dev(&self) -> Option<f64> {
        (self.count > 0).then(|| (self.m2 / self.count as f64).sqrt())
    }

    /// Standard deviation of the mean estimate.
    pub fn standard_error(&self) -> Option<f64> {
        self.std_dev().map(|sd| sd / (self.count as f64).sqrt())
    }

    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    /// Snapshot for reporting, or `None` if no episode completed.
    pub fn summary(&self) -> Option<ReturnSummary> {
        Some(ReturnSummary {
            episodes: self.count,
            max: self.max()?,
            min: self.min()?,
            mean: self.mean()?,
            std_dev: self.std_dev()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnSummary {
    pub episodes: usize,
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl fmt::Display for ReturnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Max: {:.5}, Min: {:.5}, Mean: {:.5}, Devia: {:.5} ({} episodes)",
            self.max, self.min, self.mean, self.std_dev, self.episodes
        )
    }
}
