use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{DistributionError, SimError};

/// How far a probability vector may drift from a total of 1.0.
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Pick the index selected by a uniform draw in `[0, 1)` from a probability vector.
///
/// Mass is consumed left to right until the draw is covered. Rounding slack
/// at the end falls on the last entry with positive mass, so an index with
/// zero probability is never returned.
pub fn categorical_index(probabilities: &[f64], sample: f64) -> Result<usize, DistributionError> {
    let sum = checked_total(probabilities)?;
    if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
        return Err(DistributionError::NotNormalized {
            sum,
            tolerance: DISTRIBUTION_TOLERANCE,
        });
    }
    Ok(scan(probabilities, sample))
}

/// Pick the index selected by a uniform draw in `[0, 1)` from unnormalized weights.
pub fn weighted_index(weights: &[f64], sample: f64) -> Result<usize, DistributionError> {
    let sum = checked_total(weights)?;
    if sum <= 0.0 {
        return Err(DistributionError::NoMass { sum });
    }
    Ok(scan(weights, sample * sum))
}

fn checked_total(values: &[f64]) -> Result<f64, DistributionError> {
    if values.is_empty() {
        return Err(DistributionError::Empty);
    }
    let mut sum = 0.0_f64;
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(DistributionError::InvalidEntry { index, value });
        }
        sum += value;
    }
    if !sum.is_finite() {
        return Err(DistributionError::NonFiniteTotal { sum });
    }
    Ok(sum)
}

fn scan(values: &[f64], mut remaining: f64) -> usize {
    let mut last_positive = 0;
    for (index, &value) in values.iter().enumerate() {
        if value <= 0.0 {
            continue;
        }
        if remaining < value {
            return index;
        }
        remaining -= value;
        last_positive = index;
    }
    last_positive
}

#[derive(Debug, Clone)]
/// Random source for one run or one worker.
///
/// Create it once and pass it along; every draw advances the same stream.
pub struct Sampler {
    rng: ChaCha8Rng,
}

impl Sampler {
    /// Create a sampler with a deterministic seed.
    pub fn seeded(seed: u64) -> Self {
        Sampler {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a sampler on its own ChaCha stream, for running workers side by side.
    pub fn seeded_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Sampler { rng }
    }

    /// Create a sampler seeded from the operating system.
    pub fn from_entropy() -> Self {
        Sampler {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Uniform draw in `[0, 1)` with 53 bits of precision.
    pub fn uniform(&mut self) -> f64 {
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw an index from a probability vector that sums to 1.
    pub fn sample_categorical(&mut self, probabilities: &[f64]) -> Result<usize, SimError> {
        let sample = self.uniform();
        Ok(categorical_index(probabilities, sample)?)
    }

    /// Draw an index proportionally to non-negative weights.
    pub fn sample_weighted(&mut self, weights: &[f64]) -> Result<usize, SimError> {
        let sample = self.uniform();
        Ok(weighted_index(weights, sample)?)
    }
}
