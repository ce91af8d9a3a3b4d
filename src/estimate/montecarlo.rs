//! Monte Carlo moment estimation.
//!
//! Draws `X ~ N(μ, σ²)`, evaluates `f`, and reports the sample mean and the
//! population variance (`ddof = 0`).
//!
//! Sampling is split into fixed-size chunks evaluated in parallel. Each chunk
//! gets its own RNG seeded from `(seed, chunk index)`, and chunk statistics are
//! merged with the pairwise update of Chan et al., so the result depends only
//! on `(samples, seed)` and not on the thread count.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use log::debug;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use rayon::prelude::*;

use crate::domain::{GaussianParameter, MomentResult};
use crate::error::AppError;

/// Draws per parallel work item.
const CHUNK_SIZE: usize = 16_384;

/// Running count / mean / sum of squared deviations.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Accumulator {
    n: usize,
    mean: f64,
    m2: f64,
}

impl Accumulator {
    const EMPTY: Self = Self { n: 0, mean: 0.0, m2: 0.0 };

    fn push(&mut self, value: f64) {
        self.n += 1;
        let delta = value - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (value - self.mean);
    }

    fn merge(self, other: Self) -> Self {
        if self.n == 0 {
            return other;
        }
        if other.n == 0 {
            return self;
        }
        let n = self.n + other.n;
        let delta = other.mean - self.mean;
        let mean = self.mean + delta * other.n as f64 / n as f64;
        let m2 = self.m2 + other.m2 + delta * delta * (self.n as f64 * other.n as f64) / n as f64;
        Self { n, mean, m2 }
    }
}

/// Seeded Monte Carlo estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloEstimator {
    samples: usize,
    seed: u64,
}

impl MonteCarloEstimator {
    pub fn new(samples: usize, seed: u64) -> Result<Self, AppError> {
        if samples == 0 {
            return Err(AppError::configuration("Monte Carlo sample count must be > 0."));
        }
        Ok(Self { samples, seed })
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn estimate(
        &self,
        f: &(dyn Fn(f64) -> f64 + Sync),
        input: &GaussianParameter,
    ) -> Result<MomentResult, AppError> {
        let normal = Normal::new(input.mean(), input.std_dev())
            .map_err(|e| AppError::configuration(format!("Sampling distribution error: {e}")))?;

        let chunks = self.samples.div_ceil(CHUNK_SIZE);
        let partials: Vec<Accumulator> = (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                let start = chunk * CHUNK_SIZE;
                let len = CHUNK_SIZE.min(self.samples - start);
                let mut rng = StdRng::seed_from_u64(chunk_seed(self.seed, chunk));
                let mut acc = Accumulator::EMPTY;
                for _ in 0..len {
                    let x = normal.sample(&mut rng);
                    let fx = f(x);
                    if !fx.is_finite() {
                        return Err(AppError::numerical(format!(
                            "Target function returned a non-finite value ({fx}) at sample x={x}."
                        )));
                    }
                    acc.push(fx);
                }
                Ok(acc)
            })
            .collect::<Result<_, AppError>>()?;

        // Merge in chunk order so the floating-point result is reproducible.
        let total = partials.into_iter().fold(Accumulator::EMPTY, Accumulator::merge);
        debug!(
            "monte carlo: samples={}, chunks={chunks}, seed={}, mean={}, m2={}",
            total.n, self.seed, total.mean, total.m2
        );

        Ok(MomentResult {
            mean: total.mean,
            variance: total.m2 / total.n as f64,
        })
    }
}

fn chunk_seed(seed: u64, chunk: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    chunk.hash(&mut hasher);
    hasher.finish()
}
