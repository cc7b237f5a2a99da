//! Monte Carlo null distribution of chance-match counts.
//!
//! Under the null hypothesis the two catalogs are unrelated. Each iteration
//! draws a fresh primary batch and a fresh secondary batch of the observed
//! sizes, uniformly on the sphere, and counts the pairs that fall within the
//! search radius. The counts across iterations form a [`NullDistribution`].
//!
//! # Reproducibility
//!
//! Iteration `i` draws from its own `StdRng` seeded with `seed + i`, so a run
//! is a pure function of its seed. The parallel path, the sequential path
//! and any thread count give the same samples in the same order.
//!
//! # Metric
//!
//! | [`NullMetric`] | Pair test | Expected mean |
//! |----------------|-----------|---------------|
//! | `Planar` (default) | Euclidean distance in (RA, Dec) degrees, no RA wrap | n1·n2·π³r²/518400 |
//! | `Spherical` | exact great-circle separation | n1·n2·(1 − cos r)/2 |
//!
//! `Planar` keeps counts comparable with reports produced by earlier tooling
//! built on the flat metric. `Spherical` is consistent with the observed
//! cross-match and should be preferred for new analyses.

mod distribution;
mod sky;

pub use distribution::{HistogramBin, NullDistribution};
pub use sky::{uniform_sky_batch, uniform_sky_position};

use crate::error::{CrossMatchError, CrossMatchResult};
use crate::matching::validate_radius;
use celestial_core::constants::{ARCMIN_PER_DEGREE, PI};
use celestial_core::math::planar_distance_deg;
use celestial_core::separation::Origin;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Pair test used when counting chance matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullMetric {
    #[default]
    Planar,
    Spherical,
}

impl NullMetric {
    /// Closed-form mean chance-match count for `n_primary × n_secondary`
    /// isotropic points at the given radius (small-radius approximation for
    /// `Planar`).
    pub fn expected_mean(self, n_primary: usize, n_secondary: usize, radius_arcmin: f64) -> f64 {
        let pairs = n_primary as f64 * n_secondary as f64;
        let r_deg = radius_arcmin / ARCMIN_PER_DEGREE;
        match self {
            Self::Planar => pairs * PI.powi(3) * r_deg * r_deg / 518_400.0,
            Self::Spherical => pairs * (1.0 - r_deg.to_radians().cos()) / 2.0,
        }
    }

    #[inline]
    fn count_pairs(self, primary: &[(f64, f64)], secondary: &[(f64, f64)], radius_arcmin: f64) -> usize {
        match self {
            Self::Planar => primary
                .iter()
                .map(|&(ra1, dec1)| {
                    secondary
                        .iter()
                        .filter(|&&(ra2, dec2)| {
                            planar_distance_deg(ra1, dec1, ra2, dec2) * ARCMIN_PER_DEGREE
                                <= radius_arcmin
                        })
                        .count()
                })
                .sum(),
            Self::Spherical => primary
                .iter()
                .map(|&(ra1, dec1)| {
                    let origin = Origin::new(ra1, dec1);
                    secondary
                        .iter()
                        .filter(|&&(ra2, dec2)| {
                            origin.separation_deg(ra2, dec2) * ARCMIN_PER_DEGREE <= radius_arcmin
                        })
                        .count()
                })
                .sum(),
        }
    }
}

impl fmt::Display for NullMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planar => f.write_str("planar"),
            Self::Spherical => f.write_str("spherical"),
        }
    }
}

impl FromStr for NullMetric {
    type Err = CrossMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "planar" | "flat" => Ok(Self::Planar),
            "spherical" | "sphere" | "great-circle" => Ok(Self::Spherical),
            other => Err(CrossMatchError::invalid_input(
                "null metric",
                &format!("unknown metric '{}'", other),
            )),
        }
    }
}

/// Configured Monte Carlo run.
#[derive(Debug, Clone, PartialEq)]
pub struct NullEstimator {
    n_primary: usize,
    n_secondary: usize,
    radius_arcmin: f64,
    iterations: usize,
    metric: NullMetric,
    seed: u64,
}

impl NullEstimator {
    /// Creates an estimator with the default metric and a fresh random seed.
    ///
    /// # Errors
    /// [`CrossMatchError::InvalidInput`] for zero iterations or a negative or
    /// non-finite radius.
    pub fn new(
        n_primary: usize,
        n_secondary: usize,
        radius_arcmin: f64,
        iterations: usize,
    ) -> CrossMatchResult<Self> {
        let radius_arcmin = validate_radius(radius_arcmin)?;
        if iterations == 0 {
            return Err(CrossMatchError::invalid_input(
                "null estimator",
                "iteration count must be at least 1",
            ));
        }
        Ok(Self {
            n_primary,
            n_secondary,
            radius_arcmin,
            iterations,
            metric: NullMetric::default(),
            seed: rand::random(),
        })
    }

    pub fn with_metric(mut self, metric: NullMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn metric(&self) -> NullMetric {
        self.metric
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn expected_mean(&self) -> f64 {
        self.metric
            .expected_mean(self.n_primary, self.n_secondary, self.radius_arcmin)
    }

    /// One iteration: two independent isotropic batches and their pair count.
    pub fn sample(&self, iteration: usize) -> usize {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(iteration as u64));
        let primary = uniform_sky_batch(&mut rng, self.n_primary);
        let secondary = uniform_sky_batch(&mut rng, self.n_secondary);
        self.metric
            .count_pairs(&primary, &secondary, self.radius_arcmin)
    }

    /// Runs every iteration on the current rayon pool.
    pub fn estimate(&self) -> CrossMatchResult<NullDistribution> {
        self.estimate_with(&AtomicBool::new(false), |_| {})
    }

    /// Runs every iteration on the calling thread.
    pub fn estimate_sequential(&self) -> CrossMatchResult<NullDistribution> {
        let samples = (0..self.iterations).map(|i| self.sample(i)).collect();
        NullDistribution::from_samples(samples)
    }

    /// Parallel run with cooperative cancellation and progress reporting.
    ///
    /// `on_sample` is called once per finished iteration, from whichever
    /// worker ran it. Setting `cancel` stops the run before the next
    /// iteration starts and yields [`CrossMatchError::Cancelled`].
    pub fn estimate_with<F>(&self, cancel: &AtomicBool, on_sample: F) -> CrossMatchResult<NullDistribution>
    where
        F: Fn(usize) + Sync,
    {
        log::debug!(
            "null estimate: {} x {} points, radius {} arcmin, {} iterations, {} metric, seed {}",
            self.n_primary,
            self.n_secondary,
            self.radius_arcmin,
            self.iterations,
            self.metric,
            self.seed
        );
        let completed = AtomicUsize::new(0);
        let samples: Option<Vec<usize>> = (0..self.iterations)
            .into_par_iter()
            .map(|i| {
                if cancel.load(Ordering::Relaxed) {
                    return None;
                }
                let count = self.sample(i);
                completed.fetch_add(1, Ordering::Relaxed);
                on_sample(i);
                Some(count)
            })
            .collect();

        match samples {
            Some(samples) => NullDistribution::from_samples(samples),
            None => {
                let completed = completed.load(Ordering::Relaxed);
                log::warn!(
                    "null estimate cancelled after {} of {} iterations",
                    completed,
                    self.iterations
                );
                Err(CrossMatchError::Cancelled {
                    completed,
                    requested: self.iterations,
                })
            }
        }
    }
}

/// Builds the null distribution for the given catalog sizes and seed using
/// the default metric.
pub fn estimate_null(
    n_primary: usize,
    n_secondary: usize,
    radius_arcmin: f64,
    iterations: usize,
    seed: u64,
) -> CrossMatchResult<NullDistribution> {
    NullEstimator::new(n_primary, n_secondary, radius_arcmin, iterations)?
        .with_seed(seed)
        .estimate()
}
