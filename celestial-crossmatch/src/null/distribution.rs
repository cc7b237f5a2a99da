//! The Monte Carlo reference distribution and its summary statistics.

use crate::error::{CrossMatchError, CrossMatchResult};
use serde::Serialize;

/// Chance-match counts, one per Monte Carlo iteration, in draw order.
///
/// Never empty: construction rejects an empty sample list, so every
/// statistic below is defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NullDistribution {
    samples: Vec<usize>,
}

/// One equal-width histogram bin over the null counts.
///
/// `lower` is inclusive and `upper` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl NullDistribution {
    /// # Errors
    /// [`CrossMatchError::InvalidInput`] if `samples` is empty.
    pub fn from_samples(samples: Vec<usize>) -> CrossMatchResult<Self> {
        if samples.is_empty() {
            return Err(CrossMatchError::invalid_input(
                "null distribution",
                "at least one sample is required",
            ));
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[usize] {
        &self.samples
    }

    pub fn iterations(&self) -> usize {
        self.samples.len()
    }

    pub fn mean(&self) -> f64 {
        let sum: f64 = self.samples.iter().map(|&s| s as f64).sum();
        sum / self.samples.len() as f64
    }

    /// Unbiased (n - 1) sample standard deviation; 0 for a single sample.
    pub fn std_dev(&self) -> f64 {
        let n = self.samples.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let sum_sq: f64 = self
            .samples
            .iter()
            .map(|&s| {
                let d = s as f64 - mean;
                d * d
            })
            .sum();
        (sum_sq / (n - 1) as f64).sqrt()
    }

    /// Number of samples greater than or equal to `observed`.
    pub fn count_at_least(&self, observed: usize) -> usize {
        self.samples.iter().filter(|&&s| s >= observed).count()
    }

    pub fn min(&self) -> usize {
        self.samples.iter().copied().min().unwrap_or(0)
    }

    pub fn max(&self) -> usize {
        self.samples.iter().copied().max().unwrap_or(0)
    }

    /// Equal-width histogram over `[min, max + 1)`.
    ///
    /// Every sample lands in exactly one bin, so the counts sum to
    /// [`iterations`](Self::iterations).
    ///
    /// # Errors
    /// [`CrossMatchError::InvalidInput`] if `bins` is zero.
    pub fn histogram(&self, bins: usize) -> CrossMatchResult<Vec<HistogramBin>> {
        if bins == 0 {
            return Err(CrossMatchError::invalid_input(
                "histogram",
                "bin count must be at least 1",
            ));
        }
        let lo = self.min() as f64;
        let hi = self.max() as f64 + 1.0;
        let width = (hi - lo) / bins as f64;

        let mut out: Vec<HistogramBin> = (0..bins)
            .map(|b| HistogramBin {
                lower: lo + b as f64 * width,
                upper: if b + 1 == bins {
                    hi
                } else {
                    lo + (b + 1) as f64 * width
                },
                count: 0,
            })
            .collect();

        for &s in &self.samples {
            let idx = (((s as f64 - lo) / width) as usize).min(bins - 1);
            out[idx].count += 1;
        }
        Ok(out)
    }
}
