//! Empirical significance of an observed match count.
//!
//! Given the observed count `k` and a null distribution of `n` samples:
//!
//! - `p_value = #{samples >= k} / n`
//! - `significance = -log10(max(p_value, 1/n))`, so a p-value of zero is
//!   reported at the resolution limit of the run instead of as infinity
//! - `z_score = (k - mean) / std`, or `None` when the null has no spread

use crate::null::NullDistribution;
use serde::Serialize;
use std::fmt;

/// Significance at or above which the association is called very strong.
pub const STRONG_EVIDENCE_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    VeryStrong,
    WeakOrNone,
}

impl Verdict {
    pub fn from_significance(significance: f64) -> Self {
        if significance >= STRONG_EVIDENCE_THRESHOLD {
            Self::VeryStrong
        } else {
            Self::WeakOrNone
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VeryStrong => f.write_str("very strong evidence of association"),
            Self::WeakOrNone => f.write_str("weak or no evidence of association"),
        }
    }
}

/// Outcome of comparing an observed count against its null distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignificanceResult {
    pub observed: usize,
    pub iterations: usize,
    pub p_value: f64,
    pub significance: f64,
    pub mean: f64,
    pub std_dev: f64,
    /// `None` when the null distribution has zero standard deviation.
    pub z_score: Option<f64>,
}

impl SignificanceResult {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_significance(self.significance)
    }

    /// Largest significance this run could report: `log10(iterations)`.
    pub fn max_significance(&self) -> f64 {
        (self.iterations as f64).log10()
    }
}

/// Scores `observed` against `null`.
pub fn evaluate(observed: usize, null: &NullDistribution) -> SignificanceResult {
    let n = null.iterations() as f64;
    let p_value = null.count_at_least(observed) as f64 / n;
    let floored = p_value.max(1.0 / n);
    // -log10(1) is -0.0; adding +0.0 normalises the sign.
    let significance = -floored.log10() + 0.0;

    let mean = null.mean();
    let std_dev = null.std_dev();
    let z_score = (std_dev > 0.0).then(|| (observed as f64 - mean) / std_dev);

    SignificanceResult {
        observed,
        iterations: null.iterations(),
        p_value,
        significance,
        mean,
        std_dev,
        z_score,
    }
}
