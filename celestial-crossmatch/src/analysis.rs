//! End-to-end pipeline: cross-match, null distribution, significance.
//!
//! ```no_run
//! use celestial_crossmatch::{sample_catalogs, Analysis, AnalysisConfig, SAMPLE_SEED};
//!
//! let sample = sample_catalogs(SAMPLE_SEED)?;
//! let config = AnalysisConfig { seed: Some(1), ..AnalysisConfig::default() };
//! let report = Analysis::new(config)?.run(&sample.primary, &sample.secondary)?;
//! println!("{} matches, significance {:.1}", report.match_count(), report.significance.significance);
//! # Ok::<(), celestial_crossmatch::CrossMatchError>(())
//! ```

use crate::catalog::Catalog;
use crate::config::AnalysisConfig;
use crate::error::{CrossMatchError, CrossMatchResult};
use crate::matching::{CrossMatcher, MatchRecord};
use crate::null::{HistogramBin, NullDistribution, NullEstimator};
use crate::significance::{evaluate, SignificanceResult, Verdict};
use serde::Serialize;
use std::sync::atomic::AtomicBool;

/// Everything one analysis run produced.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub config: AnalysisConfig,
    /// Seed the Monte Carlo loop actually used.
    pub seed: u64,
    pub primary_size: usize,
    pub secondary_size: usize,
    pub matches: Vec<MatchRecord>,
    pub null: NullDistribution,
    pub significance: SignificanceResult,
    /// Closed-form mean of the null distribution for the configured metric.
    pub expected_mean: f64,
}

/// Flat, serialisable digest of an [`AnalysisReport`].
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub primary_size: usize,
    pub secondary_size: usize,
    pub search_radius_arcmin: f64,
    pub monte_carlo_iterations: usize,
    pub null_metric: String,
    pub strategy: String,
    pub seed: u64,
    pub match_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_rate: Option<f64>,
    pub p_value: f64,
    pub significance: f64,
    pub max_significance: f64,
    pub null_mean: f64,
    pub null_std_dev: f64,
    pub expected_mean: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    pub verdict: Verdict,
}

impl AnalysisReport {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Matches per primary point. Can exceed 1 when primaries have several
    /// counterparts.
    ///
    /// # Errors
    /// [`CrossMatchError::InvalidInput`] when the primary catalog is empty.
    pub fn match_rate(&self) -> CrossMatchResult<f64> {
        if self.primary_size == 0 {
            return Err(CrossMatchError::invalid_input(
                "match rate",
                "primary catalog is empty",
            ));
        }
        Ok(self.matches.len() as f64 / self.primary_size as f64)
    }

    pub fn verdict(&self) -> Verdict {
        self.significance.verdict()
    }

    /// Null histogram with the configured bin count.
    pub fn histogram(&self) -> CrossMatchResult<Vec<HistogramBin>> {
        self.null.histogram(self.config.histogram_bins)
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            primary_size: self.primary_size,
            secondary_size: self.secondary_size,
            search_radius_arcmin: self.config.search_radius_arcmin,
            monte_carlo_iterations: self.config.monte_carlo_iterations,
            null_metric: self.config.null_metric.to_string(),
            strategy: self.config.strategy.to_string(),
            seed: self.seed,
            match_count: self.match_count(),
            match_rate: self.match_rate().ok(),
            p_value: self.significance.p_value,
            significance: self.significance.significance,
            max_significance: self.significance.max_significance(),
            null_mean: self.significance.mean,
            null_std_dev: self.significance.std_dev,
            expected_mean: self.expected_mean,
            z_score: self.significance.z_score,
            verdict: self.verdict(),
        }
    }
}

/// A validated analysis configuration, ready to run against catalogs.
#[derive(Debug, Clone)]
pub struct Analysis {
    config: AnalysisConfig,
}

impl Analysis {
    pub fn new(config: AnalysisConfig) -> CrossMatchResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn run(&self, primary: &Catalog, secondary: &Catalog) -> CrossMatchResult<AnalysisReport> {
        self.run_with(primary, secondary, &AtomicBool::new(false), |_| {})
    }

    /// [`run`](Self::run) with a cancel flag and a per-iteration progress
    /// callback for the Monte Carlo stage.
    pub fn run_with<F>(
        &self,
        primary: &Catalog,
        secondary: &Catalog,
        cancel: &AtomicBool,
        on_sample: F,
    ) -> CrossMatchResult<AnalysisReport>
    where
        F: Fn(usize) + Sync + Send,
    {
        let config = &self.config;
        let matcher =
            CrossMatcher::new(config.search_radius_arcmin)?.with_strategy(config.strategy);
        let matches = matcher.run(primary, secondary);
        log::info!(
            "cross-match: {} of {} primary x {} secondary within {} arcmin",
            matches.len(),
            primary.len(),
            secondary.len(),
            config.search_radius_arcmin
        );

        let seed = config.resolved_seed();
        let estimator = NullEstimator::new(
            primary.len(),
            secondary.len(),
            config.search_radius_arcmin,
            config.monte_carlo_iterations,
        )?
        .with_metric(config.null_metric)
        .with_seed(seed);

        let null = if config.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .build()?;
            pool.install(|| estimator.estimate_with(cancel, &on_sample))?
        } else {
            estimator.estimate_with(cancel, &on_sample)?
        };
        log::info!(
            "null distribution: {} iterations, mean {:.3} (expected {:.3})",
            null.iterations(),
            null.mean(),
            estimator.expected_mean()
        );

        let significance = evaluate(matches.len(), &null);
        log::info!(
            "significance: p = {:.3e}, -log10 p = {:.2} ({})",
            significance.p_value,
            significance.significance,
            significance.verdict()
        );

        Ok(AnalysisReport {
            config: config.clone(),
            seed,
            primary_size: primary.len(),
            secondary_size: secondary.len(),
            matches,
            null,
            significance,
            expected_mean: estimator.expected_mean(),
        })
    }
}

/// Convenience wrapper around [`Analysis::run`].
pub fn run_analysis(
    config: AnalysisConfig,
    primary: &Catalog,
    secondary: &Catalog,
) -> CrossMatchResult<AnalysisReport> {
    Analysis::new(config)?.run(primary, secondary)
}
