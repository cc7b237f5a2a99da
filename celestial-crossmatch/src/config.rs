//! Analysis configuration, loadable from TOML.
//!
//! Every field is optional in the file; missing fields take the defaults
//! below. Unknown keys are rejected so that typos do not silently fall back
//! to a default.
//!
//! ```toml
//! search_radius_arcmin = 10.0
//! monte_carlo_iterations = 5000
//! seed = 42
//! null_metric = "spherical"
//! strategy = "zones"
//! threads = 4
//! histogram_bins = 30
//! ```

use crate::error::{CrossMatchError, CrossMatchResult};
use crate::matching::MatchStrategy;
use crate::null::NullMetric;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters of one cross-match + significance run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    #[serde(default = "default_search_radius_arcmin")]
    pub search_radius_arcmin: f64,
    #[serde(default = "default_monte_carlo_iterations")]
    pub monte_carlo_iterations: usize,
    /// Monte Carlo run seed. `None` draws one from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub null_metric: NullMetric,
    #[serde(default)]
    pub strategy: MatchStrategy,
    /// Worker threads for the Monte Carlo loop; 0 uses every core.
    #[serde(default)]
    pub threads: usize,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

fn default_search_radius_arcmin() -> f64 {
    5.0
}

fn default_monte_carlo_iterations() -> usize {
    10_000
}

fn default_histogram_bins() -> usize {
    50
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            search_radius_arcmin: default_search_radius_arcmin(),
            monte_carlo_iterations: default_monte_carlo_iterations(),
            seed: None,
            null_metric: NullMetric::default(),
            strategy: MatchStrategy::default(),
            threads: 0,
            histogram_bins: default_histogram_bins(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(content: &str) -> CrossMatchResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CrossMatchError::config("toml", &e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML configuration file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> CrossMatchResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| CrossMatchError::io(path, e))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CrossMatchError::config(&path.display().to_string(), &e.to_string()))?;
        config.validate()?;
        log::debug!("loaded analysis configuration from {}", path.display());
        Ok(config)
    }

    /// Checks the ranges that serde cannot express.
    ///
    /// The analysis-level radius must be strictly positive, unlike the bare
    /// matcher which also accepts zero.
    pub fn validate(&self) -> CrossMatchResult<()> {
        if !self.search_radius_arcmin.is_finite() || self.search_radius_arcmin <= 0.0 {
            return Err(CrossMatchError::invalid_input(
                "search_radius_arcmin",
                &format!("must be positive and finite, got {}", self.search_radius_arcmin),
            ));
        }
        if self.monte_carlo_iterations == 0 {
            return Err(CrossMatchError::invalid_input(
                "monte_carlo_iterations",
                "must be at least 1",
            ));
        }
        if self.histogram_bins == 0 {
            return Err(CrossMatchError::invalid_input(
                "histogram_bins",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// The configured seed, or a fresh random one.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
