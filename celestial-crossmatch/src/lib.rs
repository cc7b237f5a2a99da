//! Positional cross-matching of sky catalogs with Monte Carlo significance.
//!
//! Given a primary catalog (e.g. gamma-ray sources) and a secondary catalog
//! (e.g. stellar sources), this crate finds every pair within a search
//! radius and asks whether that many associations could plausibly arise by
//! chance, by comparing against catalogs of the same sizes scattered
//! uniformly over the sky.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | [`SkyPoint`], [`Catalog`], validation and fallback names |
//! | [`matching`] | [`CrossMatcher`], [`MatchRecord`], brute-force and zone strategies |
//! | [`null`] | [`NullEstimator`], [`NullDistribution`], isotropic sampling |
//! | [`significance`] | p-value, `-log10 p`, z-score, [`Verdict`] |
//! | [`analysis`] | the three stages chained into an [`AnalysisReport`] |
//! | [`config`] | [`AnalysisConfig`], TOML loading |
//! | [`io`] | CSV catalogs and match export |
//! | [`sample`] | synthetic demo catalogs |
//!
//! # Quick Start
//!
//! ```
//! use celestial_crossmatch::{cross_match, estimate_null, evaluate, Catalog, CatalogRole, SkyPoint};
//!
//! let gamma = Catalog::from_points(CatalogRole::Primary, [SkyPoint::new(180.0, 0.0)])?;
//! let stars = Catalog::from_points(CatalogRole::Secondary, [SkyPoint::new(180.01, 0.0)])?;
//!
//! let matches = cross_match(&gamma, &stars, 5.0)?;
//! let null = estimate_null(gamma.len(), stars.len(), 5.0, 1000, 42)?;
//! let result = evaluate(matches.len(), &null);
//! assert!(result.p_value < 0.05);
//! # Ok::<(), celestial_crossmatch::CrossMatchError>(())
//! ```

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod matching;
pub mod null;
pub mod sample;
pub mod significance;

pub use analysis::{run_analysis, Analysis, AnalysisReport, AnalysisSummary};
pub use catalog::{AttributeValue, Attributes, Catalog, CatalogRole, SkyPoint};
pub use config::AnalysisConfig;
pub use error::{CrossMatchError, CrossMatchResult};
pub use io::{read_catalog, read_catalog_csv, write_catalog, write_catalog_csv, write_matches, write_matches_csv};
pub use matching::{cross_match, validate_radius, CrossMatcher, MatchRecord, MatchRow, MatchStrategy, MATCH_COLUMNS};
pub use null::{
    estimate_null, uniform_sky_batch, uniform_sky_position, HistogramBin, NullDistribution, NullEstimator,
    NullMetric,
};
pub use sample::{generate_sample_catalogs, sample_catalogs, uniform_sky_catalog, SampleCatalogs, SAMPLE_SEED};
pub use significance::{evaluate, SignificanceResult, Verdict, STRONG_EVIDENCE_THRESHOLD};
