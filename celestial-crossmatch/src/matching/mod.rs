//! Positional cross-matching between a primary and a secondary catalog.
//!
//! For every primary point, [`CrossMatcher::run`] finds every secondary
//! point whose exact great-circle separation is within the search radius and
//! emits one [`MatchRecord`] per pair. A primary point may therefore appear
//! in zero, one or many records.
//!
//! Two strategies implement the same contract and return identical record
//! sets in identical order (primary index, then secondary index):
//!
//! | Strategy | Cost | Notes |
//! |----------|------|-------|
//! | [`MatchStrategy::BruteForce`] | O(\|P\| × \|S\|) | reference behaviour |
//! | [`MatchStrategy::Zones`] | O(\|S\| log \|S\| + \|P\| × band) | declination-sorted [`ZoneIndex`] |
//!
//! The radius test is done in arc-minutes, the unit records are reported
//! in, so a record's separation can never exceed the configured radius.

mod record;
mod zones;

pub use record::{MatchRecord, MatchRow, MATCH_COLUMNS};
pub use zones::ZoneIndex;

use crate::catalog::{Catalog, SkyPoint};
use crate::error::{CrossMatchError, CrossMatchResult};
use celestial_core::constants::ARCMIN_PER_DEGREE;
use celestial_core::separation::Origin;
use celestial_core::Angle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candidate-selection strategy for the cross-matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// Test every (primary, secondary) pair.
    #[default]
    BruteForce,
    /// Test only secondary points inside each primary's declination band.
    Zones,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BruteForce => f.write_str("brute-force"),
            Self::Zones => f.write_str("zones"),
        }
    }
}

impl FromStr for MatchStrategy {
    type Err = CrossMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "brute-force" | "bruteforce" | "brute" => Ok(Self::BruteForce),
            "zones" | "zone" => Ok(Self::Zones),
            other => Err(CrossMatchError::invalid_input(
                "match strategy",
                &format!("unknown strategy '{}'", other),
            )),
        }
    }
}

/// Checks a caller-supplied search radius.
///
/// Zero is allowed and matches exact coincidences only. Negative and
/// non-finite radii are rejected.
pub fn validate_radius(radius_arcmin: f64) -> CrossMatchResult<f64> {
    if !radius_arcmin.is_finite() {
        return Err(CrossMatchError::invalid_input(
            "search radius",
            &format!("radius {} arcmin is not finite", radius_arcmin),
        ));
    }
    if radius_arcmin < 0.0 {
        return Err(CrossMatchError::invalid_input(
            "search radius",
            &format!("radius {} arcmin is negative", radius_arcmin),
        ));
    }
    Ok(radius_arcmin)
}

/// A configured cross-match: radius plus strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossMatcher {
    radius_arcmin: f64,
    strategy: MatchStrategy,
}

impl CrossMatcher {
    /// # Errors
    /// [`CrossMatchError::InvalidInput`] for a negative or non-finite radius.
    pub fn new(radius_arcmin: f64) -> CrossMatchResult<Self> {
        Ok(Self {
            radius_arcmin: validate_radius(radius_arcmin)?,
            strategy: MatchStrategy::default(),
        })
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn radius_arcmin(&self) -> f64 {
        self.radius_arcmin
    }

    pub fn radius_deg(&self) -> f64 {
        Angle::from_arcminutes(self.radius_arcmin).degrees()
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Runs the match. Neither catalog is modified.
    pub fn run(&self, primary: &Catalog, secondary: &Catalog) -> Vec<MatchRecord> {
        let (p_points, s_points) = (primary.points(), secondary.points());
        let mut records = Vec::new();
        self.for_each_match(primary, secondary, |i, j, separation_arcmin| {
            records.push(MatchRecord::new(
                i,
                j,
                &p_points[i],
                &s_points[j],
                separation_arcmin,
            ));
        });
        log::debug!(
            "cross-match ({}): {} x {} points, radius {} arcmin -> {} matches",
            self.strategy,
            primary.len(),
            secondary.len(),
            self.radius_arcmin,
            records.len()
        );
        records
    }

    /// Number of matched pairs. Same pair test as [`run`](Self::run), but no
    /// records are built.
    pub fn count(&self, primary: &Catalog, secondary: &Catalog) -> usize {
        let mut count = 0;
        self.for_each_match(primary, secondary, |_, _, _| count += 1);
        count
    }

    /// Calls `on_match(primary_index, secondary_index, separation_arcmin)`
    /// for every pair within the radius, ordered by primary then secondary
    /// index.
    fn for_each_match<F>(&self, primary: &Catalog, secondary: &Catalog, mut on_match: F)
    where
        F: FnMut(usize, usize, f64),
    {
        if primary.is_empty() || secondary.is_empty() {
            return;
        }
        let targets = secondary.points();
        let index = match self.strategy {
            MatchStrategy::BruteForce => None,
            MatchStrategy::Zones => Some(ZoneIndex::build(secondary)),
        };
        let radius_deg = self.radius_deg();

        for (i, p) in primary.iter().enumerate() {
            let origin = Origin::new(p.ra_deg, p.dec_deg);
            let mut test = |j: usize| {
                if let Some(separation_arcmin) = self.separation_within(&origin, &targets[j]) {
                    on_match(i, j, separation_arcmin);
                }
            };
            match &index {
                None => (0..targets.len()).for_each(&mut test),
                Some(index) => index
                    .candidates(p.dec_deg, radius_deg)
                    .into_iter()
                    .for_each(&mut test),
            }
        }
    }

    /// Separation in arc-minutes when `s` lies within the radius of `origin`.
    #[inline]
    fn separation_within(&self, origin: &Origin, s: &SkyPoint) -> Option<f64> {
        let separation_arcmin = origin.separation_deg(s.ra_deg, s.dec_deg) * ARCMIN_PER_DEGREE;
        (separation_arcmin <= self.radius_arcmin).then_some(separation_arcmin)
    }
}

/// Cross-matches two catalogs with the brute-force strategy.
///
/// ```
/// use celestial_crossmatch::{cross_match, Catalog, CatalogRole, SkyPoint};
///
/// let gamma = Catalog::from_points(CatalogRole::Primary, [SkyPoint::new(180.0, 0.0)])?;
/// let stars = Catalog::from_points(CatalogRole::Secondary, [SkyPoint::new(180.01, 0.0)])?;
///
/// let matches = cross_match(&gamma, &stars, 5.0)?;
/// assert_eq!(matches.len(), 1);
/// assert!((matches[0].separation_arcmin() - 0.6).abs() < 1e-6);
/// assert_eq!(matches[0].primary_name(), "Gamma_0");
/// # Ok::<(), celestial_crossmatch::CrossMatchError>(())
/// ```
pub fn cross_match(
    primary: &Catalog,
    secondary: &Catalog,
    radius_arcmin: f64,
) -> CrossMatchResult<Vec<MatchRecord>> {
    Ok(CrossMatcher::new(radius_arcmin)?.run(primary, secondary))
}
