//! Synthetic demo catalogs.
//!
//! [`generate_sample_catalogs`] builds a Fermi-LAT-like primary catalog of
//! 50 gamma-ray sources and a stellar secondary catalog of 200 sources, with
//! ten secondary sources planted next to random primaries so that a
//! cross-match has something real to find.

use crate::catalog::{AttributeValue, Catalog, CatalogRole, SkyPoint};
use crate::error::{CrossMatchError, CrossMatchResult};
use crate::null::uniform_sky_batch;
use rand::distributions::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal, Normal};

/// Seed used by the demo data when none is given.
pub const SAMPLE_SEED: u64 = 42;

pub const SAMPLE_PRIMARY_COUNT: usize = 50;
pub const SAMPLE_SECONDARY_COUNT: usize = 200;
pub const SAMPLE_PLANTED_COUNT: usize = 10;

/// Declination limit of the demo catalogs, in degrees.
const SAMPLE_DEC_LIMIT: f64 = 30.0;

/// Positional scatter of planted counterparts, in degrees.
const PLANTED_SCATTER_DEG: f64 = 0.1;

const SOURCE_TYPES: [&str; 3] = ["Star Cluster", "HII Region", "Star"];
const SOURCE_TYPE_WEIGHTS: [f64; 3] = [0.3, 0.3, 0.4];

/// Demo catalogs plus the planted associations.
#[derive(Debug, Clone)]
pub struct SampleCatalogs {
    pub primary: Catalog,
    pub secondary: Catalog,
    /// `(secondary_index, primary_index)` in planting order. A secondary
    /// index drawn twice keeps only its last placement.
    pub planted: Vec<(usize, usize)>,
}

fn distribution_error(what: &str, err: impl std::fmt::Display) -> CrossMatchError {
    CrossMatchError::invalid_input("sample catalogs", &format!("{}: {}", what, err))
}

/// Generates the demo catalogs from `rng`.
pub fn generate_sample_catalogs<R: Rng + ?Sized>(rng: &mut R) -> CrossMatchResult<SampleCatalogs> {
    let flux = LogNormal::new(0.0, 1.0).map_err(|e| distribution_error("flux", e))?;
    let magnitude = Normal::new(12.0, 3.0).map_err(|e| distribution_error("magnitude", e))?;
    let scatter =
        Normal::new(0.0, PLANTED_SCATTER_DEG).map_err(|e| distribution_error("scatter", e))?;
    let source_type =
        WeightedIndex::new(SOURCE_TYPE_WEIGHTS).map_err(|e| distribution_error("source_type", e))?;

    let gamma: Vec<SkyPoint> = (0..SAMPLE_PRIMARY_COUNT)
        .map(|i| {
            SkyPoint::new(
                rng.gen_range(0.0..360.0),
                rng.gen_range(-SAMPLE_DEC_LIMIT..SAMPLE_DEC_LIMIT),
            )
            .with_name(format!("4FGL_J{:04}", i))
            .with_attribute("flux", flux.sample(rng))
            .with_attribute("significance", rng.gen_range(5.0..20.0))
        })
        .collect();

    let mut stars: Vec<SkyPoint> = (0..SAMPLE_SECONDARY_COUNT)
        .map(|i| {
            SkyPoint::new(
                rng.gen_range(0.0..360.0),
                rng.gen_range(-SAMPLE_DEC_LIMIT..SAMPLE_DEC_LIMIT),
            )
            .with_name(format!("Star_{:04}", i))
            .with_attribute("magnitude", magnitude.sample(rng))
            .with_attribute("source_type", SOURCE_TYPES[source_type.sample(rng)])
        })
        .collect();

    let mut planted = Vec::with_capacity(SAMPLE_PLANTED_COUNT);
    for _ in 0..SAMPLE_PLANTED_COUNT {
        let si = rng.gen_range(0..SAMPLE_SECONDARY_COUNT);
        let pi = rng.gen_range(0..SAMPLE_PRIMARY_COUNT);
        let star = &mut stars[si];
        // RA is wrapped back into range on insertion.
        star.ra_deg = gamma[pi].ra_deg + scatter.sample(rng);
        star.dec_deg = gamma[pi].dec_deg + scatter.sample(rng);
        star.attributes.insert(
            "source_type".to_string(),
            AttributeValue::from("Star Cluster"),
        );
        planted.push((si, pi));
    }

    let primary = Catalog::from_points(CatalogRole::Primary, gamma)?;
    let secondary = Catalog::from_points(CatalogRole::Secondary, stars)?;
    log::debug!(
        "generated sample catalogs: {} primary, {} secondary, {} planted",
        primary.len(),
        secondary.len(),
        planted.len()
    );
    Ok(SampleCatalogs {
        primary,
        secondary,
        planted,
    })
}

/// Demo catalogs from a fixed seed.
pub fn sample_catalogs(seed: u64) -> CrossMatchResult<SampleCatalogs> {
    generate_sample_catalogs(&mut StdRng::seed_from_u64(seed))
}

/// A catalog of `n` unnamed isotropic points.
pub fn uniform_sky_catalog<R: Rng + ?Sized>(
    rng: &mut R,
    role: CatalogRole,
    n: usize,
) -> CrossMatchResult<Catalog> {
    Catalog::from_points(
        role,
        uniform_sky_batch(rng, n)
            .into_iter()
            .map(|(ra, dec)| SkyPoint::new(ra, dec)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_and_names() {
        let sample = sample_catalogs(SAMPLE_SEED).unwrap();
        assert_eq!(sample.primary.len(), 50);
        assert_eq!(sample.secondary.len(), 200);
        assert_eq!(sample.planted.len(), 10);
        assert_eq!(sample.primary.name(0), "4FGL_J0000");
        assert_eq!(sample.primary.name(49), "4FGL_J0049");
        assert_eq!(sample.secondary.name(7), "Star_0007");
    }

    #[test]
    fn test_attributes_present() {
        let sample = sample_catalogs(1).unwrap();
        for p in sample.primary.iter() {
            assert!(p.attribute("flux").and_then(AttributeValue::as_number).unwrap() > 0.0);
            let sig = p.attribute("significance").and_then(AttributeValue::as_number).unwrap();
            assert!((5.0..20.0).contains(&sig));
        }
        for s in sample.secondary.iter() {
            let kind = s.attribute("source_type").and_then(AttributeValue::as_text).unwrap();
            assert!(SOURCE_TYPES.contains(&kind));
            assert!(s.attribute("magnitude").is_some());
        }
    }

    #[test]
    fn test_planted_points_sit_near_their_primary() {
        let sample = sample_catalogs(SAMPLE_SEED).unwrap();
        // Later plantings win when a secondary index repeats.
        let mut last = std::collections::BTreeMap::new();
        for &(si, pi) in &sample.planted {
            last.insert(si, pi);
        }
        for (&si, &pi) in &last {
            let star = &sample.secondary.points()[si];
            let gamma = &sample.primary.points()[pi];
            assert!(star.separation_deg(gamma) < 1.0);
            assert_eq!(
                star.attribute("source_type").and_then(AttributeValue::as_text),
                Some("Star Cluster")
            );
        }
    }

    #[test]
    fn test_same_seed_same_catalogs() {
        let a = sample_catalogs(9).unwrap();
        let b = sample_catalogs(9).unwrap();
        assert_eq!(a.primary, b.primary);
        assert_eq!(a.secondary, b.secondary);
        assert_eq!(a.planted, b.planted);
    }

    #[test]
    fn test_uniform_sky_catalog() {
        let mut rng = StdRng::seed_from_u64(3);
        let cat = uniform_sky_catalog(&mut rng, CatalogRole::Secondary, 25).unwrap();
        assert_eq!(cat.len(), 25);
        assert_eq!(cat.name(24), "Source_24");
    }
}
