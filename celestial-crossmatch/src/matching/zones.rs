//! Declination-ordered index over the secondary catalog.
//!
//! Any point within angular distance `r` of a position at declination `δ`
//! has a declination in `[δ - r, δ + r]`, whatever its RA. Sorting the
//! secondary catalog by declination once lets each primary point test only
//! that band instead of the whole catalog. Candidates still go through the
//! exact separation test, so the index prunes work without changing which
//! pairs match.

use crate::catalog::Catalog;

/// Padding added to each band edge, in degrees.
///
/// The computed separation can undershoot `|Δδ|` by a few ulps; the pad keeps
/// such borderline pairs inside the candidate band.
const BAND_PAD_DEG: f64 = 1e-9;

/// Secondary-catalog indices sorted by declination.
pub struct ZoneIndex {
    order: Vec<usize>,
    decs: Vec<f64>,
}

impl ZoneIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut order: Vec<usize> = (0..catalog.len()).collect();
        let points = catalog.points();
        order.sort_by(|&a, &b| points[a].dec_deg.total_cmp(&points[b].dec_deg));
        let decs = order.iter().map(|&i| points[i].dec_deg).collect();
        Self { order, decs }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Catalog indices whose declination lies within `radius_deg` of
    /// `dec_deg`, in ascending catalog order.
    pub fn candidates(&self, dec_deg: f64, radius_deg: f64) -> Vec<usize> {
        let lo = dec_deg - radius_deg - BAND_PAD_DEG;
        let hi = dec_deg + radius_deg + BAND_PAD_DEG;
        let start = self.decs.partition_point(|&d| d < lo);
        let end = self.decs.partition_point(|&d| d <= hi);
        let mut band = self.order[start..end.max(start)].to_vec();
        band.sort_unstable();
        band
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogRole, SkyPoint};

    fn catalog(decs: &[f64]) -> Catalog {
        Catalog::from_points(
            CatalogRole::Secondary,
            decs.iter().map(|&d| SkyPoint::new(0.0, d)),
        )
        .unwrap()
    }

    #[test]
    fn test_band_selection() {
        let index = ZoneIndex::build(&catalog(&[10.0, -5.0, 0.5, 0.0, 45.0, -0.5]));
        assert_eq!(index.len(), 6);
        assert_eq!(index.candidates(0.0, 1.0), vec![2, 3, 5]);
        assert_eq!(index.candidates(44.0, 1.0), vec![4]);
        assert!(index.candidates(-60.0, 1.0).is_empty());
    }

    #[test]
    fn test_band_edges_inclusive() {
        let index = ZoneIndex::build(&catalog(&[1.0, -1.0]));
        assert_eq!(index.candidates(0.0, 1.0), vec![0, 1]);
    }

    #[test]
    fn test_empty_index() {
        let index = ZoneIndex::build(&Catalog::new(CatalogRole::Secondary));
        assert!(index.is_empty());
        assert!(index.candidates(0.0, 10.0).is_empty());
    }

    #[test]
    fn test_pole_band_clips_naturally() {
        let index = ZoneIndex::build(&catalog(&[89.9, 89.0, 80.0]));
        assert_eq!(index.candidates(90.0, 0.5), vec![0]);
    }
}
