use crate::catalog::SkyPoint;
use serde::Serialize;

/// Column order of the flat match export.
pub const MATCH_COLUMNS: [&str; 9] = [
    "primary_index",
    "secondary_index",
    "primary_name",
    "secondary_name",
    "primary_ra",
    "primary_dec",
    "secondary_ra",
    "secondary_dec",
    "separation_arcmin",
];

/// One associated (primary, secondary) pair.
///
/// Only the cross-matcher creates records, and they expose no mutators.
/// `separation_arcmin` never exceeds the radius the matcher was run with.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    primary_index: usize,
    secondary_index: usize,
    primary: SkyPoint,
    secondary: SkyPoint,
    separation_arcmin: f64,
}

impl MatchRecord {
    pub(crate) fn new(
        primary_index: usize,
        secondary_index: usize,
        primary: &SkyPoint,
        secondary: &SkyPoint,
        separation_arcmin: f64,
    ) -> Self {
        Self {
            primary_index,
            secondary_index,
            primary: primary.clone(),
            secondary: secondary.clone(),
            separation_arcmin,
        }
    }

    pub fn primary_index(&self) -> usize {
        self.primary_index
    }

    pub fn secondary_index(&self) -> usize {
        self.secondary_index
    }

    pub fn primary(&self) -> &SkyPoint {
        &self.primary
    }

    pub fn secondary(&self) -> &SkyPoint {
        &self.secondary
    }

    pub fn separation_arcmin(&self) -> f64 {
        self.separation_arcmin
    }

    pub fn primary_name(&self) -> &str {
        self.primary.name().unwrap_or_default()
    }

    pub fn secondary_name(&self) -> &str {
        self.secondary.name().unwrap_or_default()
    }

    /// `(primary_index, secondary_index)`.
    pub fn pair(&self) -> (usize, usize) {
        (self.primary_index, self.secondary_index)
    }

    /// Flattens the record into one export row (see [`MATCH_COLUMNS`]).
    pub fn to_row(&self) -> MatchRow<'_> {
        MatchRow {
            primary_index: self.primary_index,
            secondary_index: self.secondary_index,
            primary_name: self.primary_name(),
            secondary_name: self.secondary_name(),
            primary_ra: self.primary.ra_deg,
            primary_dec: self.primary.dec_deg,
            secondary_ra: self.secondary.ra_deg,
            secondary_dec: self.secondary.dec_deg,
            separation_arcmin: self.separation_arcmin,
        }
    }
}

/// Flat, serialisable view of a [`MatchRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchRow<'a> {
    pub primary_index: usize,
    pub secondary_index: usize,
    pub primary_name: &'a str,
    pub secondary_name: &'a str,
    pub primary_ra: f64,
    pub primary_dec: f64,
    pub secondary_ra: f64,
    pub secondary_dec: f64,
    pub separation_arcmin: f64,
}
