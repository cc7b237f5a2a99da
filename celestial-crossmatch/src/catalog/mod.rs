//! Catalogs of sky positions.
//!
//! A [`Catalog`] is an ordered list of [`SkyPoint`]s with a [`CatalogRole`].
//! Insertion is the single place where input is checked and canonicalised:
//!
//! - RA and Dec must be finite and Dec must lie in [-90°, +90°];
//! - RA is wrapped into [0°, 360°);
//! - a missing name is replaced by the role's fallback, `Gamma_<index>` for
//!   the primary catalog and `Source_<index>` for the secondary one.
//!
//! Matching code can therefore rely on every point being valid and named.

mod point;

pub use point::{AttributeValue, Attributes, SkyPoint};

use crate::error::{CrossMatchError, CrossMatchResult};
use celestial_core::angle::checked_position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a cross-match a catalog sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogRole {
    /// The catalog iterated over (e.g. gamma-ray sources).
    Primary,
    /// The catalog searched around each primary point (e.g. stellar sources).
    Secondary,
}

impl CatalogRole {
    /// Prefix of generated names for unnamed points.
    pub fn fallback_prefix(self) -> &'static str {
        match self {
            Self::Primary => "Gamma",
            Self::Secondary => "Source",
        }
    }

    pub fn fallback_name(self, index: usize) -> String {
        format!("{}_{}", self.fallback_prefix(), index)
    }
}

impl fmt::Display for CatalogRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Secondary => f.write_str("secondary"),
        }
    }
}

/// An ordered, validated collection of sky points.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    role: CatalogRole,
    points: Vec<SkyPoint>,
}

impl Catalog {
    pub fn new(role: CatalogRole) -> Self {
        Self {
            role,
            points: Vec::new(),
        }
    }

    /// Builds a catalog, validating every point in order.
    ///
    /// # Errors
    /// [`CrossMatchError::InvalidInput`] naming the first offending index.
    pub fn from_points<I>(role: CatalogRole, points: I) -> CrossMatchResult<Self>
    where
        I: IntoIterator<Item = SkyPoint>,
    {
        let iter = points.into_iter();
        let mut catalog = Self {
            role,
            points: Vec::with_capacity(iter.size_hint().0),
        };
        for point in iter {
            catalog.push(point)?;
        }
        Ok(catalog)
    }

    /// Validates and appends a point, returning its index.
    pub fn push(&mut self, mut point: SkyPoint) -> CrossMatchResult<usize> {
        let index = self.points.len();
        let (ra, dec) = checked_position(point.ra_deg, point.dec_deg).map_err(|e| {
            CrossMatchError::invalid_input(
                &format!("{} catalog point {}", self.role, index),
                &e.to_string(),
            )
        })?;
        point.ra_deg = ra;
        point.dec_deg = dec;
        if point.name.as_deref().map_or(true, str::is_empty) {
            point.name = Some(self.role.fallback_name(index));
        }
        self.points.push(point);
        Ok(index)
    }

    pub fn role(&self) -> CatalogRole {
        self.role
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SkyPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&SkyPoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SkyPoint> {
        self.points.iter()
    }

    /// Display name of the point at `index`.
    ///
    /// Always the stored name for in-range indices; the role fallback is
    /// returned for indices past the end.
    pub fn name(&self, index: usize) -> String {
        self.points
            .get(index)
            .and_then(|p| p.name().map(str::to_string))
            .unwrap_or_else(|| self.role.fallback_name(index))
    }

    /// `(ra_deg, dec_deg)` of every point, in catalog order.
    pub fn positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(SkyPoint::position)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a SkyPoint;
    type IntoIter = std::slice::Iter<'a, SkyPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
