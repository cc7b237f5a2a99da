//! A single catalog entry.

use celestial_core::angular_separation_deg;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value of an auxiliary catalog column.
///
/// The engine never reads these; they ride along so matches can be exported
/// with their source attributes intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Interprets a raw table cell: numbers when the text parses as `f64`,
    /// text otherwise.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(v) => Self::Number(v),
            Err(_) => Self::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Auxiliary columns keyed by column name, in a stable order.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A position on the sky with an optional identifier and opaque attributes.
///
/// Points built by hand may lack a name; once inserted into a
/// [`Catalog`](super::Catalog) the name is always resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyPoint {
    pub(crate) name: Option<String>,
    /// Right ascension in degrees, [0, 360) once inside a catalog.
    pub ra_deg: f64,
    /// Declination in degrees, [-90, 90].
    pub dec_deg: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

impl SkyPoint {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        Self {
            name: None,
            ra_deg,
            dec_deg,
            attributes: Attributes::new(),
        }
    }

    pub fn named(name: impl Into<String>, ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(ra_deg, dec_deg).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Great-circle distance to `other`, in degrees.
    pub fn separation_deg(&self, other: &SkyPoint) -> f64 {
        angular_separation_deg(self.ra_deg, self.dec_deg, other.ra_deg, other.dec_deg)
    }

    pub fn position(&self) -> (f64, f64) {
        (self.ra_deg, self.dec_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_parse() {
        assert_eq!(AttributeValue::parse("1.5"), AttributeValue::Number(1.5));
        assert_eq!(AttributeValue::parse("-3"), AttributeValue::Number(-3.0));
        assert_eq!(
            AttributeValue::parse("HII Region"),
            AttributeValue::Text("HII Region".to_string())
        );
    }

    #[test]
    fn test_attribute_accessors_and_display() {
        let n = AttributeValue::from(2.25);
        assert_eq!(n.as_number(), Some(2.25));
        assert_eq!(n.as_text(), None);
        assert_eq!(n.to_string(), "2.25");

        let t = AttributeValue::from("Star");
        assert_eq!(t.as_text(), Some("Star"));
        assert_eq!(t.to_string(), "Star");
    }

    #[test]
    fn test_builder() {
        let p = SkyPoint::named("4FGL_J0001", 10.0, -5.0)
            .with_attribute("flux", 3.2)
            .with_attribute("class", "unassociated");
        assert_eq!(p.name(), Some("4FGL_J0001"));
        assert_eq!(p.position(), (10.0, -5.0));
        assert_eq!(p.attribute("flux"), Some(&AttributeValue::Number(3.2)));
        assert!(p.attribute("magnitude").is_none());
    }

    #[test]
    fn test_separation_between_points() {
        let a = SkyPoint::new(180.0, 0.0);
        let b = SkyPoint::new(180.01, 0.0);
        assert!((a.separation_deg(&b) - 0.01).abs() < 1e-10);
        assert!((a.separation_deg(&b) - b.separation_deg(&a)).abs() < 1e-15);
    }
}
