//! CSV adapters for catalogs and match tables.
//!
//! Catalog files need a header row with `ra` and `dec` columns (matched
//! case-insensitively, in degrees). A `name` column is optional. Every other
//! column is carried as an attribute: numeric when the cell parses as a
//! float, text otherwise.

use crate::catalog::{AttributeValue, Catalog, CatalogRole, SkyPoint};
use crate::error::{CrossMatchError, CrossMatchResult};
use crate::matching::MatchRecord;
use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::Path;

const RESERVED_COLUMNS: [&str; 3] = ["name", "ra", "dec"];

fn is_reserved_column(header: &str) -> bool {
    let header = header.trim();
    RESERVED_COLUMNS
        .iter()
        .any(|c| header.eq_ignore_ascii_case(c))
}

struct Columns {
    ra: usize,
    dec: usize,
    name: Option<usize>,
    attributes: Vec<(usize, String)>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> CrossMatchResult<Self> {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        };
        let missing = |column: &str| {
            CrossMatchError::invalid_input(
                "catalog header",
                &format!("required column '{}' not found", column),
            )
        };
        let ra = find("ra").ok_or_else(|| missing("ra"))?;
        let dec = find("dec").ok_or_else(|| missing("dec"))?;
        let name = find("name");
        let attributes = headers
            .iter()
            .enumerate()
            .filter(|&(i, h)| {
                if i == ra || i == dec || Some(i) == name {
                    return false;
                }
                if is_reserved_column(h) {
                    log::warn!("duplicate '{}' column {} ignored", h.trim(), i + 1);
                    return false;
                }
                true
            })
            .map(|(i, h)| (i, h.trim().to_string()))
            .collect();
        Ok(Self {
            ra,
            dec,
            name,
            attributes,
        })
    }
}

fn parse_coordinate(raw: &str, column: &str, line: u64) -> CrossMatchResult<f64> {
    raw.parse::<f64>().map_err(|_| {
        CrossMatchError::invalid_input(
            &format!("catalog line {}", line),
            &format!("{} value '{}' is not a number", column, raw),
        )
    })
}

/// Reads a catalog from any CSV source.
///
/// Rows with an empty `ra` or `dec` cell are skipped with a warning.
///
/// # Errors
/// [`CrossMatchError::InvalidInput`] for a missing required column or an
/// unparsable / out-of-range coordinate (naming the line),
/// [`CrossMatchError::Csv`] for malformed CSV.
pub fn read_catalog<R: io::Read>(reader: R, role: CatalogRole) -> CrossMatchResult<Catalog> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let columns = Columns::from_headers(rdr.headers()?)?;

    let mut catalog = Catalog::new(role);
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let ra_raw = record.get(columns.ra).unwrap_or_default();
        let dec_raw = record.get(columns.dec).unwrap_or_default();
        if ra_raw.is_empty() || dec_raw.is_empty() {
            log::warn!("{} catalog line {}: missing ra/dec, row skipped", role, line);
            skipped += 1;
            continue;
        }

        let mut point = SkyPoint::new(
            parse_coordinate(ra_raw, "ra", line)?,
            parse_coordinate(dec_raw, "dec", line)?,
        );
        if let Some(name) = columns.name.and_then(|i| record.get(i)) {
            if !name.is_empty() {
                point = point.with_name(name);
            }
        }
        for (i, key) in &columns.attributes {
            match record.get(*i) {
                Some(cell) if !cell.is_empty() => {
                    point
                        .attributes
                        .insert(key.clone(), AttributeValue::parse(cell));
                }
                _ => {}
            }
        }

        catalog.push(point).map_err(|e| match e {
            CrossMatchError::InvalidInput { message, .. } => {
                CrossMatchError::invalid_input(&format!("catalog line {}", line), &message)
            }
            other => other,
        })?;
    }

    log::info!(
        "read {} {} catalog points ({} rows skipped)",
        catalog.len(),
        role,
        skipped
    );
    Ok(catalog)
}

/// Reads a catalog from a CSV file.
pub fn read_catalog_csv<P: AsRef<Path>>(path: P, role: CatalogRole) -> CrossMatchResult<Catalog> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CrossMatchError::io(path, e))?;
    log::debug!("reading {} catalog from {}", role, path.display());
    read_catalog(file, role)
}

/// Writes a catalog as `name, ra, dec` followed by the union of attribute
/// columns in sorted order.
///
/// Attributes whose key collides with `name`, `ra` or `dec` (ignoring case)
/// are left out so the file reads back with the same coordinates.
pub fn write_catalog<W: io::Write>(writer: W, catalog: &Catalog) -> CrossMatchResult<()> {
    let (reserved, keys): (BTreeSet<&str>, BTreeSet<&str>) = catalog
        .iter()
        .flat_map(|p| p.attributes.keys().map(String::as_str))
        .partition(|k| is_reserved_column(k));
    for key in &reserved {
        log::warn!("attribute '{}' clashes with a catalog column, not written", key);
    }

    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = vec!["name", "ra", "dec"];
    header.extend(keys.iter().copied());
    wtr.write_record(&header)?;

    for (i, point) in catalog.iter().enumerate() {
        let mut row = vec![
            catalog.name(i),
            point.ra_deg.to_string(),
            point.dec_deg.to_string(),
        ];
        row.extend(keys.iter().map(|&k| {
            point
                .attribute(k)
                .map(ToString::to_string)
                .unwrap_or_default()
        }));
        wtr.write_record(&row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_catalog_csv<P: AsRef<Path>>(path: P, catalog: &Catalog) -> CrossMatchResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CrossMatchError::io(path, e))?;
    write_catalog(file, catalog)?;
    log::debug!("wrote {} points to {}", catalog.len(), path.display());
    Ok(())
}

/// Writes one row per match; see [`MATCH_COLUMNS`](crate::MATCH_COLUMNS).
pub fn write_matches<W: io::Write>(writer: W, records: &[MatchRecord]) -> CrossMatchResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if records.is_empty() {
        wtr.write_record(crate::matching::MATCH_COLUMNS)?;
    }
    for record in records {
        wtr.serialize(record.to_row())?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_matches_csv<P: AsRef<Path>>(path: P, records: &[MatchRecord]) -> CrossMatchResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CrossMatchError::io(path, e))?;
    write_matches(file, records)?;
    log::info!("wrote {} matches to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{cross_match, MATCH_COLUMNS};

    #[test]
    fn test_read_with_attributes() {
        let data = "\
Name,RA,Dec,flux,class
4FGL_J0001,10.5,-3.25,1.5,blazar
,20.0,5.0,,pulsar
";
        let cat = read_catalog(data.as_bytes(), CatalogRole::Primary).unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.name(0), "4FGL_J0001");
        assert_eq!(cat.name(1), "Gamma_1");
        let p = &cat.points()[0];
        assert_eq!((p.ra_deg, p.dec_deg), (10.5, -3.25));
        assert_eq!(p.attribute("flux"), Some(&AttributeValue::Number(1.5)));
        assert_eq!(p.attribute("class"), Some(&AttributeValue::from("blazar")));
        assert!(cat.points()[1].attribute("flux").is_none());
    }

    #[test]
    fn test_missing_column() {
        let err = read_catalog("name,ra\nx,1.0\n".as_bytes(), CatalogRole::Primary).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("dec"));
    }

    #[test]
    fn test_empty_coordinates_skipped() {
        let data = "ra,dec\n1.0,2.0\n,3.0\n4.0,\n5.0,6.0\n";
        let cat = read_catalog(data.as_bytes(), CatalogRole::Secondary).unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.points()[1].ra_deg, 5.0);
    }

    #[test]
    fn test_bad_coordinate_names_line() {
        let data = "ra,dec\n1.0,2.0\nabc,3.0\n";
        let err = read_catalog(data.as_bytes(), CatalogRole::Secondary).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{}", err);

        let data = "ra,dec\n1.0,95.0\n";
        let err = read_catalog(data.as_bytes(), CatalogRole::Secondary).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_ra_wrapped_on_read() {
        let data = "ra,dec\n370.0,0.0\n-10.0,0.0\n";
        let cat = read_catalog(data.as_bytes(), CatalogRole::Secondary).unwrap();
        assert!((cat.points()[0].ra_deg - 10.0).abs() < 1e-12);
        assert!((cat.points()[1].ra_deg - 350.0).abs() < 1e-12);
    }

    #[test]
    fn test_catalog_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stars.csv");
        let original = Catalog::from_points(
            CatalogRole::Secondary,
            [
                SkyPoint::named("Star_0000", 1.25, -4.5)
                    .with_attribute("magnitude", 11.5)
                    .with_attribute("source_type", "HII Region"),
                SkyPoint::named("Star_0001", 300.0, 45.0).with_attribute("magnitude", 9.0),
            ],
        )
        .unwrap();

        write_catalog_csv(&path, &original).unwrap();
        let back = read_catalog_csv(&path, CatalogRole::Secondary).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_write_skips_reserved_attribute_keys() {
        let original = Catalog::from_points(
            CatalogRole::Primary,
            [
                SkyPoint::named("src_a", 12.0, 34.0)
                    .with_attribute("RA", 999.0)
                    .with_attribute(" name ", "alias")
                    .with_attribute("flux", 2.5),
                SkyPoint::named("src_b", 56.0, -7.0).with_attribute("dec", "n/a"),
            ],
        )
        .unwrap();

        let mut buf = Vec::new();
        write_catalog(&mut buf, &original).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("name,ra,dec,flux"));

        let back = read_catalog(text.as_bytes(), CatalogRole::Primary).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.name(0), "src_a");
        assert_eq!((back.points()[0].ra_deg, back.points()[0].dec_deg), (12.0, 34.0));
        assert_eq!(back.points()[0].attribute("flux"), Some(&AttributeValue::Number(2.5)));
        assert!(back.points()[0].attribute("RA").is_none());
        assert_eq!((back.points()[1].ra_deg, back.points()[1].dec_deg), (56.0, -7.0));
        assert!(back.points()[1].attributes.is_empty());
    }

    #[test]
    fn test_read_ignores_duplicate_coordinate_column() {
        let data = "ra,dec,RA,mag\n10.0,20.0,11.0,3.5\n";
        let cat = read_catalog(data.as_bytes(), CatalogRole::Secondary).unwrap();
        let p = &cat.points()[0];
        assert_eq!(p.ra_deg, 10.0);
        assert!(p.attribute("RA").is_none());
        assert_eq!(p.attribute("mag"), Some(&AttributeValue::Number(3.5)));
        assert_eq!(p.attributes.len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_catalog_csv("/nonexistent/gamma.csv", CatalogRole::Primary).unwrap_err();
        assert!(matches!(err, CrossMatchError::Io { .. }));
    }

    #[test]
    fn test_match_export_columns() {
        let gamma = Catalog::from_points(CatalogRole::Primary, [SkyPoint::new(180.0, 0.0)]).unwrap();
        let stars =
            Catalog::from_points(CatalogRole::Secondary, [SkyPoint::new(180.01, 0.0)]).unwrap();
        let matches = cross_match(&gamma, &stars, 5.0).unwrap();

        let mut buf = Vec::new();
        write_matches(&mut buf, &matches).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), MATCH_COLUMNS.join(","));
        let row: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(row.len(), MATCH_COLUMNS.len());
        assert_eq!(&row[..4], &["0", "0", "Gamma_0", "Source_0"]);
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_match_export_has_header() {
        let mut buf = Vec::new();
        write_matches(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().trim_end(), MATCH_COLUMNS.join(","));
    }
}
