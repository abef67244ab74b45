// Market benchmark bands (P25/P50/P75 base pay) keyed by role and city.
//
// A seeded table covers the common role/city pairs. An optional CSV file
// (`role,city,p25,p50,p75`) adds or replaces entries. Unknown pairs get an
// estimate derived from the candidate's own base.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{BenchmarkOverride, OfferConfig};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Market percentiles for base compensation, in lakhs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
}

impl Band {
    fn rounded(self) -> Band {
        Band {
            p25: round2(self.p25),
            p50: round2(self.p50),
            p75: round2(self.p75),
        }
    }
}

/// Lookup table from (role, city) to band.
#[derive(Debug, Clone, Default)]
pub struct BandTable {
    bands: HashMap<(String, String), Band>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum BandError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

/// Demo bands shipped with the binary: (role, city, p25, p50, p75).
const SEEDED_BANDS: &[(&str, &str, f64, f64, f64)] = &[
    ("Analyst", "BLR", 7.0, 8.5, 10.0),
    ("AE", "BLR", 8.0, 10.0, 12.0),
    ("Area Sales Exec", "BLR", 6.0, 7.0, 8.0),
    ("Analyst", "DEL", 7.5, 9.0, 10.5),
    ("AE", "DEL", 8.5, 10.5, 12.5),
    ("Area Sales Exec", "DEL", 6.5, 7.5, 8.5),
    ("Analyst", "MUM", 7.2, 8.8, 10.3),
    ("AE", "MUM", 8.2, 10.2, 12.2),
    ("Area Sales Exec", "MUM", 6.2, 7.2, 8.2),
];

/// Median used for the estimate when the candidate's base is zero.
const FALLBACK_P50: f64 = 8.5;
/// P25 used for the estimate when the candidate's base is zero.
const FALLBACK_P25: f64 = 7.0;

// ---------------------------------------------------------------------------
// Raw CSV row
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawBand {
    role: String,
    city: String,
    p25: f64,
    p50: f64,
    p75: f64,
    /// Absorb any extra columns.
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// BandTable
// ---------------------------------------------------------------------------

impl BandTable {
    /// The built-in demo table.
    pub fn seeded() -> Self {
        let mut table = BandTable::default();
        for &(role, city, p25, p50, p75) in SEEDED_BANDS {
            table.insert(role, city, Band { p25, p50, p75 });
        }
        table
    }

    /// Seeded table extended with the rows of the CSV file at `path`.
    /// Rows in the file replace seeded entries for the same pair.
    pub fn load(path: &Path) -> Result<Self, BandError> {
        let file = std::fs::File::open(path).map_err(|e| BandError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let rows = load_bands_from_reader(file).map_err(|e| BandError::Csv {
            path: path.display().to_string(),
            source: e,
        })?;
        if rows.is_empty() {
            return Err(BandError::Validation(format!(
                "{} contains no usable band rows",
                path.display()
            )));
        }

        let mut table = BandTable::seeded();
        for (role, city, band) in rows {
            table.insert(&role, &city, band);
        }
        debug!("Loaded band table with {} entries", table.len());
        Ok(table)
    }

    pub fn insert(&mut self, role: &str, city: &str, band: Band) {
        self.bands
            .insert((role.trim().to_string(), city.trim().to_string()), band);
    }

    pub fn get(&self, role: &str, city: &str) -> Option<Band> {
        self.bands
            .get(&(role.trim().to_string(), city.trim().to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Band for the pair, or an estimate anchored on `base` when the pair is
    /// unknown. Values are rounded to two decimals.
    pub fn lookup_or_estimate(&self, role: &str, city: &str, base: f64) -> Band {
        let band = self
            .get(role, city)
            .unwrap_or_else(|| estimate_band(base));
        band.rounded()
    }
}

/// Estimate a band from the candidate's own base: P50 at the base, P25 10%
/// below, P75 20% above. A zero base uses fixed fallbacks.
pub fn estimate_band(base: f64) -> Band {
    let has_base = base != 0.0 && base.is_finite();
    let p50 = if has_base { base } else { FALLBACK_P50 };
    let p25 = if has_base { base * 0.9 } else { FALLBACK_P25 };
    Band {
        p25,
        p50,
        p75: p50 * 1.2,
    }
}

/// Band used for an offer: the configured override when present, otherwise
/// the table lookup.
pub fn resolve_band(
    offer: &OfferConfig,
    overrides: Option<&BenchmarkOverride>,
    table: &BandTable,
) -> Band {
    match overrides {
        Some(o) => Band {
            p25: o.p25.unwrap_or_else(|| round2(o.p50 * 0.9)),
            p50: o.p50,
            p75: o.p75,
        },
        None => table.lookup_or_estimate(&offer.role, &offer.city, offer.base),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Reader-based loader
// ---------------------------------------------------------------------------

fn load_bands_from_reader<R: Read>(rdr: R) -> Result<Vec<(String, String, Band)>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawBand>() {
        match result {
            Ok(raw) => {
                let role = raw.role.trim().to_string();
                let city = raw.city.trim().to_string();
                let values = [raw.p25, raw.p50, raw.p75];
                if !values.iter().all(|v| v.is_finite() && *v >= 0.0) {
                    warn!("skipping band '{role}/{city}': non-finite or negative value");
                    continue;
                }
                if raw.p25 > raw.p50 || raw.p50 > raw.p75 {
                    warn!("skipping band '{role}/{city}': percentiles out of order");
                    continue;
                }
                if role.is_empty() || city.is_empty() {
                    warn!("skipping band row with empty role or city");
                    continue;
                }
                rows.push((
                    role,
                    city,
                    Band {
                        p25: raw.p25,
                        p50: raw.p50,
                        p75: raw.p75,
                    },
                ));
            }
            Err(e) => {
                warn!("skipping malformed band row: {}", e);
            }
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(role: &str, city: &str, base: f64) -> OfferConfig {
        OfferConfig {
            role: role.into(),
            level: "L4".into(),
            city: city.into(),
            base,
            bonus: 0.0,
            joining_bonus: 0.0,
        }
    }

    #[test]
    fn seeded_table_has_nine_pairs() {
        let table = BandTable::seeded();
        assert_eq!(table.len(), 9);
        assert_eq!(
            table.get("Analyst", "BLR"),
            Some(Band {
                p25: 7.0,
                p50: 8.5,
                p75: 10.0
            })
        );
    }

    #[test]
    fn estimate_from_base() {
        let band = BandTable::seeded().lookup_or_estimate("Designer", "BLR", 10.0);
        assert_eq!(band.p25, 9.0);
        assert_eq!(band.p50, 10.0);
        assert_eq!(band.p75, 12.0);
    }

    #[test]
    fn estimate_with_zero_base_uses_fallbacks() {
        let band = BandTable::default().lookup_or_estimate("Analyst", "BLR", 0.0);
        assert_eq!(band.p25, 7.0);
        assert_eq!(band.p50, 8.5);
        assert_eq!(band.p75, 10.2);
    }

    #[test]
    fn estimate_is_rounded_to_two_decimals() {
        let band = BandTable::default().lookup_or_estimate("X", "Y", 7.777);
        assert_eq!(band.p50, 7.78);
        assert_eq!(band.p25, 7.0);
        assert_eq!(band.p75, 9.33);
    }

    #[test]
    fn lookup_trims_whitespace() {
        let table = BandTable::seeded();
        assert!(table.get(" AE ", "MUM ").is_some());
    }

    #[test]
    fn reader_parses_rows_and_ignores_extra_columns() {
        let csv_data = "role,city,p25,p50,p75,source\n\
                        Analyst,PUN,6.5,8.0,9.5,survey\n\
                        AE,PUN,7.5,9.5,11.0,survey\n";
        let rows = load_bands_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "Analyst");
        assert_eq!(rows[0].1, "PUN");
        assert_eq!(rows[1].2.p75, 11.0);
    }

    #[test]
    fn reader_skips_bad_rows() {
        let csv_data = "role,city,p25,p50,p75\n\
                        Analyst,PUN,6.5,8.0,9.5\n\
                        AE,PUN,not-a-number,9.5,11.0\n\
                        Lead,PUN,10.0,9.0,12.0\n\
                        Intern,PUN,-1.0,2.0,3.0\n\
                        Ops,PUN,inf,2.0,3.0\n";
        let rows = load_bands_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "Analyst");
    }

    #[test]
    fn load_overrides_seeded_entry() {
        let dir = std::env::temp_dir().join("offerwise_bands_override");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bands.csv");
        std::fs::write(&path, "role,city,p25,p50,p75\nAnalyst,BLR,7.5,9.0,11.0\n").unwrap();

        let table = BandTable::load(&path).unwrap();
        assert_eq!(table.len(), 9);
        assert_eq!(table.get("Analyst", "BLR").unwrap().p50, 9.0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = BandTable::load(Path::new("/nonexistent/offerwise/bands.csv")).unwrap_err();
        assert!(matches!(err, BandError::Io { .. }));
    }

    #[test]
    fn load_file_without_usable_rows_is_validation_error() {
        let dir = std::env::temp_dir().join("offerwise_bands_empty");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bands.csv");
        std::fs::write(&path, "role,city,p25,p50,p75\n").unwrap();

        let err = BandTable::load(&path).unwrap_err();
        assert!(matches!(err, BandError::Validation(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn resolve_band_prefers_override() {
        let overrides = BenchmarkOverride {
            p25: None,
            p50: 10.0,
            p75: 13.0,
        };
        let band = resolve_band(&offer("Analyst", "BLR", 9.0), Some(&overrides), &BandTable::seeded());
        assert_eq!(band.p25, 9.0);
        assert_eq!(band.p50, 10.0);
        assert_eq!(band.p75, 13.0);
    }

    #[test]
    fn resolve_band_uses_table_without_override() {
        let band = resolve_band(&offer("AE", "BLR", 9.0), None, &BandTable::seeded());
        assert_eq!(band.p50, 10.0);
    }
}
