//! Read-only table of named reference points (countries).
//!
//! Loaded once from CSV or JSON. Rows with a blank name or non-finite
//! coordinates are dropped during loading and never reach the table.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RegistryError;

/// Header/key names accepted for each field, compared case-insensitively.
const NAME_KEYS: &[&str] = &["country", "name"];
const LAT_KEYS: &[&str] = &["latitude", "lat"];
const LON_KEYS: &[&str] = &["longitude", "lon", "lng"];

/// A named point in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl LocationRecord {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Immutable location table. Construct through one of the loaders.
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    records: Vec<LocationRecord>,
}

impl LocationRegistry {
    /// Build from already-parsed rows, trimming names and dropping invalid rows.
    pub fn from_records(rows: impl IntoIterator<Item = LocationRecord>) -> Self {
        let mut dropped = 0usize;
        let records: Vec<LocationRecord> = rows
            .into_iter()
            .map(|mut row| {
                row.name = row.name.trim().to_string();
                row
            })
            .filter(|row| {
                let keep = row.is_valid();
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();

        if dropped > 0 {
            tracing::debug!(dropped, "dropped invalid location rows");
        }
        Self { records }
    }

    /// Parse CSV with a header row naming the country and coordinate columns.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let find = |keys: &[&str], column: &'static str| {
            headers
                .iter()
                .position(|h| keys.iter().any(|k| h.eq_ignore_ascii_case(k)))
                .ok_or(RegistryError::MissingField { column })
        };
        let name_col = find(NAME_KEYS, "Country")?;
        let lat_col = find(LAT_KEYS, "Latitude")?;
        let lon_col = find(LON_KEYS, "Longitude")?;

        let mut rows = Vec::new();
        let mut unparsable = 0usize;
        for result in reader.records() {
            let record = result?;
            let row = (
                record.get(name_col),
                record.get(lat_col).and_then(parse_coordinate),
                record.get(lon_col).and_then(parse_coordinate),
            );
            match row {
                (Some(name), Some(lat), Some(lon)) => {
                    rows.push(LocationRecord::new(name, lat, lon))
                }
                _ => unparsable += 1,
            }
        }

        if unparsable > 0 {
            tracing::debug!(unparsable, "skipped CSV rows with missing or non-numeric fields");
        }
        Ok(Self::from_records(rows))
    }

    /// Parse a JSON array of objects. Coordinates may be numbers or numeric strings.
    pub fn from_json_str(text: &str) -> Result<Self, RegistryError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Array(items) = value else {
            return Err(RegistryError::NotAnArray);
        };

        let rows = items.iter().filter_map(|item| {
            let object = item.as_object()?;
            let field = |keys: &[&str]| {
                object
                    .iter()
                    .find(|(k, _)| keys.iter().any(|key| k.eq_ignore_ascii_case(key)))
                    .map(|(_, v)| v)
            };
            let name = field(NAME_KEYS)?.as_str()?;
            let lat = json_coordinate(field(LAT_KEYS)?)?;
            let lon = json_coordinate(field(LON_KEYS)?)?;
            Some(LocationRecord::new(name, lat, lon))
        });
        Ok(Self::from_records(rows))
    }

    /// Load from a `.csv` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let read = || {
            std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        let registry = match extension.as_deref() {
            Some("csv") => Self::from_csv_reader(read()?.as_bytes())?,
            Some("json") => Self::from_json_str(&read()?)?,
            _ => {
                return Err(RegistryError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        tracing::info!(
            path = %path.display(),
            count = registry.len(),
            "location registry loaded"
        );
        Ok(registry)
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&LocationRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_coordinate(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

fn json_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_coordinate(s),
        _ => None,
    }
}
