//! Error types for geodesy and location loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Geometry that has no geographic meaning.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoError {
    #[error("cannot derive lat/lon from degenerate vector ({x}, {y}, {z})")]
    DegenerateGeometry { x: f64, y: f64, z: f64 },
}

/// Failure to load the location table. Bad rows are filtered, not reported here.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read location data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV location data: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON location data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("location data has no {column} column")]
    MissingField { column: &'static str },
    #[error("location data must be a JSON array of records")]
    NotAnArray,
    #[error("unsupported location data format: {path} (expected .csv or .json)")]
    UnsupportedFormat { path: PathBuf },
}
