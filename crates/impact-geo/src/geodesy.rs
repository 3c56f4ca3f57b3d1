//! Scene-space ⇄ geographic conversion and great-circle search.
//!
//! The globe is Y-up: latitude comes from the Y component, longitude from
//! the angle in the XZ plane. The sign of longitude follows the engine's
//! [`LongitudeConvention`].

use glam::DVec3;

use impact_core::constants::{EARTH_MEAN_RADIUS_KM, UNKNOWN_LOCATION};
use impact_core::enums::LongitudeConvention;
use impact_core::types::{LatLon, SurfacePoint};

use crate::error::GeoError;
use crate::registry::{LocationRecord, LocationRegistry};

/// Convert a scene-space point to latitude/longitude in degrees.
///
/// Only the direction of `point` matters. A zero-length or non-finite vector
/// has no latitude and is rejected.
pub fn to_lat_lon(point: DVec3, convention: LongitudeConvention) -> Result<LatLon, GeoError> {
    let r = point.length();
    if !point.is_finite() || r == 0.0 {
        return Err(GeoError::DegenerateGeometry {
            x: point.x,
            y: point.y,
            z: point.z,
        });
    }

    // Clamp guards asin against |y/r| drifting past 1 by rounding.
    let lat = (point.y / r).clamp(-1.0, 1.0).asin().to_degrees();
    let lon = point.z.atan2(point.x).to_degrees();
    let lon = match convention {
        LongitudeConvention::Atan2ZX => lon,
        LongitudeConvention::NegatedAtan2ZX => -lon,
    };
    Ok(LatLon::new(lat, lon))
}

/// Place latitude/longitude (degrees) on a sphere of the given radius.
///
/// Inverse of [`to_lat_lon`] under the same convention.
pub fn from_lat_lon(lat: f64, lon: f64, radius: f64, convention: LongitudeConvention) -> DVec3 {
    let lat = lat.to_radians();
    let lon = match convention {
        LongitudeConvention::Atan2ZX => lon,
        LongitudeConvention::NegatedAtan2ZX => -lon,
    }
    .to_radians();

    DVec3::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.sin(),
        radius * lat.cos() * lon.sin(),
    )
}

/// Resolve a raycast hit into a [`SurfacePoint`].
pub fn surface_point(
    position: DVec3,
    convention: LongitudeConvention,
) -> Result<SurfacePoint, GeoError> {
    let lat_lon = to_lat_lon(position, convention)?;
    Ok(SurfacePoint::from_parts(position, lat_lon))
}

/// Great-circle distance in kilometers between two lat/lon pairs (degrees).
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` slightly outside [0, 1] for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_MEAN_RADIUS_KM * c
}

/// Result of a nearest-location query.
#[derive(Debug, Clone, PartialEq)]
pub enum NearestLocation<'a> {
    Found {
        record: &'a LocationRecord,
        distance_km: f64,
    },
    /// Registry empty or not loaded yet.
    Unknown,
}

impl NearestLocation<'_> {
    /// Label text: the record name, or "Unknown".
    pub fn name(&self) -> &str {
        match self {
            NearestLocation::Found { record, .. } => &record.name,
            NearestLocation::Unknown => UNKNOWN_LOCATION,
        }
    }
}

/// Linear scan for the record closest to (lat, lon) by haversine distance.
///
/// Ties keep the earliest record, so results are stable across calls.
pub fn nearest_location(lat: f64, lon: f64, registry: &LocationRegistry) -> NearestLocation<'_> {
    let mut best: Option<(&LocationRecord, f64)> = None;
    for record in registry.records() {
        let d = haversine_distance(lat, lon, record.lat, record.lon);
        match best {
            Some((_, min)) if d >= min => {}
            _ => best = Some((record, d)),
        }
    }

    match best {
        Some((record, distance_km)) => NearestLocation::Found {
            record,
            distance_km,
        },
        None => NearestLocation::Unknown,
    }
}
