//! Geodesy for the impact globe.
//!
//! Scene-space ⇄ latitude/longitude conversion, great-circle distance,
//! nearest-location search, screen projection, reference-sphere raycasting,
//! and the read-only location registry.

pub use impact_core as core;

pub mod error;
pub mod geodesy;
pub mod raycast;
pub mod registry;
pub mod screen;

// Re-export key types for convenience.
pub use error::{GeoError, RegistryError};
pub use geodesy::{
    from_lat_lon, haversine_distance, nearest_location, surface_point, to_lat_lon,
    NearestLocation,
};
pub use raycast::{Raycaster, SphereRaycaster};
pub use registry::{LocationRecord, LocationRegistry};
pub use screen::{pointer_to_ndc, to_screen_position};
