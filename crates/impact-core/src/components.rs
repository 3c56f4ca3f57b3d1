//! Plain data for the live simulation objects.
//!
//! Components carry no behavior. Logic lives in the sim crate.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::SurfacePoint;

/// Text attached to the waypoint pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointLabel {
    pub lat: f64,
    pub lon: f64,
    /// Nearest registry name, or "Unknown".
    pub location: String,
}

impl WaypointLabel {
    /// Display text: coordinates to two decimals, then the location on its own line.
    pub fn text(&self) -> String {
        format!(
            "Lat:{:.2}°, Lon:{:.2}°\n{}",
            self.lat, self.lon, self.location
        )
    }
}

/// The single selected surface location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: SurfacePoint,
    pub label: WaypointLabel,
}

impl Waypoint {
    /// Where the pin mesh sits: lifted along +Y by half its height.
    pub fn pin_position(&self) -> DVec3 {
        self.position.position() + DVec3::Y * (PIN_HEIGHT / 2.0)
    }
}

/// Asteroid in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: DVec3,
    pub target: SurfacePoint,
    /// Scene units per tick.
    pub speed: f64,
}

impl Projectile {
    pub fn remaining_distance(&self) -> f64 {
        self.position.distance(self.target.position())
    }
}

/// The live crater (at most one).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CraterState {
    pub center: SurfacePoint,
    /// Fixed at creation.
    pub radius: f64,
    /// Always within [0, target_depth].
    pub current_depth: f64,
    pub target_depth: f64,
    pub growing: bool,
}

/// Global topography exaggeration, independent of the crater.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplacementParameters {
    pub base_scale: f64,
}

impl Default for DisplacementParameters {
    fn default() -> Self {
        Self {
            base_scale: TOPOGRAPHY_SCALE_DEFAULT,
        }
    }
}

/// Expanding glow left at the impact point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactFlash {
    pub center: DVec3,
    pub scale: f64,
    pub opacity: f64,
    /// Ticks since the flash was spawned.
    pub age_ticks: u32,
}
