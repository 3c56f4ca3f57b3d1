//! Globe state snapshot: the complete visible state handed to the renderer each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::ImpactPhase;
use crate::events::{Alert, SimEvent};
use crate::types::{ScreenPosition, SimTime};

/// Complete state broadcast to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobeSnapshot {
    pub time: SimTime,
    pub phase: ImpactPhase,
    pub waypoint: Option<WaypointView>,
    pub projectile: Option<ProjectileView>,
    pub crater: Option<CraterView>,
    pub flash: Option<FlashView>,
    pub uniforms: SurfaceUniforms,
    /// Whether location data has been installed.
    pub registry_ready: bool,
    pub events: Vec<SimEvent>,
    pub alerts: Vec<Alert>,
}

/// Shader inputs for the displacement and crater shading stages.
///
/// A zero radius disables the crater term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceUniforms {
    pub displacement_scale: f64,
    pub crater_position: DVec3,
    pub crater_radius: f64,
    pub crater_depth: f64,
}

/// Waypoint pin and its floating label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointView {
    pub position: DVec3,
    pub pin_position: DVec3,
    pub lat: f64,
    pub lon: f64,
    pub location: String,
    pub label: String,
    /// Label anchor in viewport pixels, recomputed every tick.
    pub screen: ScreenPosition,
}

/// Asteroid mesh state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: DVec3,
    pub target: DVec3,
    pub radius: f64,
    pub remaining_distance: f64,
}

/// Live crater parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraterView {
    pub center: DVec3,
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
    pub current_depth: f64,
    pub target_depth: f64,
    pub growing: bool,
}

/// Impact glow mesh state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashView {
    pub center: DVec3,
    /// Mesh radius after scaling.
    pub radius: f64,
    pub opacity: f64,
}
