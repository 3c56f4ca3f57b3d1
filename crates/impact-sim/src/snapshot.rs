//! Snapshot builder: reads engine state into a `GlobeSnapshot`.
//!
//! Read-only. Never mutates the simulator or surface.

use impact_core::components::{CraterState, ImpactFlash, Projectile, Waypoint};
use impact_core::constants::PROJECTILE_RADIUS;
use impact_core::events::{Alert, SimEvent};
use impact_core::state::*;
use impact_core::types::{Camera, SimTime, Viewport};
use impact_geo::to_screen_position;

use crate::flash;
use crate::impact::ImpactSimulator;
use crate::surface::SurfaceModel;

/// Borrowed view of everything a snapshot is built from.
pub struct SnapshotInputs<'a> {
    pub time: &'a SimTime,
    pub simulator: &'a ImpactSimulator,
    pub surface: &'a SurfaceModel,
    pub waypoint: Option<&'a Waypoint>,
    pub flash: Option<&'a ImpactFlash>,
    pub camera: &'a Camera,
    pub viewport: &'a Viewport,
    pub registry_ready: bool,
}

pub fn build_snapshot(
    inputs: SnapshotInputs<'_>,
    events: Vec<SimEvent>,
    alerts: Vec<Alert>,
) -> GlobeSnapshot {
    GlobeSnapshot {
        time: *inputs.time,
        phase: inputs.simulator.phase(),
        waypoint: inputs
            .waypoint
            .map(|w| build_waypoint(w, inputs.camera, inputs.viewport)),
        projectile: inputs.simulator.projectile().map(build_projectile),
        crater: inputs.surface.crater().map(build_crater),
        flash: inputs.flash.map(flash::view),
        uniforms: inputs.surface.uniforms(),
        registry_ready: inputs.registry_ready,
        events,
        alerts,
    }
}

fn build_waypoint(waypoint: &Waypoint, camera: &Camera, viewport: &Viewport) -> WaypointView {
    let position = waypoint.position.position();
    WaypointView {
        position,
        pin_position: waypoint.pin_position(),
        lat: waypoint.label.lat,
        lon: waypoint.label.lon,
        location: waypoint.label.location.clone(),
        label: waypoint.label.text(),
        screen: to_screen_position(position, camera, viewport),
    }
}

fn build_projectile(projectile: &Projectile) -> ProjectileView {
    ProjectileView {
        position: projectile.position,
        target: projectile.target.position(),
        radius: PROJECTILE_RADIUS,
        remaining_distance: projectile.remaining_distance(),
    }
}

fn build_crater(crater: &CraterState) -> CraterView {
    CraterView {
        center: crater.center.position(),
        lat: crater.center.lat(),
        lon: crater.center.lon(),
        radius: crater.radius,
        current_depth: crater.current_depth,
        target_depth: crater.target_depth,
        growing: crater.growing,
    }
}
