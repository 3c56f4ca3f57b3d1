//! Pointer and button handling: waypoint selection and launch forwarding.

use glam::DVec3;

use impact_core::components::{Waypoint, WaypointLabel};
use impact_core::constants::{DRAG_THRESHOLD_MS, UNKNOWN_LOCATION};
use impact_core::enums::LongitudeConvention;
use impact_core::events::SimEvent;
use impact_core::types::{Camera, ScreenPosition, Viewport};
use impact_geo::{nearest_location, pointer_to_ndc, surface_point, LocationRegistry, Raycaster};

use crate::error::SimError;
use crate::impact::ImpactSimulator;
use crate::surface::SurfaceModel;

/// Result of a primary-button release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Release without a matching press.
    Unpaired,
    /// Held past the drag threshold; the camera was being orbited.
    Drag,
    /// Click did not hit the globe.
    Miss,
    /// A new waypoint replaced the old one.
    Placed,
}

/// Everything a click needs from the outside world.
pub struct PickContext<'a> {
    pub camera: &'a Camera,
    pub viewport: &'a Viewport,
    pub raycaster: &'a dyn Raycaster,
    /// `None` until location data has loaded.
    pub registry: Option<&'a LocationRegistry>,
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    pressed_at_ms: Option<u64>,
    waypoint: Option<Waypoint>,
    drag_threshold_ms: u64,
    convention: LongitudeConvention,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD_MS, LongitudeConvention::default())
    }
}

impl InteractionController {
    pub fn new(drag_threshold_ms: u64, convention: LongitudeConvention) -> Self {
        Self {
            pressed_at_ms: None,
            waypoint: None,
            drag_threshold_ms,
            convention,
        }
    }

    pub fn waypoint(&self) -> Option<&Waypoint> {
        self.waypoint.as_ref()
    }

    pub fn convention(&self) -> LongitudeConvention {
        self.convention
    }

    pub fn on_primary_press(&mut self, timestamp_ms: u64) {
        self.pressed_at_ms = Some(timestamp_ms);
    }

    /// Treat a quick release as a click: raycast the reference sphere and,
    /// on a hit, replace the waypoint.
    pub fn on_primary_release(
        &mut self,
        timestamp_ms: u64,
        pointer: ScreenPosition,
        ctx: &PickContext<'_>,
        events: &mut Vec<SimEvent>,
    ) -> Result<ReleaseOutcome, SimError> {
        let Some(pressed_at) = self.pressed_at_ms.take() else {
            return Ok(ReleaseOutcome::Unpaired);
        };
        let held_ms = timestamp_ms.saturating_sub(pressed_at);
        if held_ms > self.drag_threshold_ms {
            tracing::trace!(held_ms, "release ignored as drag");
            return Ok(ReleaseOutcome::Drag);
        }

        let ndc = pointer_to_ndc(pointer, ctx.viewport);
        let Some(hit) = ctx.raycaster.raycast(ndc, ctx.camera, ctx.viewport) else {
            return Ok(ReleaseOutcome::Miss);
        };
        let position = surface_point(hit, self.convention)?;

        let location = match ctx.registry {
            Some(registry) => nearest_location(position.lat(), position.lon(), registry)
                .name()
                .to_string(),
            None => UNKNOWN_LOCATION.to_string(),
        };

        if self.waypoint.take().is_some() {
            events.push(SimEvent::MarkerRemoved);
        }
        let waypoint = Waypoint {
            position,
            label: WaypointLabel {
                lat: position.lat(),
                lon: position.lon(),
                location,
            },
        };
        events.push(SimEvent::MarkerPlaced {
            position: position.position(),
            pin_position: waypoint.pin_position(),
            label: waypoint.label.text(),
        });
        tracing::info!(
            lat = position.lat(),
            lon = position.lon(),
            location = %waypoint.label.location,
            "waypoint placed"
        );
        self.waypoint = Some(waypoint);
        Ok(ReleaseOutcome::Placed)
    }

    /// Forward a launch to the simulator when a waypoint exists.
    ///
    /// Without a waypoint the request is silently dropped. Returns whether a
    /// launch happened.
    pub fn on_launch_requested(
        &self,
        simulator: &mut ImpactSimulator,
        camera_position: DVec3,
        surface: &mut SurfaceModel,
        events: &mut Vec<SimEvent>,
    ) -> Result<bool, SimError> {
        let Some(waypoint) = &self.waypoint else {
            tracing::debug!("launch ignored: no waypoint");
            return Ok(false);
        };
        simulator.launch(waypoint.position, camera_position, surface, events)?;
        Ok(true)
    }
}
