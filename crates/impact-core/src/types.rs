//! Fundamental geometric and simulation types.

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A point on the reference sphere together with its geographic coordinate.
///
/// Produced by the geodesy layer from a raycast hit. Fields are private so a
/// point cannot drift away from the lat/lon it was resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    position: DVec3,
    lat_lon: LatLon,
}

impl SurfacePoint {
    /// Pair a position with its already-resolved geographic coordinate.
    pub fn from_parts(position: DVec3, lat_lon: LatLon) -> Self {
        Self { position, lat_lon }
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn lat_lon(&self) -> LatLon {
        self.lat_lon
    }

    pub fn lat(&self) -> f64 {
        self.lat_lon.lat
    }

    pub fn lon(&self) -> f64 {
        self.lat_lon.lon
    }
}

/// Pixel coordinate in the host viewport (origin top-left, y down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

impl ScreenPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Host viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_DEFAULT_WIDTH,
            height: VIEWPORT_DEFAULT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width / height, falling back to 1.0 for a collapsed viewport.
    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 && self.width > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Perspective camera as last reported by the host orbit controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, CAMERA_DEFAULT_DISTANCE),
            target: DVec3::ZERO,
            up: DVec3::Y,
            fov_y_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn view(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self, aspect: f64) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_y_deg.to_radians(), aspect, self.near, self.far)
    }

    /// World → clip transform for the given viewport.
    pub fn view_projection(&self, viewport: &Viewport) -> DMat4 {
        self.projection(viewport.aspect()) * self.view()
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
