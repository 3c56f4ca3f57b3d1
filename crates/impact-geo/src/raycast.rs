//! Pointer raycasting against the globe's collision geometry.
//!
//! Hits are always on the undeformed reference sphere: crater and topography
//! displacement are visual only and never move where a waypoint can land.

use glam::{DVec2, DVec3};

use impact_core::constants::EARTH_RADIUS;
use impact_core::types::{Camera, Viewport};

/// Host-provided hit test: pointer (NDC) + camera → nearest surface point.
pub trait Raycaster {
    fn raycast(&self, pointer_ndc: DVec2, camera: &Camera, viewport: &Viewport) -> Option<DVec3>;
}

/// Analytic ray/sphere intersection against a sphere centered at the origin.
#[derive(Debug, Clone, Copy)]
pub struct SphereRaycaster {
    pub radius: f64,
}

impl Default for SphereRaycaster {
    fn default() -> Self {
        Self {
            radius: EARTH_RADIUS,
        }
    }
}

impl SphereRaycaster {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Nearest intersection in front of `origin` along `dir`, if any.
    pub fn intersect(&self, origin: DVec3, dir: DVec3) -> Option<DVec3> {
        let dir = dir.try_normalize()?;
        let b = origin.dot(dir);
        let c = origin.length_squared() - self.radius * self.radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }

        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        let far = -b + sqrt_disc;
        let t = if near >= 0.0 {
            near
        } else if far >= 0.0 {
            // Origin inside the sphere.
            far
        } else {
            return None;
        };
        Some(origin + dir * t)
    }
}

impl Raycaster for SphereRaycaster {
    fn raycast(&self, pointer_ndc: DVec2, camera: &Camera, viewport: &Viewport) -> Option<DVec3> {
        let inverse = camera.view_projection(viewport).inverse();
        let near = inverse.project_point3(DVec3::new(pointer_ndc.x, pointer_ndc.y, -1.0));
        let far = inverse.project_point3(DVec3::new(pointer_ndc.x, pointer_ndc.y, 1.0));
        if !near.is_finite() || !far.is_finite() {
            return None;
        }
        self.intersect(camera.position, far - near)
    }
}
