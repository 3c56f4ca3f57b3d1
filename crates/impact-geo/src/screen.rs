//! Mapping between scene space, normalized device coordinates and viewport pixels.

use glam::{DVec2, DVec3};

use impact_core::types::{Camera, ScreenPosition, Viewport};

/// Project a scene-space point to viewport pixels through the current camera.
///
/// Camera and viewport change between frames, so callers recompute this every tick.
/// Points behind the camera still map somewhere; hosts hide labels using the
/// NDC depth if they care.
pub fn to_screen_position(point: DVec3, camera: &Camera, viewport: &Viewport) -> ScreenPosition {
    let ndc = camera.view_projection(viewport).project_point3(point);
    ScreenPosition::new(
        (ndc.x + 1.0) / 2.0 * viewport.width,
        (-ndc.y + 1.0) / 2.0 * viewport.height,
    )
}

/// Convert a pointer pixel position to NDC in [-1, 1], y up.
pub fn pointer_to_ndc(pointer: ScreenPosition, viewport: &Viewport) -> DVec2 {
    DVec2::new(
        pointer.x / viewport.width * 2.0 - 1.0,
        -(pointer.y / viewport.height) * 2.0 + 1.0,
    )
}
