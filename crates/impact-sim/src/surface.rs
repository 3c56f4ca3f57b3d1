//! Surface model: topography exaggeration plus the live crater.
//!
//! The displacement and shading formulas are plain functions so the renderer
//! can run them per vertex/fragment (or port them to a shader) and tests can
//! check them directly. `SurfaceModel` owns the mutable parameters they read.

use glam::DVec3;

use impact_core::components::{CraterState, DisplacementParameters};
use impact_core::constants::*;
use impact_core::state::SurfaceUniforms;
use impact_core::types::SurfacePoint;

/// Linear RGB in [0, 1].
pub type Rgb = [f64; 3];

const CRATER_RIM_COLOR: Rgb = [0.6, 0.3, 0.1];
const CRATER_MID_COLOR: Rgb = [0.8, 0.2, 0.1];
const CRATER_HOT_COLOR: Rgb = [1.0, 0.8, 0.2];

/// Source of base topography, e.g. the red channel of the color map.
pub trait TopographySampler {
    /// Height sample in [0, 1] at texture coordinate `uv`.
    fn sample(&self, uv: [f64; 2]) -> f64;
}

/// Depth removed at `vertex` by the crater: parabolic from full depth at the
/// center to zero at the rim.
pub fn crater_effect(vertex: DVec3, crater: &CraterState) -> f64 {
    if crater.radius <= 0.0 {
        return 0.0;
    }
    let d = vertex.distance(crater.center.position());
    if d < crater.radius {
        let x = d / crater.radius;
        crater.current_depth * (1.0 - x * x)
    } else {
        0.0
    }
}

/// Net outward offset along the vertex normal. Negative inside a deep crater.
pub fn vertex_displacement(
    vertex: DVec3,
    base_sample: f64,
    params: &DisplacementParameters,
    crater: Option<&CraterState>,
) -> f64 {
    let base_height = base_sample * params.base_scale;
    let effect = crater.map_or(0.0, |c| crater_effect(vertex, c));
    base_height - effect
}

/// Vertex position after displacement along `normal`.
pub fn displaced_position(
    vertex: DVec3,
    normal: DVec3,
    base_sample: f64,
    params: &DisplacementParameters,
    crater: Option<&CraterState>,
) -> DVec3 {
    vertex + normal * vertex_displacement(vertex, base_sample, params, crater)
}

/// Fragment color for a given crater effect. Untouched outside the crater.
pub fn shade(base: Rgb, crater_effect: f64) -> Rgb {
    if crater_effect <= 0.0 {
        return base;
    }
    let t = (crater_effect / CRATER_SHADE_REFERENCE_DEPTH).clamp(0.0, 1.0);
    let s = smoothstep(0.0, 1.0, t);

    let palette = mix(CRATER_RIM_COLOR, CRATER_MID_COLOR, t);
    let palette = mix(palette, CRATER_HOT_COLOR, s);
    let color = mix(base, palette, t);

    let shadow = 1.0 - s * CRATER_SHADOW_STRENGTH;
    color.map(|c| c * shadow)
}

fn mix(a: Rgb, b: Rgb, t: f64) -> Rgb {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Mutable surface parameters read by the renderer every frame.
#[derive(Debug, Clone, Default)]
pub struct SurfaceModel {
    params: DisplacementParameters,
    crater: Option<CraterState>,
}

impl SurfaceModel {
    pub fn new(base_scale: f64) -> Self {
        let mut model = Self::default();
        model.set_base_scale(base_scale);
        model
    }

    pub fn params(&self) -> &DisplacementParameters {
        &self.params
    }

    pub fn crater(&self) -> Option<&CraterState> {
        self.crater.as_ref()
    }

    /// Slider input. Clamped to the slider range; non-finite input is ignored.
    pub fn set_base_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            tracing::warn!(scale, "ignoring non-finite topography scale");
            return;
        }
        self.params.base_scale = scale.clamp(TOPOGRAPHY_SCALE_MIN, TOPOGRAPHY_SCALE_MAX);
    }

    /// Replace any existing crater with a fresh one at `center`.
    ///
    /// The radius is captured from the current topography scale and does not
    /// follow later slider changes.
    pub fn seed_crater(&mut self, center: SurfacePoint) -> &CraterState {
        self.crater.insert(CraterState {
            center,
            radius: self.params.base_scale * CRATER_RADIUS_FACTOR,
            current_depth: 0.0,
            target_depth: CRATER_TARGET_DEPTH,
            growing: true,
        })
    }

    /// Advance the growth animation by one tick.
    ///
    /// Returns `true` on the tick the crater reaches its final depth.
    pub fn grow_crater(&mut self) -> bool {
        let Some(crater) = self.crater.as_mut() else {
            return false;
        };
        if !crater.growing {
            return false;
        }
        crater.current_depth = (crater.current_depth + CRATER_DEPTH_STEP).min(crater.target_depth);
        if crater.current_depth >= crater.target_depth {
            crater.growing = false;
            return true;
        }
        false
    }

    /// Stop the growth animation, keeping the current depth.
    pub fn freeze_crater(&mut self) {
        if let Some(crater) = self.crater.as_mut() {
            crater.growing = false;
        }
    }

    /// Displacement at a vertex using the live parameters.
    pub fn displacement_at(&self, vertex: DVec3, base_sample: f64) -> f64 {
        vertex_displacement(vertex, base_sample, &self.params, self.crater.as_ref())
    }

    /// Displacement at a vertex, sampling topography through the host sampler.
    pub fn displacement_with(
        &self,
        sampler: &dyn TopographySampler,
        vertex: DVec3,
        uv: [f64; 2],
    ) -> f64 {
        self.displacement_at(vertex, sampler.sample(uv))
    }

    /// Crater contribution at a vertex, for the fragment stage.
    pub fn crater_effect_at(&self, vertex: DVec3) -> f64 {
        self.crater.as_ref().map_or(0.0, |c| crater_effect(vertex, c))
    }

    /// Shader inputs for this frame.
    pub fn uniforms(&self) -> SurfaceUniforms {
        match &self.crater {
            Some(crater) => SurfaceUniforms {
                displacement_scale: self.params.base_scale,
                crater_position: crater.center.position(),
                crater_radius: crater.radius,
                crater_depth: crater.current_depth,
            },
            None => SurfaceUniforms {
                displacement_scale: self.params.base_scale,
                ..Default::default()
            },
        }
    }
}
