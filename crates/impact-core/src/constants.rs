//! Simulation constants and tuning parameters.
//!
//! Distances are in scene units (the reference sphere has radius 1000).

/// Simulation tick rate (Hz). One tick per rendered frame.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Globe ---

/// Radius of the reference (undeformed) sphere in scene units.
pub const EARTH_RADIUS: f64 = 1000.0;

/// Mean Earth radius in kilometers, used for great-circle distances.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

// --- Topography ---

/// Lower bound of the topography exaggeration slider.
pub const TOPOGRAPHY_SCALE_MIN: f64 = 0.0;

/// Upper bound of the topography exaggeration slider.
pub const TOPOGRAPHY_SCALE_MAX: f64 = 500.0;

/// Slider value at startup.
pub const TOPOGRAPHY_SCALE_DEFAULT: f64 = 10.0;

// --- Camera ---

/// Initial camera distance from the globe center along +Z.
pub const CAMERA_DEFAULT_DISTANCE: f64 = 3000.0;

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEG: f64 = 60.0;

/// Near clip plane.
pub const CAMERA_NEAR: f64 = 0.1;

/// Far clip plane.
pub const CAMERA_FAR: f64 = 100_000.0;

/// Default viewport width in pixels.
pub const VIEWPORT_DEFAULT_WIDTH: f64 = 1280.0;

/// Default viewport height in pixels.
pub const VIEWPORT_DEFAULT_HEIGHT: f64 = 720.0;

// --- Interaction ---

/// A press held longer than this is a drag (orbiting the camera), not a click.
pub const DRAG_THRESHOLD_MS: u64 = 200;

/// Height of the waypoint pin. The pin is lifted by half of it along +Y.
pub const PIN_HEIGHT: f64 = 30.0;

/// Label shown when no registry record is available.
pub const UNKNOWN_LOCATION: &str = "Unknown";

// --- Projectile ---

/// Distance from the camera, along camera→waypoint, at which the asteroid spawns.
pub const PROJECTILE_STANDOFF: f64 = 5000.0;

/// Asteroid speed in scene units per tick.
pub const PROJECTILE_SPEED: f64 = 50.0;

/// Remaining distance at which the asteroid counts as arrived.
pub const ARRIVAL_THRESHOLD: f64 = 10.0;

/// Radius of the asteroid mesh.
pub const PROJECTILE_RADIUS: f64 = 20.0;

// --- Crater ---

/// Crater radius = topography scale at impact × this factor.
pub const CRATER_RADIUS_FACTOR: f64 = 4.0;

/// Final crater depth.
pub const CRATER_TARGET_DEPTH: f64 = 50.0;

/// Depth added per tick while the crater is growing.
pub const CRATER_DEPTH_STEP: f64 = 1.0;

/// Depth at which the crater palette is fully saturated.
pub const CRATER_SHADE_REFERENCE_DEPTH: f64 = 50.0;

/// Maximum darkening applied at full crater depth.
pub const CRATER_SHADOW_STRENGTH: f64 = 0.5;

// --- Impact flash ---

/// Initial opacity of the impact glow.
pub const FLASH_INITIAL_OPACITY: f64 = 0.8;

/// Opacity lost per tick.
pub const FLASH_FADE_PER_TICK: f64 = 0.02;

/// Scale gained per tick.
pub const FLASH_GROWTH_PER_TICK: f64 = 0.5;

/// Radius of the glow mesh at scale 1.
pub const FLASH_BASE_RADIUS: f64 = 50.0;

/// Number of ticks until the glow is fully transparent.
pub const FLASH_LIFETIME_TICKS: u32 = 40;
