//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Observable phase of the impact state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactPhase {
    /// No asteroid in flight and no crater growing.
    #[default]
    Idle,
    /// Asteroid travelling toward the waypoint.
    InFlight,
    /// Asteroid arrived; crater depth is animating.
    Cratering,
}

/// Pointer button reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// How longitude is derived from a scene-space point.
///
/// The two signs put a click in opposite hemispheres east/west of the prime
/// meridian. The convention is chosen once per engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LongitudeConvention {
    /// lon = atan2(z, x)
    #[default]
    Atan2ZX,
    /// lon = -atan2(z, x)
    NegatedAtan2ZX,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
