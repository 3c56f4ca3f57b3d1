//! Events emitted by the simulation for the scene graph and UI.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::AlertLevel;

/// Scene changes the host must mirror, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Remove the previous pin and label.
    MarkerRemoved,
    /// Add a pin and label for the new waypoint.
    MarkerPlaced {
        position: DVec3,
        pin_position: DVec3,
        label: String,
    },
    /// Add the asteroid mesh.
    ProjectileLaunched { origin: DVec3, target: DVec3 },
    /// Remove a still-flying asteroid (superseded by a new launch).
    ProjectileDiscarded,
    /// Asteroid reached the surface; crater seeded.
    Impact {
        center: DVec3,
        lat: f64,
        lon: f64,
        crater_radius: f64,
    },
    /// Crater reached its final depth.
    CraterSettled { depth: f64 },
    /// Impact glow faded out; remove its mesh.
    FlashExpired,
    /// Location data became available.
    RegistryLoaded { count: usize },
}

/// Alert for the UI alert queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
