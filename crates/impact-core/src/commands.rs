//! Host commands sent to the simulation.
//!
//! Commands are queued and processed in arrival order at the next tick boundary.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::PointerButton;

/// All host inputs the engine understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GlobeCommand {
    // --- Pointer ---
    /// Pointer pressed over the canvas.
    PointerDown {
        button: PointerButton,
        x: f64,
        y: f64,
        timestamp_ms: u64,
    },
    /// Pointer released over the canvas. A quick release is a click.
    PointerUp {
        button: PointerButton,
        x: f64,
        y: f64,
        timestamp_ms: u64,
    },

    // --- Controls ---
    /// Launch button pressed.
    LaunchAsteroid,
    /// Topography slider moved.
    SetTopographyScale { scale: f64 },

    // --- View ---
    /// Orbit controls moved the camera.
    SetCamera { position: DVec3, target: DVec3 },
    /// Host window resized.
    ResizeViewport { width: f64, height: f64 },
}
