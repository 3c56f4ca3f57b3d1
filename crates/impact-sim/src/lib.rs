//! Simulation engine for the impact globe.
//!
//! Processes host input, runs the asteroid flight and crater growth at a
//! fixed tick rate, and produces `GlobeSnapshot`s for the renderer.

pub mod engine;
pub mod error;
pub mod flash;
pub mod impact;
pub mod interaction;
pub mod snapshot;
pub mod surface;

pub use engine::{EngineConfig, GlobeEngine};
pub use error::SimError;
pub use impact_core as core;
pub use impact_geo as geo;

#[cfg(test)]
mod tests;
