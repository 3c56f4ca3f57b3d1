//! Headless host for the impact globe.
//!
//! Wires configuration, logging and the background registry load around a
//! frame-loop thread running the engine.

pub mod config;
pub mod error;
pub mod game_loop;
pub mod state;

pub use impact_core as core;
