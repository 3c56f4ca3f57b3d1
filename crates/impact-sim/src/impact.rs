//! Asteroid flight and crater growth state machine.
//!
//! `Idle → InFlight → Cratering → Idle`. A launch from any state discards
//! whatever was in progress and starts a fresh flight. The crater itself lives
//! in the [`SurfaceModel`] and outlasts the `Cratering` phase.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use impact_core::components::Projectile;
use impact_core::constants::*;
use impact_core::enums::ImpactPhase;
use impact_core::events::SimEvent;
use impact_core::types::SurfacePoint;

use crate::error::SimError;
use crate::surface::SurfaceModel;

/// Flight parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactTuning {
    /// Spawn distance from the camera along camera→target.
    pub standoff: f64,
    /// Scene units per tick.
    pub speed: f64,
    /// Remaining distance that counts as arrival.
    pub arrival_threshold: f64,
}

impl Default for ImpactTuning {
    fn default() -> Self {
        Self {
            standoff: PROJECTILE_STANDOFF,
            speed: PROJECTILE_SPEED,
            arrival_threshold: ARRIVAL_THRESHOLD,
        }
    }
}

/// Current machine state. The projectile only exists while in flight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ImpactState {
    #[default]
    Idle,
    InFlight {
        projectile: Projectile,
    },
    Cratering,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpactStep {
    Idle,
    Travelling,
    /// Asteroid arrived this tick; crater seeded at the point.
    Impacted(SurfacePoint),
    Growing,
    /// Crater reached full depth this tick.
    Settled,
}

#[derive(Debug, Clone, Default)]
pub struct ImpactSimulator {
    state: ImpactState,
    tuning: ImpactTuning,
}

impl ImpactSimulator {
    pub fn new(tuning: ImpactTuning) -> Self {
        Self {
            state: ImpactState::Idle,
            tuning,
        }
    }

    pub fn state(&self) -> &ImpactState {
        &self.state
    }

    pub fn phase(&self) -> ImpactPhase {
        match self.state {
            ImpactState::Idle => ImpactPhase::Idle,
            ImpactState::InFlight { .. } => ImpactPhase::InFlight,
            ImpactState::Cratering => ImpactPhase::Cratering,
        }
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        match &self.state {
            ImpactState::InFlight { projectile } => Some(projectile),
            _ => None,
        }
    }

    pub fn tuning(&self) -> &ImpactTuning {
        &self.tuning
    }

    /// Start a new flight toward `target`, spawned ahead of the camera.
    ///
    /// Any projectile in flight is discarded and a growing crater is frozen at
    /// its current depth until the new impact replaces it. A camera sitting
    /// exactly on the target leaves the machine untouched.
    pub fn launch(
        &mut self,
        target: SurfacePoint,
        camera_position: DVec3,
        surface: &mut SurfaceModel,
        events: &mut Vec<SimEvent>,
    ) -> Result<(), SimError> {
        let dir = (target.position() - camera_position)
            .try_normalize()
            .ok_or(SimError::DegenerateLaunch)?;

        match self.state {
            ImpactState::InFlight { .. } => events.push(SimEvent::ProjectileDiscarded),
            ImpactState::Cratering => surface.freeze_crater(),
            ImpactState::Idle => {}
        }

        let projectile = Projectile {
            position: camera_position + dir * self.tuning.standoff,
            target,
            speed: self.tuning.speed,
        };
        events.push(SimEvent::ProjectileLaunched {
            origin: projectile.position,
            target: target.position(),
        });
        tracing::info!(
            lat = target.lat(),
            lon = target.lon(),
            distance = projectile.remaining_distance(),
            "asteroid launched"
        );

        self.state = ImpactState::InFlight { projectile };
        Ok(())
    }

    /// Advance one tick.
    pub fn tick(&mut self, surface: &mut SurfaceModel, events: &mut Vec<SimEvent>) -> ImpactStep {
        match &mut self.state {
            ImpactState::Idle => ImpactStep::Idle,
            ImpactState::InFlight { projectile } => {
                if advance_projectile(projectile, self.tuning.arrival_threshold) {
                    return ImpactStep::Travelling;
                }

                let target = projectile.target;
                let crater = surface.seed_crater(target);
                events.push(SimEvent::Impact {
                    center: target.position(),
                    lat: target.lat(),
                    lon: target.lon(),
                    crater_radius: crater.radius,
                });
                tracing::info!(
                    lat = target.lat(),
                    lon = target.lon(),
                    radius = crater.radius,
                    "asteroid impact"
                );
                self.state = ImpactState::Cratering;
                ImpactStep::Impacted(target)
            }
            ImpactState::Cratering => {
                if surface.grow_crater() {
                    let depth = surface.crater().map_or(0.0, |c| c.current_depth);
                    events.push(SimEvent::CraterSettled { depth });
                    tracing::debug!(depth, "crater settled");
                    self.state = ImpactState::Idle;
                    return ImpactStep::Settled;
                }
                if surface.crater().is_some_and(|c| c.growing) {
                    ImpactStep::Growing
                } else {
                    // Nothing left to animate.
                    self.state = ImpactState::Idle;
                    ImpactStep::Idle
                }
            }
        }
    }
}

/// Move toward the target along a direction recomputed from the current
/// position. Returns `false` once within the arrival threshold.
///
/// The step is capped at the remaining distance so the asteroid cannot
/// overshoot and oscillate around a target it never gets within range of.
fn advance_projectile(projectile: &mut Projectile, arrival_threshold: f64) -> bool {
    let to_target = projectile.target.position() - projectile.position;
    let distance = to_target.length();
    if distance <= arrival_threshold {
        return false;
    }
    let step = projectile.speed.min(distance);
    projectile.position += to_target / distance * step;
    true
}
