//! Globe engine: the headless core behind the interactive globe.
//!
//! `GlobeEngine` owns the surface model, the impact state machine and the
//! interaction controller. Host input arrives as queued `GlobeCommand`s and
//! each `tick()` returns a `GlobeSnapshot` for the renderer. No rendering or
//! windowing dependency, so whole sessions replay deterministically in tests.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use impact_core::commands::GlobeCommand;
use impact_core::components::ImpactFlash;
use impact_core::constants::*;
use impact_core::enums::{AlertLevel, ImpactPhase, LongitudeConvention, PointerButton};
use impact_core::events::{Alert, SimEvent};
use impact_core::state::GlobeSnapshot;
use impact_core::types::{Camera, ScreenPosition, SimTime, Viewport};
use impact_geo::{LocationRegistry, Raycaster, SphereRaycaster};

use crate::flash;
use crate::impact::{ImpactSimulator, ImpactStep, ImpactTuning};
use crate::interaction::{InteractionController, PickContext};
use crate::snapshot::{self, SnapshotInputs};
use crate::surface::SurfaceModel;

/// Configuration for a new engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reference sphere radius used for picking.
    pub earth_radius: f64,
    /// Initial topography slider value.
    pub initial_base_scale: f64,
    pub longitude_convention: LongitudeConvention,
    /// Press-to-release time above which a release is a drag.
    pub drag_threshold_ms: u64,
    pub tuning: ImpactTuning,
    pub camera: Camera,
    pub viewport: Viewport,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            earth_radius: EARTH_RADIUS,
            initial_base_scale: TOPOGRAPHY_SCALE_DEFAULT,
            longitude_convention: LongitudeConvention::default(),
            drag_threshold_ms: DRAG_THRESHOLD_MS,
            tuning: ImpactTuning::default(),
            camera: Camera::default(),
            viewport: Viewport::default(),
        }
    }
}

pub struct GlobeEngine<R = SphereRaycaster> {
    time: SimTime,
    camera: Camera,
    viewport: Viewport,
    raycaster: R,
    registry: Option<Arc<LocationRegistry>>,
    surface: SurfaceModel,
    simulator: ImpactSimulator,
    interaction: InteractionController,
    flash: Option<ImpactFlash>,
    command_queue: VecDeque<GlobeCommand>,
    events: Vec<SimEvent>,
    alerts: Vec<Alert>,
}

impl GlobeEngine<SphereRaycaster> {
    /// Engine picking against an analytic sphere of `config.earth_radius`.
    pub fn new(config: EngineConfig) -> Self {
        let raycaster = SphereRaycaster::new(config.earth_radius);
        Self::with_raycaster(config, raycaster)
    }
}

impl<R: Raycaster> GlobeEngine<R> {
    /// Engine using a host-provided raycaster, e.g. the renderer's mesh picker.
    pub fn with_raycaster(config: EngineConfig, raycaster: R) -> Self {
        Self {
            time: SimTime::default(),
            camera: config.camera,
            viewport: config.viewport,
            raycaster,
            registry: None,
            surface: SurfaceModel::new(config.initial_base_scale),
            simulator: ImpactSimulator::new(config.tuning),
            interaction: InteractionController::new(
                config.drag_threshold_ms,
                config.longitude_convention,
            ),
            flash: None,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            alerts: Vec::new(),
        }
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: GlobeCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = GlobeCommand>) {
        self.command_queue.extend(commands);
    }

    /// Make location data available to later clicks.
    ///
    /// Waypoints placed before this keep the label they were given.
    pub fn install_registry(&mut self, registry: impl Into<Arc<LocationRegistry>>) {
        let registry = registry.into();
        let count = registry.len();
        self.registry = Some(registry);
        self.events.push(SimEvent::RegistryLoaded { count });
        tracing::debug!(count, "registry installed");
    }

    /// Queue an alert for the next snapshot and log it.
    pub fn report_alert(&mut self, level: AlertLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            AlertLevel::Info => tracing::info!(tick = self.time.tick, "{message}"),
            AlertLevel::Warning => tracing::warn!(tick = self.time.tick, "{message}"),
            AlertLevel::Critical => tracing::error!(tick = self.time.tick, "{message}"),
        }
        self.alerts.push(Alert {
            level,
            message,
            tick: self.time.tick,
        });
    }

    /// Advance one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GlobeSnapshot {
        self.process_commands();
        self.run_systems();
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        let alerts = std::mem::take(&mut self.alerts);
        snapshot::build_snapshot(
            SnapshotInputs {
                time: &self.time,
                simulator: &self.simulator,
                surface: &self.surface,
                waypoint: self.interaction.waypoint(),
                flash: self.flash.as_ref(),
                camera: &self.camera,
                viewport: &self.viewport,
                registry_ready: self.registry.is_some(),
            },
            events,
            alerts,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn phase(&self) -> ImpactPhase {
        self.simulator.phase()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn surface(&self) -> &SurfaceModel {
        &self.surface
    }

    pub fn simulator(&self) -> &ImpactSimulator {
        &self.simulator
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn flash(&self) -> Option<&ImpactFlash> {
        self.flash.as_ref()
    }

    pub fn registry(&self) -> Option<&LocationRegistry> {
        self.registry.as_deref()
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: GlobeCommand) {
        match command {
            GlobeCommand::PointerDown {
                button: PointerButton::Primary,
                timestamp_ms,
                ..
            } => self.interaction.on_primary_press(timestamp_ms),
            GlobeCommand::PointerUp {
                button: PointerButton::Primary,
                x,
                y,
                timestamp_ms,
            } => {
                let ctx = PickContext {
                    camera: &self.camera,
                    viewport: &self.viewport,
                    raycaster: &self.raycaster,
                    registry: self.registry.as_deref(),
                };
                let result = self.interaction.on_primary_release(
                    timestamp_ms,
                    ScreenPosition::new(x, y),
                    &ctx,
                    &mut self.events,
                );
                if let Err(err) = result {
                    self.report_alert(AlertLevel::Warning, format!("click ignored: {err}"));
                }
            }
            // Only the primary button selects.
            GlobeCommand::PointerDown { .. } | GlobeCommand::PointerUp { .. } => {}
            GlobeCommand::LaunchAsteroid => {
                let result = self.interaction.on_launch_requested(
                    &mut self.simulator,
                    self.camera.position,
                    &mut self.surface,
                    &mut self.events,
                );
                if let Err(err) = result {
                    self.report_alert(AlertLevel::Warning, format!("launch ignored: {err}"));
                }
            }
            GlobeCommand::SetTopographyScale { scale } => {
                self.surface.set_base_scale(scale);
            }
            GlobeCommand::SetCamera { position, target } => {
                if is_usable_pose(position, target, self.camera.up) {
                    self.camera.position = position;
                    self.camera.target = target;
                } else {
                    self.report_alert(AlertLevel::Warning, "camera update ignored: degenerate pose");
                }
            }
            GlobeCommand::ResizeViewport { width, height } => {
                if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
                    self.viewport = Viewport::new(width, height);
                } else {
                    tracing::warn!(width, height, "ignoring collapsed viewport");
                }
            }
        }
    }

    fn run_systems(&mut self) {
        // 1. Fade the glow from an earlier impact
        if let Some(glow) = self.flash.as_mut() {
            if !flash::advance(glow) {
                self.flash = None;
                self.events.push(SimEvent::FlashExpired);
            }
        }
        // 2. Flight / crater growth
        let step = self.simulator.tick(&mut self.surface, &mut self.events);
        // 3. New impact spawns a fresh glow
        if let ImpactStep::Impacted(point) = step {
            if self.flash.replace(flash::spawn(point.position())).is_some() {
                self.events.push(SimEvent::FlashExpired);
            }
        }
    }
}

/// Whether `look_at_rh` can build a view: finite, distinct points, and a view
/// direction not parallel to `up`.
fn is_usable_pose(position: DVec3, target: DVec3, up: DVec3) -> bool {
    if !(position.is_finite() && target.is_finite()) {
        return false;
    }
    let Some(forward) = (target - position).try_normalize() else {
        return false;
    };
    forward.cross(up.normalize_or_zero()).length_squared() > 1e-12
}
