//! Tests for the globe engine: picking, launch, crater growth and snapshots.

use glam::{DVec2, DVec3};

use impact_core::commands::GlobeCommand;
use impact_core::constants::*;
use impact_core::enums::*;
use impact_core::events::SimEvent;
use impact_core::state::GlobeSnapshot;
use impact_core::types::{Camera, Viewport};
use impact_geo::{from_lat_lon, LocationRecord, LocationRegistry, Raycaster};
use pretty_assertions::assert_eq;

use crate::engine::{EngineConfig, GlobeEngine};

fn press(button: PointerButton, timestamp_ms: u64) -> GlobeCommand {
    let vp = Viewport::default();
    GlobeCommand::PointerDown {
        button,
        x: vp.width / 2.0,
        y: vp.height / 2.0,
        timestamp_ms,
    }
}

fn release(button: PointerButton, timestamp_ms: u64) -> GlobeCommand {
    let vp = Viewport::default();
    GlobeCommand::PointerUp {
        button,
        x: vp.width / 2.0,
        y: vp.height / 2.0,
        timestamp_ms,
    }
}

/// Click the middle of the viewport.
fn click_center(timestamp_ms: u64) -> [GlobeCommand; 2] {
    [
        press(PointerButton::Primary, timestamp_ms),
        release(PointerButton::Primary, timestamp_ms + 50),
    ]
}

/// Camera looking straight down at `lat`/`lon`.
fn look_at(lat: f64, lon: f64) -> GlobeCommand {
    let surface = from_lat_lon(lat, lon, EARTH_RADIUS, LongitudeConvention::Atan2ZX);
    GlobeCommand::SetCamera {
        position: surface.normalize() * CAMERA_DEFAULT_DISTANCE,
        target: DVec3::ZERO,
    }
}

fn registry() -> LocationRegistry {
    LocationRegistry::from_records([
        LocationRecord::new("Testland", 0.0, 0.0),
        LocationRecord::new("Zland", 0.0, 90.0),
        LocationRecord::new("Northwest", 44.0, -91.0),
    ])
}

/// Tick until the predicate holds, failing after `limit` ticks.
fn tick_until(
    engine: &mut GlobeEngine,
    limit: usize,
    mut done: impl FnMut(&GlobeSnapshot) -> bool,
) -> Vec<GlobeSnapshot> {
    let mut seen = Vec::new();
    for _ in 0..limit {
        let snap = engine.tick();
        let stop = done(&snap);
        seen.push(snap);
        if stop {
            return seen;
        }
    }
    panic!("condition not reached within {limit} ticks");
}

// ---- Tick timing ----

#[test]
fn test_tick_timing_60_ticks_one_second() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    for _ in 0..TICK_RATE {
        engine.tick();
    }
    assert_eq!(engine.time().tick, TICK_RATE as u64);
    assert!(
        (engine.time().elapsed_secs - 1.0).abs() < 1e-10,
        "60 ticks should equal 1.0 seconds, got {}",
        engine.time().elapsed_secs
    );
}

// ---- Waypoint selection ----

#[test]
fn test_click_labels_lat_lon_and_nearest_country() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.install_registry(registry());
    engine.queue_command(look_at(45.0, -90.0));
    engine.queue_commands(click_center(0));
    let snap = engine.tick();

    let waypoint = snap.waypoint.expect("waypoint placed");
    assert_eq!(waypoint.label, "Lat:45.00°, Lon:-90.00°\nNorthwest");
    assert_eq!(waypoint.location, "Northwest");
    assert!((waypoint.position.length() - EARTH_RADIUS).abs() < 1e-6);
    assert!((waypoint.pin_position.y - waypoint.position.y - PIN_HEIGHT / 2.0).abs() < 1e-9);
    // Label anchored at the middle of the screen, where the click was.
    assert!((waypoint.screen.x - VIEWPORT_DEFAULT_WIDTH / 2.0).abs() < 1e-6);
    assert!((waypoint.screen.y - VIEWPORT_DEFAULT_HEIGHT / 2.0).abs() < 1e-6);
    assert!(snap.registry_ready);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::RegistryLoaded { count: 3 })));
}

#[test]
fn test_click_before_registry_is_unknown() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_commands(click_center(0));
    let snap = engine.tick();
    assert!(!snap.registry_ready);
    let waypoint = snap.waypoint.unwrap();
    assert_eq!(waypoint.location, UNKNOWN_LOCATION);
    assert!(waypoint.label.ends_with("Lon:90.00°\nUnknown"), "{}", waypoint.label);

    // Later clicks pick up the registry.
    engine.install_registry(registry());
    engine.queue_commands(click_center(1_000));
    let snap = engine.tick();
    assert_eq!(snap.waypoint.unwrap().location, "Zland");
    assert!(matches!(
        snap.events[..],
        [
            SimEvent::RegistryLoaded { .. },
            SimEvent::MarkerRemoved,
            SimEvent::MarkerPlaced { .. }
        ]
    ));
}

#[test]
fn test_drag_does_not_select() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_command(press(PointerButton::Primary, 0));
    engine.queue_command(release(PointerButton::Primary, DRAG_THRESHOLD_MS + 150));
    let snap = engine.tick();
    assert!(snap.waypoint.is_none());
    assert!(snap.events.is_empty());
}

#[test]
fn test_secondary_button_ignored() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_command(press(PointerButton::Secondary, 0));
    engine.queue_command(release(PointerButton::Secondary, 20));
    engine.queue_command(release(PointerButton::Primary, 40));
    let snap = engine.tick();
    assert!(snap.waypoint.is_none());
}

#[test]
fn test_click_off_globe_keeps_previous_waypoint() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_commands(click_center(0));
    engine.tick();

    engine.queue_command(GlobeCommand::PointerDown {
        button: PointerButton::Primary,
        x: 0.0,
        y: 0.0,
        timestamp_ms: 500,
    });
    engine.queue_command(GlobeCommand::PointerUp {
        button: PointerButton::Primary,
        x: 0.0,
        y: 0.0,
        timestamp_ms: 520,
    });
    let snap = engine.tick();
    assert!(snap.events.is_empty());
    assert!((snap.waypoint.unwrap().lon - 90.0).abs() < 1e-6);
}

/// Stand-in for a renderer mesh picker that always hits the same point.
struct FixedPicker(DVec3);

impl Raycaster for FixedPicker {
    fn raycast(&self, _: DVec2, _: &Camera, _: &Viewport) -> Option<DVec3> {
        Some(self.0)
    }
}

#[test]
fn test_host_raycaster_and_negated_longitude() {
    let config = EngineConfig {
        longitude_convention: LongitudeConvention::NegatedAtan2ZX,
        ..Default::default()
    };
    let mut engine = GlobeEngine::with_raycaster(config, FixedPicker(DVec3::Z * EARTH_RADIUS));
    engine.queue_commands(click_center(0));
    let waypoint = engine.tick().waypoint.unwrap();
    assert!((waypoint.lon + 90.0).abs() < 1e-9);
    assert!(waypoint.lat.abs() < 1e-9);
}

#[test]
fn test_degenerate_hit_raises_alert() {
    let mut engine = GlobeEngine::with_raycaster(EngineConfig::default(), FixedPicker(DVec3::ZERO));
    engine.queue_commands(click_center(0));
    let snap = engine.tick();
    assert!(snap.waypoint.is_none());
    assert_eq!(snap.alerts.len(), 1);
    assert_eq!(snap.alerts[0].level, AlertLevel::Warning);
}

// ---- Launch and impact ----

#[test]
fn test_launch_without_waypoint_is_noop() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_command(GlobeCommand::LaunchAsteroid);
    let snap = engine.tick();
    assert_eq!(snap.phase, ImpactPhase::Idle);
    assert!(snap.projectile.is_none());
    assert!(snap.events.is_empty());
    assert!(snap.alerts.is_empty());
}

#[test]
fn test_full_impact_sequence() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_commands(click_center(0));
    engine.queue_command(GlobeCommand::LaunchAsteroid);
    let first = engine.tick();
    assert_eq!(first.phase, ImpactPhase::InFlight);
    let projectile = first.projectile.unwrap();
    assert_eq!(projectile.radius, PROJECTILE_RADIUS);

    // Default camera is 2000 units from the target, spawn is 3000 beyond it.
    let flight = tick_until(&mut engine, 200, |s| s.phase == ImpactPhase::Cratering);
    let mut previous = projectile.remaining_distance;
    for snap in &flight[..flight.len() - 1] {
        let d = snap.projectile.as_ref().unwrap().remaining_distance;
        assert!(d < previous);
        previous = d;
    }

    let impact = flight.last().unwrap();
    assert!(impact.projectile.is_none());
    assert!(impact
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::Impact { crater_radius, .. } if *crater_radius == 40.0)));
    let crater = impact.crater.as_ref().unwrap();
    assert_eq!(crater.radius, TOPOGRAPHY_SCALE_DEFAULT * CRATER_RADIUS_FACTOR);
    assert_eq!(crater.current_depth, 0.0);
    assert!(crater.growing);
    assert_eq!(impact.uniforms.crater_radius, 40.0);
    let glow = impact.flash.as_ref().unwrap();
    assert_eq!(glow.opacity, FLASH_INITIAL_OPACITY);
    assert_eq!(glow.radius, FLASH_BASE_RADIUS);

    let mut last = engine.tick();
    for _ in 1..50 {
        last = engine.tick();
    }
    let crater = last.crater.unwrap();
    assert_eq!(crater.current_depth, CRATER_TARGET_DEPTH);
    assert!(!crater.growing);
    assert_eq!(last.phase, ImpactPhase::Idle);
    assert_eq!(last.uniforms.crater_depth, CRATER_TARGET_DEPTH);
}

#[test]
fn test_flash_expires() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_commands(click_center(0));
    engine.queue_command(GlobeCommand::LaunchAsteroid);
    tick_until(&mut engine, 200, |s| s.flash.is_some());

    let fade = tick_until(&mut engine, 100, |s| s.flash.is_none());
    assert_eq!(fade.len() as u32, FLASH_LIFETIME_TICKS);
    assert!(fade
        .last()
        .unwrap()
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::FlashExpired)));
}

#[test]
fn test_slider_changes_displacement_not_crater_radius() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_commands(click_center(0));
    engine.queue_command(GlobeCommand::LaunchAsteroid);
    tick_until(&mut engine, 200, |s| s.crater.is_some());

    engine.queue_command(GlobeCommand::SetTopographyScale { scale: 120.0 });
    let snap = engine.tick();
    assert_eq!(snap.uniforms.displacement_scale, 120.0);
    assert_eq!(snap.crater.unwrap().radius, 40.0);

    engine.queue_command(GlobeCommand::SetTopographyScale { scale: 9_000.0 });
    assert_eq!(engine.tick().uniforms.displacement_scale, TOPOGRAPHY_SCALE_MAX);
}

#[test]
fn test_new_impact_replaces_crater() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_commands(click_center(0));
    engine.queue_command(GlobeCommand::LaunchAsteroid);
    tick_until(&mut engine, 200, |s| s.crater.is_some());

    engine.queue_command(GlobeCommand::SetTopographyScale { scale: 25.0 });
    engine.queue_command(look_at(0.0, 0.0));
    engine.queue_commands(click_center(10_000));
    engine.queue_command(GlobeCommand::LaunchAsteroid);
    let relaunch = engine.tick();
    assert_eq!(relaunch.phase, ImpactPhase::InFlight);
    // Old crater frozen while the new asteroid flies.
    assert!(!relaunch.crater.as_ref().unwrap().growing);

    let flight = tick_until(&mut engine, 200, |s| s.phase == ImpactPhase::Cratering);
    let crater = flight.last().unwrap().crater.as_ref().unwrap();
    assert_eq!(crater.radius, 100.0);
    assert!(crater.lon.abs() < 1e-6);
    assert!(crater.lat.abs() < 1e-6);
}

#[test]
fn test_relaunch_in_flight_discards_projectile() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_commands(click_center(0));
    engine.queue_command(GlobeCommand::LaunchAsteroid);
    for _ in 0..10 {
        engine.tick();
    }
    engine.queue_command(GlobeCommand::LaunchAsteroid);
    let snap = engine.tick();
    assert!(matches!(
        snap.events[..],
        [SimEvent::ProjectileDiscarded, SimEvent::ProjectileLaunched { .. }]
    ));
    // Fresh projectile, moved one step from the standoff point.
    let d = snap.projectile.unwrap().remaining_distance;
    assert!((d - (3000.0 - PROJECTILE_SPEED)).abs() < 1e-6);
}

// ---- View ----

#[test]
fn test_degenerate_camera_rejected() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_command(GlobeCommand::SetCamera {
        position: DVec3::ZERO,
        target: DVec3::ZERO,
    });
    engine.queue_command(GlobeCommand::ResizeViewport {
        width: 0.0,
        height: 480.0,
    });
    let snap = engine.tick();
    assert_eq!(snap.alerts.len(), 1);
    assert_eq!(*engine.camera(), Camera::default());
    assert_eq!(*engine.viewport(), Viewport::default());
}

#[test]
fn test_camera_looking_along_up_rejected() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_commands(click_center(0));
    engine.tick();

    // Straight over the north pole the view direction is parallel to +Y.
    engine.queue_command(GlobeCommand::SetCamera {
        position: DVec3::new(0.0, CAMERA_DEFAULT_DISTANCE, 0.0),
        target: DVec3::ZERO,
    });
    let snap = engine.tick();
    assert_eq!(snap.alerts.len(), 1);
    assert_eq!(snap.alerts[0].level, AlertLevel::Warning);
    assert_eq!(*engine.camera(), Camera::default());
    let screen = snap.waypoint.unwrap().screen;
    assert!(screen.x.is_finite() && screen.y.is_finite(), "{screen:?}");

    // Clicks keep working from the previous pose.
    engine.queue_commands(click_center(1_000));
    let snap = engine.tick();
    assert!(matches!(
        snap.events[..],
        [SimEvent::MarkerRemoved, SimEvent::MarkerPlaced { .. }]
    ));

    // Slightly off the pole is a usable pose.
    engine.queue_command(GlobeCommand::SetCamera {
        position: DVec3::new(0.0, CAMERA_DEFAULT_DISTANCE, 1.0),
        target: DVec3::ZERO,
    });
    assert!(engine.tick().alerts.is_empty());
}

#[test]
fn test_label_follows_viewport_resize() {
    let mut engine = GlobeEngine::new(EngineConfig::default());
    engine.queue_commands(click_center(0));
    engine.tick();
    engine.queue_command(GlobeCommand::ResizeViewport {
        width: 800.0,
        height: 600.0,
    });
    let screen = engine.tick().waypoint.unwrap().screen;
    assert!((screen.x - 400.0).abs() < 1e-6);
    assert!((screen.y - 300.0).abs() < 1e-6);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_inputs() {
    let script = |engine: &mut GlobeEngine, tick: usize| match tick {
        0 => engine.install_registry(registry()),
        3 => engine.queue_commands(click_center(100)),
        5 => engine.queue_command(GlobeCommand::LaunchAsteroid),
        40 => engine.queue_command(GlobeCommand::SetTopographyScale { scale: 60.0 }),
        _ => {}
    };
    let mut engine_a = GlobeEngine::new(EngineConfig::default());
    let mut engine_b = GlobeEngine::new(EngineConfig::default());

    for tick in 0..200 {
        script(&mut engine_a, tick);
        script(&mut engine_b, tick);
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged at tick {tick}");
    }
    assert_eq!(engine_a.phase(), ImpactPhase::Idle);
    assert!(engine_a.surface().crater().is_some());
}
