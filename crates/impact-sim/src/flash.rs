//! Expanding glow spawned at the impact point.

use glam::DVec3;

use impact_core::components::ImpactFlash;
use impact_core::constants::*;
use impact_core::state::FlashView;

/// Spawn a fresh flash at `center`.
pub fn spawn(center: DVec3) -> ImpactFlash {
    ImpactFlash {
        center,
        scale: 1.0,
        opacity: FLASH_INITIAL_OPACITY,
        age_ticks: 0,
    }
}

/// Grow and fade the flash by one tick. Returns `false` once it has faded out.
///
/// Opacity is derived from the age so the last tick lands exactly on zero.
pub fn advance(flash: &mut ImpactFlash) -> bool {
    flash.age_ticks += 1;
    flash.scale += FLASH_GROWTH_PER_TICK;
    if flash.age_ticks >= FLASH_LIFETIME_TICKS {
        flash.opacity = 0.0;
        return false;
    }
    flash.opacity =
        (FLASH_INITIAL_OPACITY - FLASH_FADE_PER_TICK * flash.age_ticks as f64).max(0.0);
    true
}

pub fn view(flash: &ImpactFlash) -> FlashView {
    FlashView {
        center: flash.center,
        radius: FLASH_BASE_RADIUS * flash.scale,
        opacity: flash.opacity,
    }
}
