use crate::core::error::EngineResult;
use crate::core::rng::Rng;
use crate::domain::config::SimulationParams;

use super::clock::FixedStepClock;
use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn load_params_json(world: &mut WorldCore, json: &str) -> EngineResult<()> {
    let params = SimulationParams::from_json(json).map_err(|e| {
        log::warn!("rejected simulation params: {}", e);
        e
    })?;
    world.clock = FixedStepClock::new(params.frame_rate, params.max_catch_up_ms);
    world.rng = Rng::new(params.rng_seed);
    world.params = params;
    Ok(())
}

pub(super) fn set_gravity(world: &mut WorldCore, gravity: f32) {
    world.params.gravity = gravity;
}

pub(super) fn set_max_speed(world: &mut WorldCore, max_speed: f32) {
    world.params.max_speed = max_speed.max(0.0);
}

pub(super) fn set_physics_enabled(world: &mut WorldCore, enabled: bool) {
    world.params.physics_enabled = enabled;
}

pub(super) fn set_frame_rate(world: &mut WorldCore, frame_rate: f32) {
    if frame_rate > 0.0 {
        world.params.frame_rate = frame_rate;
        world.clock.set_frame_rate(frame_rate);
    } else {
        log::warn!("ignored non-positive frame rate {}", frame_rate);
    }
}

pub(super) fn set_paused(world: &mut WorldCore, paused: bool) {
    world.paused = paused;
}

pub(super) fn set_debug(world: &mut WorldCore, physics: bool, raycast: bool) {
    world.params.debug_physics = physics;
    world.params.debug_raycast = raycast;
    if !physics && !raycast {
        world.debug.clear();
    }
}

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}
