use crate::core::rng::Rng;
use crate::domain::config::SimulationParams;
use crate::domain::registry::EntityRegistry;
use crate::spatial::TileGrid;
use crate::systems::debug::DebugDraw;
use crate::systems::physics::PhysicsCounters;

use super::clock::FixedStepClock;
use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn create_world_core(width: u32, height: u32, params: SimulationParams) -> WorldCore {
    log::info!(
        "world created: {}x{} tiles, gravity {}, max speed {}, {} Hz",
        width,
        height,
        params.gravity,
        params.max_speed,
        params.frame_rate
    );

    WorldCore {
        registry: EntityRegistry::new(),
        tiles: TileGrid::new(width, height),
        candidates: Vec::with_capacity(64),
        counters: PhysicsCounters::default(),
        raycast_steps: 0,
        rng: Rng::new(params.rng_seed),
        clock: FixedStepClock::new(params.frame_rate, params.max_catch_up_ms),
        paused: false,
        frame: 0,
        time: 0.0,
        debug: DebugDraw::new(),
        // Start small; `extract_render` grows it on demand.
        render: Vec::with_capacity(64 * super::RENDER_STRIDE),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        params,
    }
}
