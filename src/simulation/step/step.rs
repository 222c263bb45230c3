use super::perf_timer::elapsed_or_zero;
use super::step_physics::{process_roots, propagate_transforms, rebuild_candidates};
use super::{PerfTimer, WorldCore};

pub(super) fn step(world: &mut WorldCore) {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
        world.perf_stats.raycast_steps = world.raycast_steps;
    }
    world.raycast_steps = 0;
    world.counters.reset();
    let step_start = PerfTimer::start_if(perf_on);

    // Candidates first: every entity sees the same set this tick.
    rebuild_candidates(world);

    // In-place, registry order: later entities see earlier corrections.
    let (physics_ms, transform_ms) = process_roots(world);

    let prune_start = PerfTimer::start_if(perf_on);
    let pruned = world.registry.prune_destroyed();
    if pruned > 0 {
        log::trace!("pruned {} destroyed entities", pruned);
    }

    world.frame += 1;
    world.time += world.params.time_delta();

    if perf_on {
        let counters = world.counters;
        let stats = &mut world.perf_stats;
        stats.prune_ms = elapsed_or_zero(prune_start);
        stats.physics_ms = physics_ms;
        stats.transform_ms = transform_ms;
        stats.entity_count = world.registry.len() as u32;
        stats.root_count = world
            .registry
            .iter()
            .filter(|(_, e)| e.parent.is_none())
            .count() as u32;
        stats.candidate_count = world.candidates.len() as u32;
        stats.pruned = pruned as u32;
        stats.absorb_physics(counters);
        stats.step_ms = elapsed_or_zero(step_start);
    }
}

/// Paused frame: children follow their parents, nothing else moves.
pub(super) fn update_transforms_only(world: &mut WorldCore) {
    propagate_transforms(world);
}

pub(super) fn tick(world: &mut WorldCore, frame_ms: f64) -> u32 {
    let owed = world.clock.advance(frame_ms, world.paused);
    if world.paused {
        update_transforms_only(world);
        return 0;
    }
    for _ in 0..owed {
        step(world);
    }
    owed
}
