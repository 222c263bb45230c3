use crate::systems::physics::{update_physics, PhysicsContext};
use crate::systems::transform::update_transforms;

use super::{PerfTimer, WorldCore};

/// Snapshot the entities that take part in object collision this tick.
pub(super) fn rebuild_candidates(world: &mut WorldCore) {
    let WorldCore { registry, candidates, .. } = world;
    candidates.clear();
    candidates.extend(
        registry
            .iter()
            .filter(|(_, e)| !e.destroyed && e.collision.collide_solid_objects)
            .map(|(id, _)| id),
    );
}

/// Physics then transforms for every live root, in registry order.
/// Returns `(physics_ms, transform_ms)`, zero when perf is off.
pub(super) fn process_roots(world: &mut WorldCore) -> (f64, f64) {
    let perf_on = world.perf_enabled;
    let WorldCore {
        registry,
        tiles,
        params,
        candidates,
        rng,
        debug,
        counters,
        ..
    } = world;

    let mut physics_ms = 0.0;
    let mut transform_ms = 0.0;

    let mut i = 0;
    while i < registry.ids().len() {
        let id = registry.ids()[i];
        i += 1;

        let is_root = registry
            .get(id)
            .map_or(false, |e| !e.destroyed && e.parent.is_none());
        if !is_root {
            continue;
        }

        let t0 = PerfTimer::start_if(perf_on);
        let mut ctx = PhysicsContext {
            registry: &mut *registry,
            tiles: &*tiles,
            candidates: candidates.as_slice(),
            params: &*params,
            rng: &mut *rng,
            debug: &mut *debug,
            counters: &mut *counters,
        };
        update_physics(&mut ctx, id);
        if let Some(t0) = t0 {
            physics_ms += t0.elapsed_ms();
        }

        let t1 = PerfTimer::start_if(perf_on);
        update_transforms(registry, id);
        if let Some(t1) = t1 {
            transform_ms += t1.elapsed_ms();
        }
    }

    (physics_ms, transform_ms)
}

/// Transform propagation for every live root without any physics.
pub(super) fn propagate_transforms(world: &mut WorldCore) {
    let registry = &mut world.registry;
    let mut i = 0;
    while i < registry.ids().len() {
        let id = registry.ids()[i];
        i += 1;
        if registry.get(id).map_or(false, |e| !e.destroyed && e.parent.is_none()) {
            update_transforms(registry, id);
        }
    }
}
