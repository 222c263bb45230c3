//! Read-only spatial queries over live entities and the tile layer.
//!
//! Entity queries scan the registry in order; with the `parallel` feature
//! the scan runs on rayon's order-preserving iterators, so results are the
//! same either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::math::{is_intersecting, is_overlapping, Vec2};
use crate::domain::entity::{Entity, EntityId};
use crate::domain::registry::EntityRegistry;
use crate::spatial::TileRaycast;
use crate::systems::debug::{COLOR_HIT, COLOR_MISS};

use super::WorldCore;

/// Live entities matching `keep`, in registry order.
fn collect_where<F>(registry: &EntityRegistry, keep: F) -> Vec<EntityId>
where
    F: Fn(&Entity) -> bool + Sync + Send,
{
    let ids = registry.ids();

    #[cfg(feature = "parallel")]
    {
        ids.par_iter()
            .copied()
            .filter(|&id| registry.get(id).map_or(false, |e| !e.destroyed && keep(e)))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        ids.iter()
            .copied()
            .filter(|&id| registry.get(id).map_or(false, |e| !e.destroyed && keep(e)))
            .collect()
    }
}

/// Entities whose box overlaps the box `pos ± size/2`.
pub(super) fn collect_in_box(world: &WorldCore, pos: Vec2, size: Vec2) -> Vec<EntityId> {
    collect_where(&world.registry, |e| is_overlapping(pos, size, e.pos, e.size))
}

/// Entities whose center lies within `radius` of `pos`.
pub(super) fn collect_in_radius(world: &WorldCore, pos: Vec2, radius: f32) -> Vec<EntityId> {
    let radius_sq = radius * radius;
    collect_where(&world.registry, |e| e.pos.distance_squared(pos) < radius_sq)
}

/// Raycast-visible entities whose box the segment touches.
pub(super) fn raycast_entities(world: &mut WorldCore, start: Vec2, end: Vec2) -> Vec<EntityId> {
    let hits = collect_where(&world.registry, |e| {
        e.collision.collide_raycast && is_intersecting(start, end, e.pos, e.size)
    });

    if world.params.debug_raycast {
        let color = if hits.is_empty() { COLOR_MISS } else { COLOR_HIT };
        world.debug.line(start, end, color, 0.02);
        for &id in &hits {
            if let Some(e) = world.registry.get(id) {
                world.debug.rect(e.pos, e.size, color);
            }
        }
    }
    hits
}

/// Tile raycast, optionally filtered through `filter`'s collision policy.
pub(super) fn tile_raycast(
    world: &mut WorldCore,
    start: Vec2,
    end: Vec2,
    filter: Option<EntityId>,
) -> TileRaycast {
    let entity = filter.and_then(|id| world.registry.get(id));
    let result = world.tiles.raycast_detailed(start, end, entity);
    world.raycast_steps = world.raycast_steps.saturating_add(result.steps);

    if world.params.debug_raycast {
        match result.hit {
            Some(hit) => {
                world.debug.line(start, hit.pos, COLOR_HIT, 0.02);
                world.debug.rect(hit.pos, Vec2::ONE, COLOR_HIT);
            }
            None => world.debug.line(start, end, COLOR_MISS, 0.02),
        }
    }
    result
}

/// Region test, optionally filtered through `filter`'s collision policy.
pub(super) fn tile_region_test(world: &WorldCore, pos: Vec2, size: Vec2, filter: Option<EntityId>) -> bool {
    let entity = filter.and_then(|id| world.registry.get(id));
    world.tiles.region_test(pos, size, entity)
}
