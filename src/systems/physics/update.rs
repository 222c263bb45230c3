use crate::domain::entity::EntityId;
use crate::systems::debug::COLOR_HIT;

use super::collision::resolve_objects;
use super::forces::{apply_ground_friction, integrate};
use super::tiles::resolve_tiles;
use super::types::PhysicsContext;

/// Full physics update for one root entity:
/// clamp, damp, gravity, move, then ground friction, objects and tiles.
///
/// Children are skipped; their transform comes from the parent. Static
/// entities and a world with physics disabled stop after the move.
pub fn update_physics(ctx: &mut PhysicsContext<'_>, id: EntityId) {
    let params = ctx.params;
    let Some(entity) = ctx.registry.get_mut(id) else {
        return;
    };
    if entity.destroyed || entity.parent.is_some() {
        return;
    }

    let old_pos = integrate(entity, params);
    if !params.physics_enabled || entity.mass == 0.0 {
        return;
    }

    let falling = entity.velocity.y < 0.0;
    let flags = entity.collision;

    apply_ground_friction(ctx.registry, id);

    if flags.collide_solid_objects {
        resolve_objects(ctx, id, old_pos, falling);
    }

    if flags.collide_tiles {
        let Some(entity) = ctx.registry.get_mut(id) else {
            return;
        };
        let resolution = resolve_tiles(ctx.tiles, entity, old_pos, falling);
        if resolution.any() {
            ctx.counters.tile_blocks += 1;
            if params.debug_physics {
                ctx.debug.rect(entity.pos, entity.size, COLOR_HIT);
            }
        }
    }
}
