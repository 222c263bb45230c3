use crate::core::error::{EngineError, EngineResult};
use crate::core::math::Vec2;
use crate::domain::entity::{CollisionFlags, Entity, EntityId};
use crate::domain::registry::EntityRegistry;
use crate::systems::transform;

use super::WorldCore;

pub(super) fn spawn(world: &mut WorldCore, pos: Vec2, size: Vec2) -> EntityId {
    let entity = Entity::new(pos, size, &world.params.defaults);
    spawn_entity(world, entity)
}

pub(super) fn spawn_entity(world: &mut WorldCore, mut entity: Entity) -> EntityId {
    // links are only made through add_child
    entity.parent = None;
    entity.children.clear();
    entity.ground = None;
    entity.destroyed = false;
    entity.spawn_time = world.time;
    world.registry.insert(entity)
}

pub(super) fn destroy(world: &mut WorldCore, id: EntityId) -> bool {
    let parent = match world.registry.get(id) {
        Some(e) if !e.destroyed => e.parent,
        Some(_) => return false,
        None => {
            log::debug!("destroy on stale handle {:?}", id);
            return false;
        }
    };

    if let Some(parent) = parent {
        if let Some(p) = world.registry.get_mut(parent) {
            p.children.retain(|&c| c != id);
        }
        if let Some(e) = world.registry.get_mut(id) {
            e.parent = None;
        }
    }

    flag_subtree(&mut world.registry, id);
    true
}

fn flag_subtree(registry: &mut EntityRegistry, id: EntityId) {
    let Some(e) = registry.get_mut(id) else {
        return;
    };
    e.destroyed = true;

    let mut i = 0;
    while let Some(child) = registry.get(id).and_then(|e| e.children.get(i).copied()) {
        flag_subtree(registry, child);
        i += 1;
    }
}

pub(super) fn destroy_all(world: &mut WorldCore) {
    let ids = world.registry.ids().to_vec();
    for id in ids {
        if let Some(e) = world.registry.get_mut(id) {
            e.destroyed = true;
        }
    }
}

pub(super) fn add_child(
    world: &mut WorldCore,
    parent: EntityId,
    child: EntityId,
    local_pos: Vec2,
    local_angle: f32,
) -> EngineResult<()> {
    for id in [parent, child] {
        if world.registry.get(id).map_or(true, |e| e.destroyed) {
            log::warn!("add_child with dead handle {:?}", id);
            return Err(EngineError::InvalidHandle(id));
        }
    }
    transform::attach(&mut world.registry, parent, child, local_pos, local_angle).map_err(|e| {
        log::warn!("add_child rejected: {}", e);
        e
    })
}

pub(super) fn remove_child(world: &mut WorldCore, parent: EntityId, child: EntityId) -> EngineResult<()> {
    transform::detach(&mut world.registry, parent, child).map_err(|e| {
        log::warn!("remove_child rejected: {}", e);
        e
    })
}

pub(super) fn set_collision(world: &mut WorldCore, id: EntityId, flags: CollisionFlags) -> EngineResult<()> {
    world.live_entity_mut(id)?.set_collision_flags(flags);
    Ok(())
}

pub(super) fn set_velocity(world: &mut WorldCore, id: EntityId, velocity: Vec2) -> EngineResult<()> {
    world.live_entity_mut(id)?.velocity = velocity;
    Ok(())
}

pub(super) fn apply_force(world: &mut WorldCore, id: EntityId, force: Vec2) -> EngineResult<()> {
    world.live_entity_mut(id)?.apply_force(force);
    Ok(())
}

pub(super) fn apply_acceleration(world: &mut WorldCore, id: EntityId, acceleration: Vec2) -> EngineResult<()> {
    world.live_entity_mut(id)?.apply_acceleration(acceleration);
    Ok(())
}

pub(super) fn init_tiles(world: &mut WorldCore, width: u32, height: u32) {
    world.tiles.init(width, height);
}

pub(super) fn set_tile(world: &mut WorldCore, x: i32, y: i32, value: i32) {
    world.tiles.set_cell(x, y, value);
}
