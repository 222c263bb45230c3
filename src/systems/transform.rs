//! Parent/child transform hierarchy.
//!
//! A child's world transform is derived every tick from its parent and its
//! local offset; children never run their own physics.

use crate::core::error::{EngineError, EngineResult};
use crate::core::math::Vec2;
use crate::domain::entity::{Entity, EntityId};
use crate::domain::registry::EntityRegistry;

/// World position/angle of a child at `local_pos`/`local_angle` under `parent`.
#[inline]
pub fn child_world_transform(parent: &Entity, local_pos: Vec2, local_angle: f32) -> (Vec2, f32) {
    let mirror = parent.mirror_sign();
    let pos = local_pos.multiply(Vec2::new(mirror, 1.0)).rotate(-parent.angle) + parent.pos;
    let angle = mirror * local_angle + parent.angle;
    (pos, angle)
}

/// Refresh `id` from its parent (if any), then its whole subtree, parent
/// before children. Roots keep their own transform.
pub fn update_transforms(registry: &mut EntityRegistry, id: EntityId) {
    let Some(entity) = registry.get(id) else {
        return;
    };

    if let Some(parent_id) = entity.parent {
        let (local_pos, local_angle) = (entity.local_pos, entity.local_angle);
        if let Some(parent) = registry.get(parent_id) {
            let (pos, angle) = child_world_transform(parent, local_pos, local_angle);
            if let Some(e) = registry.get_mut(id) {
                e.pos = pos;
                e.angle = angle;
            }
        }
    }

    let mut i = 0;
    while let Some(child) = registry.get(id).and_then(|e| e.children.get(i).copied()) {
        update_transforms(registry, child);
        i += 1;
    }
}

/// Link `child` under `parent` with the given local offset.
pub fn attach(
    registry: &mut EntityRegistry,
    parent: EntityId,
    child: EntityId,
    local_pos: Vec2,
    local_angle: f32,
) -> EngineResult<()> {
    if !registry.contains(parent) {
        return Err(EngineError::InvalidHandle(parent));
    }
    let Some(c) = registry.get(child) else {
        return Err(EngineError::InvalidHandle(child));
    };
    if let Some(existing) = c.parent {
        return Err(EngineError::AlreadyParented { child, parent: existing });
    }
    if is_ancestor_or_self(registry, child, parent) {
        return Err(EngineError::HierarchyCycle { parent, child });
    }

    if let Some(p) = registry.get_mut(parent) {
        p.children.push(child);
    }
    if let Some(c) = registry.get_mut(child) {
        c.parent = Some(parent);
        c.local_pos = local_pos;
        c.local_angle = local_angle;
        // stale contact from when it was free
        c.ground = None;
    }
    update_transforms(registry, child);
    Ok(())
}

/// Unlink `child` from `parent`. The child keeps its current world transform
/// and becomes a root.
pub fn detach(registry: &mut EntityRegistry, parent: EntityId, child: EntityId) -> EngineResult<()> {
    let linked = registry
        .get(child)
        .map(|c| c.parent == Some(parent))
        .ok_or(EngineError::InvalidHandle(child))?;
    if !linked {
        return Err(EngineError::NotAChild { parent, child });
    }

    if let Some(p) = registry.get_mut(parent) {
        p.children.retain(|&c| c != child);
    }
    if let Some(c) = registry.get_mut(child) {
        c.parent = None;
    }
    Ok(())
}

/// Is `ancestor` equal to `id` or somewhere above it?
fn is_ancestor_or_self(registry: &EntityRegistry, ancestor: EntityId, id: EntityId) -> bool {
    let mut current = Some(id);
    while let Some(cur) = current {
        if cur == ancestor {
            return true;
        }
        current = registry.get(cur).and_then(|e| e.parent);
    }
    false
}
