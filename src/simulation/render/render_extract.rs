use crate::domain::entity::Entity;

use super::WorldCore;

/// Floats per entity in the render buffer:
/// `[x, y, w, h, angle, mirror, render_order]`.
pub const RENDER_STRIDE: usize = 7;

/// Pack every live entity into the render buffer, back to front by
/// `render_order` (ties keep registry order). Returns the entity count.
pub(super) fn extract_render(world: &mut WorldCore) -> usize {
    let mut visible: Vec<&Entity> = world
        .registry
        .iter()
        .map(|(_, e)| e)
        .filter(|e| !e.destroyed)
        .collect();
    visible.sort_by(|a, b| a.render_order.total_cmp(&b.render_order));

    let buffer = &mut world.render;
    buffer.clear();
    buffer.reserve(visible.len() * RENDER_STRIDE);
    for e in &visible {
        buffer.extend_from_slice(&[
            e.pos.x,
            e.pos.y,
            e.size.x,
            e.size.y,
            e.angle,
            if e.mirror { 1.0 } else { 0.0 },
            e.render_order,
        ]);
    }
    visible.len()
}

pub(super) fn render_ptr(world: &WorldCore) -> *const f32 {
    world.render.as_ptr()
}

pub(super) fn render_len(world: &WorldCore) -> usize {
    world.render.len()
}
