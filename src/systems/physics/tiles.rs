use crate::core::math::Vec2;
use crate::domain::entity::{Entity, Ground};
use crate::spatial::TileGrid;

use super::types::Resolution;

/// Push an entity back out of the tile layer after its move from `old_pos`.
///
/// Only a fresh penetration is corrected; an entity whose old box was already
/// inside tiles is left alone. Each axis is tested by replaying the move on
/// that axis alone. A falling entity blocked on Y is snapped flush onto the
/// highest tile row it fell into and marked grounded.
pub fn resolve_tiles(tiles: &TileGrid, entity: &mut Entity, old_pos: Vec2, falling: bool) -> Resolution {
    let size = entity.size;
    if !tiles.region_test(entity.pos, size, Some(&*entity)) {
        return Resolution::NONE;
    }
    if tiles.region_test(old_pos, size, Some(&*entity)) {
        return Resolution::NONE;
    }

    let blocked_y = tiles.region_test(Vec2::new(old_pos.x, entity.pos.y), size, Some(&*entity));
    let blocked_x = tiles.region_test(Vec2::new(entity.pos.x, old_pos.y), size, Some(&*entity));
    let mut resolution = Resolution::NONE;

    if blocked_y || !blocked_x {
        if falling {
            let half = size.y * 0.5;
            let floor = landing_row_top(tiles, entity, old_pos, entity.pos.y);
            entity.ground = Some(Ground::Tile);
            entity.pos.y = flush_above(floor, half);
        } else {
            entity.pos.y = old_pos.y;
        }
        entity.velocity.y *= -entity.elasticity;
        resolution.y = true;
    }

    if blocked_x {
        entity.pos.x = old_pos.x;
        entity.velocity.x *= -entity.elasticity;
        resolution.x = true;
    }

    resolution
}

/// Top edge of the highest blocking row between the old and new bottom
/// edges, in the entity's old column span. Falls back to the old bottom row
/// when no single row blocks (a corner hit).
fn landing_row_top(tiles: &TileGrid, entity: &Entity, old_pos: Vec2, new_y: f32) -> f32 {
    let half = entity.size.y * 0.5;
    let old_row = (old_pos.y - half).floor();
    let new_row = (new_y - half).floor();
    let band = Vec2::new(entity.size.x, 1.0);

    let mut row = old_row - 1.0;
    while row >= new_row {
        if tiles.region_test(Vec2::new(old_pos.x, row + 0.5), band, Some(entity)) {
            return row + 1.0;
        }
        row -= 1.0;
    }
    old_row
}

/// Center height that puts a box of half-height `half` exactly on the
/// boundary `floor`, such that `center - half` does not round below it.
fn flush_above(floor: f32, half: f32) -> f32 {
    let mut y = floor + half;
    for _ in 0..4 {
        if !y.is_finite() || y - half >= floor {
            break;
        }
        y = next_up(y);
    }
    y
}

#[inline]
fn next_up(v: f32) -> f32 {
    if v == 0.0 {
        f32::from_bits(1)
    } else if v > 0.0 {
        f32::from_bits(v.to_bits() + 1)
    } else {
        f32::from_bits(v.to_bits() - 1)
    }
}
