//! Per-entity collision predicates.
//!
//! Entities are plain data, so "kinds" of contact behavior are expressed as a
//! policy value attached to each entity and dispatched by the resolver.

use std::fmt;
use std::sync::Arc;

use crate::core::math::Vec2;

use super::entity::Entity;

/// How far below the platform top an entity may have been and still land.
const ONE_WAY_TOLERANCE: f32 = 0.05;

/// User-defined collision predicates.
pub trait CollisionFilter: Send + Sync {
    /// Should a contact between `me` and `other` be resolved?
    /// `other_prev` is where `other` stood before its move this tick.
    fn collide_with_object(&self, _me: &Entity, _other: &Entity, _other_prev: Vec2) -> bool {
        true
    }

    /// Should tile `value` at grid cell `cell` block `me`?
    fn collide_with_tile(&self, _me: &Entity, value: i32, _cell: Vec2) -> bool {
        value != 0
    }
}

#[derive(Clone, Default)]
pub enum CollisionPolicy {
    /// Every contact resolves; every nonzero tile blocks.
    #[default]
    Always,
    /// Blocks other entities only from above, e.g. a jump-through ledge.
    OneWayPlatform,
    /// Tiles with these values are ignored (ladders, decoration).
    PassThroughTiles(Vec<i32>),
    Custom(Arc<dyn CollisionFilter>),
}

impl CollisionPolicy {
    pub fn collide_with_object(&self, me: &Entity, other: &Entity, other_prev: Vec2) -> bool {
        match self {
            CollisionPolicy::Always | CollisionPolicy::PassThroughTiles(_) => true,
            CollisionPolicy::OneWayPlatform => {
                let top = me.pos.y + me.size.y * 0.5;
                let prev_bottom = other_prev.y - other.size.y * 0.5;
                other.velocity.y <= 0.0 && prev_bottom >= top - ONE_WAY_TOLERANCE
            }
            CollisionPolicy::Custom(filter) => filter.collide_with_object(me, other, other_prev),
        }
    }

    pub fn collide_with_tile(&self, me: &Entity, value: i32, cell: Vec2) -> bool {
        match self {
            CollisionPolicy::Always | CollisionPolicy::OneWayPlatform => value != 0,
            CollisionPolicy::PassThroughTiles(ignored) => value != 0 && !ignored.contains(&value),
            CollisionPolicy::Custom(filter) => filter.collide_with_tile(me, value, cell),
        }
    }
}

impl fmt::Debug for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Always => f.write_str("Always"),
            CollisionPolicy::OneWayPlatform => f.write_str("OneWayPlatform"),
            CollisionPolicy::PassThroughTiles(values) => {
                f.debug_tuple("PassThroughTiles").field(values).finish()
            }
            CollisionPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
