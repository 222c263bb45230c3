use crate::core::rng::Rng;
use crate::domain::config::SimulationParams;
use crate::domain::entity::EntityId;
use crate::domain::registry::EntityRegistry;
use crate::spatial::TileGrid;
use crate::systems::debug::DebugDraw;

use super::perf::PhysicsCounters;

/// Everything one entity's physics update may touch.
///
/// Built fresh by the step loop from disjoint borrows of the world, so the
/// resolver can mutate entities while reading tiles and parameters.
pub struct PhysicsContext<'a> {
    pub registry: &'a mut EntityRegistry,
    pub tiles: &'a TileGrid,
    /// Entities that take part in object collision this tick, in registry order
    pub candidates: &'a [EntityId],
    pub params: &'a SimulationParams,
    pub rng: &'a mut Rng,
    pub debug: &'a mut DebugDraw,
    pub counters: &'a mut PhysicsCounters,
}

/// Which axes a pair or tile response corrected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub x: bool,
    pub y: bool,
}

impl Resolution {
    pub const NONE: Resolution = Resolution { x: false, y: false };

    #[inline]
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}
