//! Entity - the unit of simulation.
//!
//! An entity is an axis-aligned box (`size` centered on `pos`) with a velocity
//! and a handful of material properties. Rotation is carried for rendering and
//! for the parent/child transform, but collision always uses the unrotated box.

use crate::core::math::Vec2;

use super::config::EntityDefaults;
use super::policy::CollisionPolicy;

/// Generational handle into the entity registry.
///
/// A handle whose slot has been freed (or reused) simply resolves to nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl EntityId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Pack into a single integer for the JS side.
    pub fn to_bits(self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }

    pub fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

/// What an entity is resting on. Set during collision, consumed by the next
/// tick's friction step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ground {
    Tile,
    Entity(EntityId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionFlags {
    /// Blocked by the tile grid
    pub collide_tiles: bool,
    /// Takes part in object-vs-object collision (is a candidate)
    pub collide_solid_objects: bool,
    /// Blocks other candidates; requires `collide_solid_objects`
    pub is_solid: bool,
    /// Reported by entity raycasts
    pub collide_raycast: bool,
}

impl CollisionFlags {
    /// Everything on: a typical solid body.
    pub const SOLID: CollisionFlags = CollisionFlags {
        collide_tiles: true,
        collide_solid_objects: true,
        is_solid: true,
        collide_raycast: true,
    };
}

/// How `max_speed` is enforced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpeedClamp {
    /// Each axis clamped to `[-max, max]`
    #[default]
    Linear,
    /// Length clamped to `max`, direction kept
    Circular,
}

#[derive(Clone, Debug)]
pub struct Entity {
    // === Transform ===
    pub pos: Vec2,
    pub size: Vec2,
    pub angle: f32,
    /// Horizontal flip; children inherit it through the transform
    pub mirror: bool,
    pub render_order: f32,

    // === Motion ===
    pub velocity: Vec2,
    pub angle_velocity: f32,
    pub speed_clamp: SpeedClamp,

    // === Material ===
    pub mass: f32,
    pub damping: f32,
    pub angle_damping: f32,
    pub elasticity: f32,
    pub friction: f32,
    pub gravity_scale: f32,

    // === Collision ===
    pub(crate) collision: CollisionFlags,
    pub policy: CollisionPolicy,
    pub(crate) ground: Option<Ground>,

    // === Hierarchy ===
    pub local_pos: Vec2,
    pub local_angle: f32,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,

    // === Lifecycle ===
    pub(crate) destroyed: bool,
    pub(crate) spawn_time: f64,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2, defaults: &EntityDefaults) -> Self {
        invariant!(size.x >= 0.0 && size.y >= 0.0, "negative entity size {:?}", size);
        Self {
            pos,
            size,
            angle: 0.0,
            mirror: false,
            render_order: 0.0,
            velocity: Vec2::zero(),
            angle_velocity: 0.0,
            speed_clamp: SpeedClamp::Linear,
            mass: defaults.mass,
            damping: defaults.damping,
            angle_damping: defaults.angle_damping,
            elasticity: defaults.elasticity,
            friction: defaults.friction,
            gravity_scale: defaults.gravity_scale,
            collision: CollisionFlags::default(),
            policy: CollisionPolicy::Always,
            ground: None,
            local_pos: Vec2::zero(),
            local_angle: 0.0,
            parent: None,
            children: Vec::new(),
            destroyed: false,
            spawn_time: 0.0,
        }
    }

    /// Set collision participation. A solid entity must also collide with
    /// solids; violating that is a programming error.
    pub fn set_collision(
        &mut self,
        collide_solid_objects: bool,
        is_solid: bool,
        collide_tiles: bool,
        collide_raycast: bool,
    ) {
        invariant!(
            collide_solid_objects || !is_solid,
            "solid entities must also collide with solid objects"
        );
        self.collision = CollisionFlags {
            collide_tiles,
            collide_solid_objects,
            is_solid,
            collide_raycast,
        };
    }

    pub fn set_collision_flags(&mut self, flags: CollisionFlags) {
        self.set_collision(
            flags.collide_solid_objects,
            flags.is_solid,
            flags.collide_tiles,
            flags.collide_raycast,
        );
    }

    pub fn collision(&self) -> CollisionFlags {
        self.collision
    }

    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub fn ground(&self) -> Option<Ground> {
        self.ground
    }

    pub fn spawn_time(&self) -> f64 {
        self.spawn_time
    }

    /// `-1` when mirrored, else `1`.
    pub fn mirror_sign(&self) -> f32 {
        if self.mirror {
            -1.0
        } else {
            1.0
        }
    }

    /// Change velocity directly; static entities ignore it.
    pub fn apply_acceleration(&mut self, acceleration: Vec2) {
        if self.mass != 0.0 {
            self.velocity += acceleration;
        }
    }

    /// Change velocity by `force / mass`; static entities ignore it.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.mass != 0.0 {
            self.apply_acceleration(force * (1.0 / self.mass));
        }
    }

    pub fn set_elasticity(&mut self, e: f32) {
        self.elasticity = e.clamp(0.0, 1.0);
    }

    pub fn set_friction(&mut self, f: f32) {
        self.friction = f.clamp(0.0, 1.0);
    }

    pub fn set_damping(&mut self, damping: f32, angle_damping: f32) {
        self.damping = damping.clamp(0.0, 1.0);
        self.angle_damping = angle_damping.clamp(0.0, 1.0);
    }

    pub(crate) fn allows_object(&self, other: &Entity, other_prev: Vec2) -> bool {
        self.policy.collide_with_object(self, other, other_prev)
    }

    pub(crate) fn allows_tile(&self, value: i32, cell: Vec2) -> bool {
        self.policy.collide_with_tile(self, value, cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> Entity {
        Entity::new(Vec2::ZERO, Vec2::ONE, &EntityDefaults::default())
    }

    #[test]
    fn handle_bits_round_trip() {
        let id = EntityId::new(17, 3);
        assert_eq!(EntityId::from_bits(id.to_bits()), id);
    }

    #[test]
    fn new_entity_uses_defaults() {
        let defaults = EntityDefaults { mass: 2.0, friction: 0.5, ..EntityDefaults::default() };
        let e = Entity::new(Vec2::ZERO, Vec2::ONE, &defaults);
        assert_eq!(e.mass, 2.0);
        assert_eq!(e.friction, 0.5);
        assert_eq!(e.collision(), CollisionFlags::default());
        assert!(e.ground().is_none());
    }

    #[test]
    fn forces_ignore_static_entities() {
        let mut e = entity();
        e.mass = 0.0;
        e.apply_force(Vec2::new(5.0, 0.0));
        e.apply_acceleration(Vec2::new(0.0, 5.0));
        assert_eq!(e.velocity, Vec2::ZERO);
    }

    #[test]
    fn force_is_scaled_by_mass() {
        let mut e = entity();
        e.mass = 4.0;
        e.apply_force(Vec2::new(2.0, -4.0));
        assert_eq!(e.velocity, Vec2::new(0.5, -1.0));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn solid_without_object_collision_is_rejected() {
        let mut e = entity();
        e.set_collision(false, true, true, true);
    }

    #[test]
    fn material_setters_clamp() {
        let mut e = entity();
        e.set_elasticity(3.0);
        e.set_friction(-1.0);
        e.set_damping(2.0, 0.5);
        assert_eq!(e.elasticity, 1.0);
        assert_eq!(e.friction, 0.0);
        assert_eq!(e.damping, 1.0);
        assert_eq!(e.angle_damping, 0.5);
    }
}
