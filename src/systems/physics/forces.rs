use crate::core::math::{clamp, Vec2};
use crate::domain::config::SimulationParams;
use crate::domain::entity::{Entity, EntityId, Ground, SpeedClamp};
use crate::domain::registry::EntityRegistry;

/// Enforce the global speed limit.
#[inline]
pub fn clamp_speed(entity: &mut Entity, max_speed: f32) {
    match entity.speed_clamp {
        SpeedClamp::Linear => {
            entity.velocity.x = clamp(entity.velocity.x, -max_speed, max_speed);
            entity.velocity.y = clamp(entity.velocity.y, -max_speed, max_speed);
        }
        SpeedClamp::Circular => {
            let len_sq = entity.velocity.length_squared();
            if len_sq > max_speed * max_speed {
                entity.velocity = entity.velocity * (max_speed / len_sq.sqrt());
            }
        }
    }
}

/// Advance one entity by one tick, ignoring collisions. Returns the position
/// before the move.
///
/// With physics disabled the entity still coasts on its velocity, but damping
/// and gravity are skipped.
pub fn integrate(entity: &mut Entity, params: &SimulationParams) -> Vec2 {
    clamp_speed(entity, params.max_speed);

    let old_pos = entity.pos;
    if params.physics_enabled {
        invariant!(
            (0.0..=1.0).contains(&entity.damping),
            "damping out of range: {}",
            entity.damping
        );
        entity.velocity *= entity.damping;
        entity.angle_velocity *= entity.angle_damping;
        if entity.mass != 0.0 {
            entity.velocity.y += params.gravity * entity.gravity_scale;
        }
    }

    entity.pos += entity.velocity;
    entity.angle += entity.angle_velocity;
    old_pos
}

/// Consume last tick's ground contact: pull horizontal velocity toward the
/// ground's by `friction`, then forget the contact.
///
/// A tile ground moves at zero. An entity ground whose handle went stale
/// applies nothing.
pub fn apply_ground_friction(registry: &mut EntityRegistry, id: EntityId) {
    let Some(ground) = registry.get_mut(id).and_then(|e| e.ground.take()) else {
        return;
    };

    let ground_vx = match ground {
        Ground::Tile => Some(0.0),
        Ground::Entity(g) => registry.get(g).map(|g| g.velocity.x),
    };
    let Some(ground_vx) = ground_vx else {
        return;
    };

    if let Some(e) = registry.get_mut(id) {
        e.velocity.x = ground_vx + (e.velocity.x - ground_vx) * e.friction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::EntityDefaults;
    use approx::assert_relative_eq;

    fn body(v: Vec2) -> Entity {
        let mut e = Entity::new(Vec2::ZERO, Vec2::ONE, &EntityDefaults::default());
        e.velocity = v;
        e
    }

    #[test]
    fn linear_clamp_is_per_axis() {
        let mut e = body(Vec2::new(3.0, -4.0));
        clamp_speed(&mut e, 1.0);
        assert_eq!(e.velocity, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn circular_clamp_keeps_direction() {
        let mut e = body(Vec2::new(3.0, -4.0));
        e.speed_clamp = SpeedClamp::Circular;
        clamp_speed(&mut e, 1.0);
        assert_relative_eq!(e.velocity.x, 0.6, epsilon = 1e-6);
        assert_relative_eq!(e.velocity.y, -0.8, epsilon = 1e-6);
    }

    #[test]
    fn integrate_applies_damping_then_gravity() {
        let params = SimulationParams { gravity: -0.1, max_speed: 10.0, ..Default::default() };
        let mut e = body(Vec2::new(1.0, 0.0));
        e.damping = 0.5;
        e.gravity_scale = 2.0;
        let old = integrate(&mut e, &params);
        assert_eq!(old, Vec2::ZERO);
        assert_relative_eq!(e.velocity.x, 0.5);
        assert_relative_eq!(e.velocity.y, -0.2);
        assert_relative_eq!(e.pos.x, 0.5);
        assert_relative_eq!(e.pos.y, -0.2);
    }

    #[test]
    fn static_entities_ignore_gravity() {
        let params = SimulationParams { gravity: -1.0, ..Default::default() };
        let mut e = body(Vec2::ZERO);
        e.mass = 0.0;
        integrate(&mut e, &params);
        assert_eq!(e.velocity, Vec2::ZERO);
        assert_eq!(e.pos, Vec2::ZERO);
    }

    #[test]
    fn disabled_physics_coasts_without_forces() {
        let params = SimulationParams {
            gravity: -1.0,
            physics_enabled: false,
            ..Default::default()
        };
        let mut e = body(Vec2::new(0.5, 0.0));
        e.damping = 0.5;
        integrate(&mut e, &params);
        assert_eq!(e.velocity, Vec2::new(0.5, 0.0));
        assert_eq!(e.pos, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn tile_ground_friction_slows_toward_zero() {
        let mut reg = EntityRegistry::new();
        let mut e = body(Vec2::new(1.0, 0.0));
        e.friction = 0.5;
        e.ground = Some(Ground::Tile);
        let id = reg.insert(e);

        apply_ground_friction(&mut reg, id);
        let e = reg.get(id).unwrap();
        assert_relative_eq!(e.velocity.x, 0.5);
        assert!(e.ground.is_none());
    }

    #[test]
    fn entity_ground_friction_carries_toward_ground_velocity() {
        let mut reg = EntityRegistry::new();
        let platform = reg.insert(body(Vec2::new(2.0, 0.0)));
        let mut rider = body(Vec2::ZERO);
        rider.friction = 0.25;
        rider.ground = Some(Ground::Entity(platform));
        let rider = reg.insert(rider);

        apply_ground_friction(&mut reg, rider);
        assert_relative_eq!(reg.get(rider).unwrap().velocity.x, 1.5);
    }

    #[test]
    fn stale_ground_applies_nothing() {
        let mut reg = EntityRegistry::new();
        let platform = reg.insert(body(Vec2::ZERO));
        let mut rider = body(Vec2::new(1.0, 0.0));
        rider.ground = Some(Ground::Entity(platform));
        let rider = reg.insert(rider);

        reg.get_mut(platform).unwrap().destroyed = true;
        reg.prune_destroyed();

        apply_ground_friction(&mut reg, rider);
        let e = reg.get(rider).unwrap();
        assert_eq!(e.velocity.x, 1.0);
        assert!(e.ground.is_none());
    }
}
