//! Object-vs-object collision response.
//!
//! One moving entity A is tested against every candidate B in registry order
//! and corrected in place, so later pairs see the results of earlier ones.
//! Only A's pre-move position is known; B is taken where it stands now.

use crate::core::math::{is_overlapping, lerp, sign, Vec2};
use crate::core::rng::Rng;
use crate::domain::entity::{Entity, EntityId, Ground};
use crate::systems::debug::COLOR_RESOLVED;

use super::types::{PhysicsContext, Resolution};

/// Gap left between boxes after a correction.
const SEPARATION_EPSILON: f32 = 0.001;
/// Velocity nudge applied to boxes that were already overlapping.
const PUSH_APART_ACCEL: f32 = 0.001;
/// Below this center distance the push direction is random.
const COINCIDENT_DISTANCE: f32 = 0.01;

/// Resolve `id` against every candidate. `old_pos` is its position before
/// this tick's move; `falling` is whether it was moving down.
pub fn resolve_objects(ctx: &mut PhysicsContext<'_>, id: EntityId, old_pos: Vec2, falling: bool) {
    let candidates = ctx.candidates;
    let gravity = ctx.params.gravity;
    let debug = ctx.params.debug_physics;

    for &other_id in candidates {
        if other_id == id {
            continue;
        }
        let Some((a, b)) = ctx.registry.pair_mut(id, other_id) else {
            continue;
        };
        if (!a.collision.is_solid && !b.collision.is_solid) || b.destroyed || b.parent.is_some() {
            continue;
        }
        ctx.counters.pair_tests += 1;

        if !is_overlapping(a.pos, a.size, b.pos, b.size) {
            continue;
        }

        // both sides get a say, and both are asked
        let a_allows = a.allows_object(b, b.pos);
        let b_allows = b.allows_object(a, old_pos);
        if !a_allows || !b_allows {
            continue;
        }

        if is_overlapping(old_pos, a.size, b.pos, b.size) {
            push_apart(a, b, old_pos, ctx.rng);
            ctx.counters.push_aparts += 1;
            continue;
        }

        let resolution = resolve_pair(a, b, other_id, old_pos, falling, gravity);
        if resolution.any() {
            ctx.counters.resolutions += 1;
            if debug {
                ctx.debug.aabb(a.pos, a.size, b.pos, b.size, COLOR_RESOLVED);
            }
        }
    }
}

/// Correct a fresh overlap between A (moved from `old_pos`) and B.
///
/// The axis is picked from A's old position relative to B: coming from above
/// (within a small step) or from within B's horizontal span resolves Y;
/// coming from within B's vertical span resolves X. With neither, Y wins.
pub fn resolve_pair(
    a: &mut Entity,
    b: &mut Entity,
    b_id: EntityId,
    old_pos: Vec2,
    falling: bool,
    gravity: f32,
) -> Resolution {
    let size_sum = a.size + b.size;
    let offset = old_pos - b.pos;

    let small_step_up = offset.y * 2.0 > size_sum.y + gravity;
    let blocked_x = offset.y.abs() * 2.0 < size_sum.y;
    let blocked_y = offset.x.abs() * 2.0 < size_sum.x;
    let elasticity = a.elasticity.max(b.elasticity);

    let mut resolution = Resolution::NONE;

    if small_step_up || blocked_y || !blocked_x {
        a.pos.y = b.pos.y + (size_sum.y * 0.5 + SEPARATION_EPSILON) * sign(offset.y);

        if b.mass == 0.0 || (b.ground.is_some() && falling) {
            if falling {
                a.ground = Some(Ground::Entity(b_id));
            }
            a.velocity.y *= -elasticity;
        } else {
            let (va, vb) = blend_velocities(a.mass, a.velocity.y, b.mass, b.velocity.y, elasticity);
            a.velocity.y = va;
            b.velocity.y = vb;
        }
        resolution.y = true;
    }

    if !small_step_up && blocked_x {
        a.pos.x = b.pos.x + (size_sum.x * 0.5 + SEPARATION_EPSILON) * sign(offset.x);

        if b.mass == 0.0 {
            a.velocity.x *= -elasticity;
        } else {
            let (va, vb) = blend_velocities(a.mass, a.velocity.x, b.mass, b.velocity.x, elasticity);
            a.velocity.x = va;
            b.velocity.x = vb;
        }
        resolution.x = true;
    }

    resolution
}

/// One-axis collision between two dynamic bodies, interpolated between the
/// perfectly inelastic (shared momentum) and perfectly elastic outcomes.
#[inline]
pub fn blend_velocities(mass_a: f32, va: f32, mass_b: f32, vb: f32, elasticity: f32) -> (f32, f32) {
    let total = mass_a + mass_b;
    if total == 0.0 {
        return (va, vb);
    }

    let inelastic = (mass_a * va + mass_b * vb) / total;
    let elastic_a = va * (mass_a - mass_b) / total + vb * 2.0 * mass_b / total;
    let elastic_b = vb * (mass_b - mass_a) / total + va * 2.0 * mass_a / total;

    (
        lerp(inelastic, elastic_a, elasticity),
        lerp(inelastic, elastic_b, elasticity),
    )
}

/// Boxes that overlapped before A moved: separate them gently instead of
/// snapping. B only moves if it is dynamic.
pub fn push_apart(a: &mut Entity, b: &mut Entity, old_pos: Vec2, rng: &mut Rng) {
    let delta = old_pos - b.pos;
    let distance = delta.length();
    let push = if distance < COINCIDENT_DISTANCE {
        rng.vector(PUSH_APART_ACCEL)
    } else {
        delta * (PUSH_APART_ACCEL / distance)
    };

    a.velocity += push;
    if b.mass != 0.0 {
        b.velocity -= push;
    }
    log::trace!("push apart {:?}", push);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::EntityDefaults;
    use approx::assert_relative_eq;

    fn body(x: f32, y: f32) -> Entity {
        let mut e = Entity::new(Vec2::new(x, y), Vec2::ONE, &EntityDefaults::default());
        e.set_collision(true, true, false, false);
        e
    }

    fn other_id() -> EntityId {
        EntityId::new(7, 0)
    }

    #[test]
    fn landing_on_static_body_grounds_and_stops() {
        let mut floor = body(0.0, 0.0);
        floor.mass = 0.0;
        let mut a = body(0.0, 0.8);
        a.velocity = Vec2::new(0.0, -0.3);

        let r = resolve_pair(&mut a, &mut floor, other_id(), Vec2::new(0.0, 1.1), true, 0.0);
        assert_eq!(r, Resolution { x: false, y: true });
        assert_relative_eq!(a.pos.y, 1.0 + SEPARATION_EPSILON);
        assert_eq!(a.velocity.y, 0.0);
        assert_eq!(a.ground, Some(Ground::Entity(other_id())));
    }

    #[test]
    fn side_hit_on_static_body_reflects_x() {
        let mut wall = body(5.5, 0.0);
        wall.mass = 0.0;
        let mut a = body(5.0, 0.0);
        a.velocity = Vec2::new(5.0, 0.0);
        a.elasticity = 1.0;

        let r = resolve_pair(&mut a, &mut wall, other_id(), Vec2::new(0.0, 0.0), false, 0.0);
        assert_eq!(r, Resolution { x: true, y: false });
        assert_relative_eq!(a.pos.x, 4.5 - SEPARATION_EPSILON);
        assert_eq!(a.velocity.x, -5.0);
        assert!(a.ground.is_none());
    }

    #[test]
    fn inelastic_head_on_shares_momentum() {
        let (va, vb) = blend_velocities(1.0, 4.0, 1.0, -4.0, 0.0);
        assert_eq!((va, vb), (0.0, 0.0));

        let (va, vb) = blend_velocities(3.0, 2.0, 1.0, 0.0, 0.0);
        assert_relative_eq!(va, 1.5);
        assert_relative_eq!(vb, 1.5);
    }

    #[test]
    fn elastic_equal_masses_swap_velocities() {
        let (va, vb) = blend_velocities(1.0, 4.0, 1.0, -2.0, 1.0);
        assert_relative_eq!(va, -2.0);
        assert_relative_eq!(vb, 4.0);
    }

    #[test]
    fn zero_total_mass_leaves_velocities() {
        assert_eq!(blend_velocities(0.0, 1.0, 0.0, -1.0, 0.5), (1.0, -1.0));
    }

    #[test]
    fn elasticity_is_the_larger_of_the_pair() {
        let mut b = body(2.0, 0.0);
        b.elasticity = 1.0;
        let mut a = body(1.5, 0.0);
        a.velocity = Vec2::new(1.0, 0.0);

        resolve_pair(&mut a, &mut b, other_id(), Vec2::new(0.5, 0.0), false, 0.0);
        assert_relative_eq!(a.velocity.x, 0.0);
        assert_relative_eq!(b.velocity.x, 1.0);
    }

    #[test]
    fn small_step_up_resolves_vertically() {
        let mut b = body(0.0, 0.0);
        b.mass = 0.0;
        // old bottom barely above B's top, moved diagonally into it
        let mut a = body(0.4, 0.95);
        a.velocity = Vec2::new(0.4, -0.1);

        let r = resolve_pair(&mut a, &mut b, other_id(), Vec2::new(0.0, 1.05), true, -0.2);
        assert_eq!(r, Resolution { x: false, y: true });
        assert!(a.pos.y > 1.0);
        assert_relative_eq!(a.pos.x, 0.4);
    }

    #[test]
    fn landing_on_grounded_dynamic_body_bounces() {
        let mut b = body(0.0, 0.0);
        b.ground = Some(Ground::Tile);
        b.velocity = Vec2::new(0.0, 0.0);
        let mut a = body(0.0, 0.9);
        a.velocity = Vec2::new(0.0, -0.2);
        a.elasticity = 0.5;

        resolve_pair(&mut a, &mut b, other_id(), Vec2::new(0.0, 1.1), true, 0.0);
        assert_relative_eq!(a.velocity.y, 0.1);
        assert_eq!(b.velocity.y, 0.0);
        assert_eq!(a.ground, Some(Ground::Entity(other_id())));
    }

    #[test]
    fn push_apart_uses_center_offset() {
        let mut rng = Rng::new(1);
        let mut a = body(0.5, 0.0);
        let mut b = body(0.0, 0.0);
        push_apart(&mut a, &mut b, Vec2::new(0.5, 0.0), &mut rng);
        assert_relative_eq!(a.velocity.x, PUSH_APART_ACCEL);
        assert_relative_eq!(b.velocity.x, -PUSH_APART_ACCEL);
        assert_eq!(a.velocity.y, 0.0);
    }

    #[test]
    fn push_apart_coincident_is_random_but_opposite() {
        let mut rng = Rng::new(99);
        let mut a = body(0.0, 0.0);
        let mut b = body(0.0, 0.0);
        push_apart(&mut a, &mut b, Vec2::ZERO, &mut rng);
        assert_relative_eq!(a.velocity.length(), PUSH_APART_ACCEL, epsilon = 1e-7);
        assert_relative_eq!(a.velocity.x, -b.velocity.x);
        assert_relative_eq!(a.velocity.y, -b.velocity.y);
    }

    #[test]
    fn push_apart_leaves_static_body_alone() {
        let mut rng = Rng::new(3);
        let mut a = body(0.2, 0.0);
        let mut b = body(0.0, 0.0);
        b.mass = 0.0;
        push_apart(&mut a, &mut b, Vec2::new(0.2, 0.0), &mut rng);
        assert!(a.velocity.x > 0.0);
        assert_eq!(b.velocity, Vec2::ZERO);
    }
}
