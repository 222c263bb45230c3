//! Per-entity physics: integration, object-vs-object response and tile
//! response. Entities are processed one at a time in registry order and
//! corrected in place.

mod collision;
mod forces;
mod perf;
mod tiles;
mod types;
mod update;

pub use collision::{blend_velocities, push_apart, resolve_objects, resolve_pair};
pub use forces::{apply_ground_friction, clamp_speed, integrate};
pub use perf::PhysicsCounters;
pub use tiles::resolve_tiles;
pub use types::{PhysicsContext, Resolution};
pub use update::update_physics;
