//! Systems that run over the entity registry each tick.

pub mod debug;
pub mod physics;
pub mod transform;

pub use debug::{DebugDraw, DebugShape};
pub use physics::{update_physics, PhysicsContext, PhysicsCounters};
pub use transform::update_transforms;
