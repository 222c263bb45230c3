//! Vector / scalar helpers. Pure functions, no state.

mod geometry;
mod scalar;
mod vec2;

pub use geometry::{is_intersecting, is_overlapping};
pub use scalar::{clamp, lerp, percent, sign};
pub use vec2::Vec2;
