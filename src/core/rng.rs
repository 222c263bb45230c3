//! Deterministic random numbers (xorshift32).
//!
//! Each world owns its own generator so two simulations seeded the same way
//! produce the same push-apart directions.

use std::f32::consts::TAU;

use super::math::Vec2;

#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        // xorshift is stuck at zero forever
        Self { state: if seed == 0 { 0x9E37_79B9 } else { seed } }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        xorshift32(&mut self.state)
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Random direction with the given length.
    pub fn vector(&mut self, length: f32) -> Vec2 {
        Vec2::from_angle(self.next_f32() * TAU, length)
    }
}

#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}
