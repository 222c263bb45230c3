//! Debug draw requests.
//!
//! The resolver and raycasts record shapes here when the world's debug flags
//! are on; the host renderer drains them once per frame. Recording never
//! feeds back into the simulation.

use serde::Serialize;

use crate::core::math::Vec2;

pub const COLOR_HIT: u32 = 0xFF0000FF;
pub const COLOR_MISS: u32 = 0x0000FFFF;
pub const COLOR_RESOLVED: u32 = 0xFF00FFFF;
pub const COLOR_POINT: u32 = 0xFFFF00FF;

/// Requests past this are dropped until the buffer is drained.
const MAX_SHAPES: usize = 4096;

/// One fire-and-forget draw request. Colors are RGBA.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DebugShape {
    Rect { pos: Vec2, size: Vec2, color: u32 },
    Line { start: Vec2, end: Vec2, color: u32, width: f32 },
    Point { pos: Vec2, color: u32 },
}

#[derive(Default)]
pub struct DebugDraw {
    shapes: Vec<DebugShape>,
}

impl DebugDraw {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn push(&mut self, shape: DebugShape) {
        if self.shapes.len() < MAX_SHAPES {
            self.shapes.push(shape);
        }
    }

    pub fn rect(&mut self, pos: Vec2, size: Vec2, color: u32) {
        self.push(DebugShape::Rect { pos, size, color });
    }

    /// Both boxes of a contact pair.
    pub fn aabb(&mut self, pos_a: Vec2, size_a: Vec2, pos_b: Vec2, size_b: Vec2, color: u32) {
        self.rect(pos_a, size_a, color);
        self.rect(pos_b, size_b, color);
    }

    pub fn line(&mut self, start: Vec2, end: Vec2, color: u32, width: f32) {
        self.push(DebugShape::Line { start, end, color, width });
    }

    pub fn point(&mut self, pos: Vec2, color: u32) {
        self.push(DebugShape::Point { pos, color });
    }

    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Take everything recorded so far.
    pub fn drain(&mut self) -> Vec<DebugShape> {
        std::mem::take(&mut self.shapes)
    }
}
