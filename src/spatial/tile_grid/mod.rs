//! TileGrid - static collision layer
//!
//! One `i32` of tile data per cell, row-major, 1 world unit per cell with the
//! grid's origin at world (0, 0). Zero means empty. Every query outside the
//! grid is a defined empty result, never a panic.

mod accessors;
mod indexing;
mod raycast;
mod region;

pub use raycast::{TileHit, TileRaycast};

use crate::core::math::Vec2;

/// Tile data for an empty cell (and for any out-of-range query).
pub const TILE_EMPTY: i32 = 0;

pub struct TileGrid {
    width: u32,
    height: u32,
    cells: Vec<i32>,
}

impl TileGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![TILE_EMPTY; (width as usize) * (height as usize)],
        }
    }

    /// Replace the grid with a fresh all-empty one of the given size.
    pub fn init(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize((width as usize) * (height as usize), TILE_EMPTY);
    }

    /// Number of nonzero cells.
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != TILE_EMPTY).count()
    }

    /// Raw row-major cell data (for the renderer / serialization).
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    pub fn size_vec(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
