//! Spatial structures. Only the static tile layer lives here; entities are
//! scanned linearly from the per-tick candidate list.

pub mod tile_grid;

pub use tile_grid::{TileGrid, TileHit, TileRaycast, TILE_EMPTY};
