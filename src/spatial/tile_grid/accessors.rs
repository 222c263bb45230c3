use super::*;

impl TileGrid {
    /// Tile data at world position `pos` (floored to a cell). 0 outside the grid.
    #[inline]
    pub fn get(&self, pos: Vec2) -> i32 {
        if !self.is_in_bounds(pos) {
            return TILE_EMPTY;
        }
        let idx = self.index(pos.x as u32, pos.y as u32);
        *fast!(self.cells, [idx])
    }

    /// Write tile data at `pos`. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, pos: Vec2, value: i32) {
        if !self.is_in_bounds(pos) {
            return;
        }
        let idx = self.index(pos.x as u32, pos.y as u32);
        fast!(self.cells, [idx] = value);
    }

    /// Integer-cell read. 0 outside the grid.
    #[inline]
    pub fn get_cell(&self, x: i32, y: i32) -> i32 {
        if !self.in_bounds(x, y) {
            return TILE_EMPTY;
        }
        let idx = self.index(x as u32, y as u32);
        *fast!(self.cells, [idx])
    }

    #[inline]
    pub fn set_cell(&mut self, x: i32, y: i32, value: i32) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        fast!(self.cells, [idx] = value);
    }

    /// Reset every cell to empty without changing dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(TILE_EMPTY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_reads_are_empty_and_writes_are_ignored() {
        let mut grid = TileGrid::new(4, 3);
        for p in [
            Vec2::new(-0.5, 1.0),
            Vec2::new(4.0, 1.0),
            Vec2::new(1.0, 3.0),
            Vec2::new(1.0, -0.001),
            Vec2::new(f32::NAN, 1.0),
        ] {
            grid.set(p, 9);
            assert_eq!(grid.get(p), 0);
        }
        assert_eq!(grid.solid_count(), 0);
    }

    #[test]
    fn set_then_get_floors_position() {
        let mut grid = TileGrid::new(10, 10);
        grid.set(Vec2::new(5.9, 2.1), 7);
        assert_eq!(grid.get(Vec2::new(5.0, 2.0)), 7);
        assert_eq!(grid.get(Vec2::new(5.5, 2.99)), 7);
        assert_eq!(grid.get_cell(5, 2), 7);
        assert_eq!(grid.get(Vec2::new(6.0, 2.0)), 0);
    }

    #[test]
    fn round_trip_every_cell() {
        let mut grid = TileGrid::new(6, 5);
        for y in 0..5 {
            for x in 0..6 {
                let v = (y * 6 + x) as i32 - 10;
                grid.set(Vec2::new(x as f32 + 0.25, y as f32 + 0.75), v);
                assert_eq!(grid.get(Vec2::new(x as f32, y as f32)), v);
            }
        }
    }

    #[test]
    fn init_resets_and_resizes() {
        let mut grid = TileGrid::new(3, 3);
        grid.set_cell(1, 1, 1);
        grid.init(5, 2);
        assert_eq!((grid.width(), grid.height()), (5, 2));
        assert_eq!(grid.cell_count(), 10);
        assert_eq!(grid.solid_count(), 0);
    }

    #[test]
    fn zero_sized_grid_is_always_empty() {
        let mut grid = TileGrid::new(0, 0);
        grid.set(Vec2::ZERO, 1);
        assert_eq!(grid.get(Vec2::ZERO), 0);
        assert!(!grid.region_test(Vec2::ZERO, Vec2::splat(4.0), None));
        assert!(grid.raycast(Vec2::ZERO, Vec2::new(3.0, 3.0), None).is_none());
    }
}
