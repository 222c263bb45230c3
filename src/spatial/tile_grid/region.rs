use crate::domain::entity::Entity;

use super::*;

impl TileGrid {
    /// Is any cell under the box `pos ± size/2` blocking?
    ///
    /// A cell blocks when it is nonzero and, if `entity` is given, that
    /// entity's policy agrees for this value and cell. The covered range is
    /// the floored box clamped to the grid; an edge lying exactly on a cell
    /// boundary does not reach into the next cell.
    pub fn region_test(&self, pos: Vec2, size: Vec2, entity: Option<&Entity>) -> bool {
        self.first_blocking_cell(pos, size, entity).is_some()
    }

    /// Like [`region_test`](Self::region_test) but reports the first blocking
    /// cell in row-major order.
    pub fn first_blocking_cell(
        &self,
        pos: Vec2,
        size: Vec2,
        entity: Option<&Entity>,
    ) -> Option<(i32, i32)> {
        let half = size * 0.5;
        let min_x = (pos.x - half.x).floor().max(0.0) as i32;
        let min_y = (pos.y - half.y).floor().max(0.0) as i32;
        let max_x = (pos.x + half.x).min(self.width as f32);
        let max_y = (pos.y + half.y).min(self.height as f32);

        let mut y = min_y;
        while (y as f32) < max_y {
            let mut x = min_x;
            while (x as f32) < max_x {
                let value = self.get_cell(x, y);
                if value != TILE_EMPTY {
                    let allowed = match entity {
                        Some(e) => e.allows_tile(value, Vec2::new(x as f32, y as f32)),
                        None => true,
                    };
                    if allowed {
                        return Some((x, y));
                    }
                }
                x += 1;
            }
            y += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::EntityDefaults;
    use crate::domain::policy::CollisionPolicy;

    fn grid_with(cells: &[(i32, i32, i32)]) -> TileGrid {
        let mut grid = TileGrid::new(10, 10);
        for &(x, y, v) in cells {
            grid.set_cell(x, y, v);
        }
        grid
    }

    #[test]
    fn box_covering_solid_cell_is_blocked() {
        let grid = grid_with(&[(5, 5, 1)]);
        assert!(grid.region_test(Vec2::new(5.5, 5.5), Vec2::ONE, None));
        assert!(grid.region_test(Vec2::new(5.5, 6.4), Vec2::ONE, None));
        assert_eq!(grid.first_blocking_cell(Vec2::new(5.5, 6.4), Vec2::ONE, None), Some((5, 5)));
    }

    #[test]
    fn flush_contact_is_not_blocked() {
        let grid = grid_with(&[(5, 5, 1)]);
        // bottom edge exactly on top of the tile
        assert!(!grid.region_test(Vec2::new(5.5, 6.5), Vec2::ONE, None));
        // right edge exactly on the tile's left side
        assert!(!grid.region_test(Vec2::new(4.5, 5.5), Vec2::ONE, None));
    }

    #[test]
    fn box_outside_grid_is_clamped() {
        let grid = grid_with(&[(0, 0, 1), (9, 9, 1)]);
        assert!(grid.region_test(Vec2::new(-0.2, -0.2), Vec2::ONE, None));
        assert!(grid.region_test(Vec2::new(10.2, 10.2), Vec2::ONE, None));
        assert!(!grid.region_test(Vec2::new(-5.0, -5.0), Vec2::ONE, None));
        assert!(!grid.region_test(Vec2::new(20.0, 20.0), Vec2::ONE, None));
    }

    #[test]
    fn entity_policy_can_ignore_tiles() {
        let grid = grid_with(&[(2, 2, 3)]);
        let mut e = Entity::new(Vec2::new(2.5, 2.5), Vec2::ONE, &EntityDefaults::default());
        assert!(grid.region_test(e.pos, e.size, Some(&e)));

        e.policy = CollisionPolicy::PassThroughTiles(vec![3]);
        assert!(!grid.region_test(e.pos, e.size, Some(&e)));
        assert!(grid.region_test(e.pos, e.size, None));
    }

    #[test]
    fn large_box_finds_any_cell() {
        let grid = grid_with(&[(8, 1, 2)]);
        assert!(grid.region_test(Vec2::new(5.0, 5.0), Vec2::new(8.0, 9.0), None));
        assert!(!grid.region_test(Vec2::new(5.0, 5.0), Vec2::new(4.0, 4.0), None));
    }
}
