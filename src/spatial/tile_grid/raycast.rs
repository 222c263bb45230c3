use crate::domain::entity::Entity;

use super::*;

/// A blocking cell found by a tile raycast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileHit {
    /// Center of the hit cell (not the exact crossing point)
    pub pos: Vec2,
    pub cell_x: i32,
    pub cell_y: i32,
    pub value: i32,
}

/// Raycast outcome plus the number of cells visited.
#[derive(Clone, Copy, Debug)]
pub struct TileRaycast {
    pub hit: Option<TileHit>,
    pub steps: u32,
}

impl TileRaycast {
    #[inline]
    fn miss(steps: u32) -> Self {
        Self { hit: None, steps }
    }
}

impl TileGrid {
    /// First blocking cell on the segment `start..end`, as its cell center.
    pub fn raycast(&self, start: Vec2, end: Vec2, entity: Option<&Entity>) -> Option<Vec2> {
        self.raycast_detailed(start, end, entity).hit.map(|h| h.pos)
    }

    /// Grid DDA from `start` to `end`.
    ///
    /// `xi`/`yi` are the distances along the ray to the next vertical /
    /// horizontal grid line; each step advances whichever is nearer. On a tie
    /// the Y axis steps first. The walk ends when both distances pass the
    /// segment length.
    pub fn raycast_detailed(&self, start: Vec2, end: Vec2, entity: Option<&Entity>) -> TileRaycast {
        if !start.is_finite() || !end.is_finite() {
            return TileRaycast::miss(0);
        }

        let delta = end - start;
        let total_length = delta.length();
        let dir = delta.normalize();
        let cell = start.floor();
        let mut x = cell.x as i32;
        let mut y = cell.y as i32;

        // too short to have a direction: only the end points' cells
        if dir == Vec2::ZERO {
            if let Some(hit) = self.blocking_hit(x, y, entity) {
                return TileRaycast { hit: Some(hit), steps: 1 };
            }
            let last = end.floor();
            let (ex, ey) = (last.x as i32, last.y as i32);
            if (ex, ey) == (x, y) {
                return TileRaycast::miss(1);
            }
            return TileRaycast { hit: self.blocking_hit(ex, ey, entity), steps: 2 };
        }

        let unit = Vec2::new(inverse_abs(dir.x), inverse_abs(dir.y));
        let step_x: i32 = if delta.x < 0.0 { -1 } else { 1 };
        let step_y: i32 = if delta.y < 0.0 { -1 } else { 1 };

        let mut xi = first_crossing(unit.x, if delta.x < 0.0 { start.x - cell.x } else { cell.x - start.x + 1.0 });
        let mut yi = first_crossing(unit.y, if delta.y < 0.0 { start.y - cell.y } else { cell.y - start.y + 1.0 });

        // a segment crosses at most this many cells
        let max_steps = (delta.x.abs().ceil() + delta.y.abs().ceil()) as u32 + 2;
        let mut steps = 0u32;

        loop {
            steps += 1;

            if let Some(hit) = self.blocking_hit(x, y, entity) {
                return TileRaycast { hit: Some(hit), steps };
            }

            if (xi > total_length && yi > total_length) || steps > max_steps {
                return TileRaycast::miss(steps);
            }

            if yi <= xi {
                y += step_y;
                yi += unit.y;
            } else {
                x += step_x;
                xi += unit.x;
            }
        }
    }

    fn blocking_hit(&self, x: i32, y: i32, entity: Option<&Entity>) -> Option<TileHit> {
        let value = self.get_cell(x, y);
        if value == TILE_EMPTY {
            return None;
        }
        let cell_pos = Vec2::new(x as f32, y as f32);
        if !entity.map_or(true, |e| e.allows_tile(value, cell_pos)) {
            return None;
        }
        Some(TileHit {
            pos: cell_pos + Vec2::splat(0.5),
            cell_x: x,
            cell_y: y,
            value,
        })
    }
}

/// Distance to the first grid line on one axis; never crossed when the ray
/// does not move along it.
#[inline]
fn first_crossing(unit: f32, offset: f32) -> f32 {
    if unit.is_infinite() {
        f32::INFINITY
    } else {
        unit * offset
    }
}

/// `|1 / v|`, with an axis the ray never moves along mapped to infinity.
#[inline]
fn inverse_abs(v: f32) -> f32 {
    if v == 0.0 {
        f32::INFINITY
    } else {
        (1.0 / v).abs()
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
    fn empty_grid_never_hits() {
        let grid = TileGrid::new(10, 10);
        assert!(grid.raycast(Vec2::new(0.5, 0.5), Vec2::new(9.5, 7.5), None).is_none());
        assert!(grid.raycast(Vec2::new(9.5, 0.5), Vec2::new(0.5, 9.5), None).is_none());
    }

    #[test]
    fn horizontal_ray_hits_cell_center() {
        let grid = grid_with(&[(6, 2, 1)]);
        let hit = grid.raycast(Vec2::new(0.5, 2.5), Vec2::new(9.5, 2.5), None);
        assert_eq!(hit, Some(Vec2::new(6.5, 2.5)));
    }

    #[test]
    fn vertical_ray_hits_cell_center() {
        let grid = grid_with(&[(3, 1, 1)]);
        let hit = grid.raycast(Vec2::new(3.2, 8.7), Vec2::new(3.2, 0.1), None);
        assert_eq!(hit, Some(Vec2::new(3.5, 1.5)));
    }

    #[test]
    fn ray_stops_at_segment_end() {
        let grid = grid_with(&[(8, 2, 1)]);
        assert!(grid.raycast(Vec2::new(0.5, 2.5), Vec2::new(7.5, 2.5), None).is_none());
    }

    #[test]
    fn reversed_ray_hits_same_unique_cell() {
        let grid = grid_with(&[(4, 4, 1)]);
        let a = Vec2::new(1.3, 0.6);
        let b = Vec2::new(8.2, 7.9);
        let forward = grid.raycast_detailed(a, b, None).hit.unwrap();
        let backward = grid.raycast_detailed(b, a, None).hit.unwrap();
        assert_eq!((forward.cell_x, forward.cell_y), (4, 4));
        assert_eq!((backward.cell_x, backward.cell_y), (4, 4));
    }

    #[test]
    fn exact_diagonal_terminates() {
        let grid = TileGrid::new(10, 10);
        let result = grid.raycast_detailed(Vec2::new(0.5, 0.5), Vec2::new(5.5, 5.5), None);
        assert!(result.hit.is_none());
        assert!(result.steps <= 13);
    }

    #[test]
    fn zero_length_ray_tests_start_cell_only() {
        let grid = grid_with(&[(2, 2, 5)]);
        let p = Vec2::new(2.5, 2.5);
        let hit = grid.raycast_detailed(p, p, None);
        assert_eq!(hit.hit.map(|h| h.value), Some(5));

        let q = Vec2::new(1.5, 1.5);
        let miss = grid.raycast_detailed(q, q, None);
        assert!(miss.hit.is_none());
        assert_eq!(miss.steps, 1);
    }

    #[test]
    fn tiny_ray_never_reaches_past_its_end() {
        let grid = grid_with(&[(1, 2, 1)]);
        let result = grid.raycast_detailed(Vec2::new(3.0, 2.5), Vec2::new(2.99999, 2.5), None);
        assert!(result.hit.is_none());
        assert!(result.steps <= 2);

        let down = grid.raycast_detailed(Vec2::new(1.5, 3.0), Vec2::new(1.5, 2.99999), None);
        assert_eq!(down.hit.map(|h| (h.cell_x, h.cell_y)), Some((1, 2)));
    }

    #[test]
    fn axis_aligned_ray_from_grid_line() {
        let grid = grid_with(&[(1, 2, 1)]);
        assert!(grid.raycast(Vec2::new(3.0, 3.0), Vec2::new(3.0, 0.5), None).is_none());
        assert_eq!(
            grid.raycast(Vec2::new(4.0, 2.0), Vec2::new(0.5, 2.0), None),
            Some(Vec2::new(1.5, 2.5))
        );
    }

    #[test]
    fn non_finite_input_is_a_miss() {
        let grid = grid_with(&[(0, 0, 1)]);
        assert!(grid.raycast(Vec2::new(f32::NAN, 0.0), Vec2::ONE, None).is_none());
        assert!(grid.raycast(Vec2::ZERO, Vec2::new(f32::INFINITY, 0.0), None).is_none());
    }

    #[test]
    fn ray_leaving_and_reentering_grid_still_hits() {
        let grid = grid_with(&[(0, 5, 1)]);
        let hit = grid.raycast(Vec2::new(-3.5, 5.5), Vec2::new(2.0, 5.5), None);
        assert_eq!(hit, Some(Vec2::new(0.5, 5.5)));
    }

    #[test]
    fn entity_policy_filters_hits() {
        let grid = grid_with(&[(3, 0, 2), (6, 0, 1)]);
        let mut e = Entity::new(Vec2::ZERO, Vec2::ONE, &EntityDefaults::default());
        e.policy = CollisionPolicy::PassThroughTiles(vec![2]);
        let hit = grid.raycast(Vec2::new(0.5, 0.5), Vec2::new(9.5, 0.5), Some(&e));
        assert_eq!(hit, Some(Vec2::new(6.5, 0.5)));
        let unfiltered = grid.raycast(Vec2::new(0.5, 0.5), Vec2::new(9.5, 0.5), None);
        assert_eq!(unfiltered, Some(Vec2::new(3.5, 0.5)));
    }
}
