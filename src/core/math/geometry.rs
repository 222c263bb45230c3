use super::vec2::Vec2;

/// AABB overlap test for two boxes given as center + full size.
///
/// Touching edges do not count as overlap.
#[inline]
pub fn is_overlapping(pos_a: Vec2, size_a: Vec2, pos_b: Vec2, size_b: Vec2) -> bool {
    (pos_a.x - pos_b.x).abs() * 2.0 < size_a.x + size_b.x
        && (pos_a.y - pos_b.y).abs() * 2.0 < size_a.y + size_b.y
}

/// Does the segment `start..end` touch the box centered at `pos` with `size`?
///
/// Liang–Barsky slab clipping: each of the four box edges narrows the
/// parametric interval `[t_min, t_max]` of the segment; the segment hits the
/// box iff the interval stays non-empty.
pub fn is_intersecting(start: Vec2, end: Vec2, pos: Vec2, size: Vec2) -> bool {
    let box_min = pos - size * 0.5;
    let box_max = box_min + size;
    let delta = end - start;
    let a = start - box_min;
    let b = start - box_max;

    let p = [-delta.x, delta.x, -delta.y, delta.y];
    let q = [a.x, -b.x, a.y, -b.y];

    let mut t_min = 0.0f32;
    let mut t_max = 1.0f32;
    for i in 0..4 {
        if p[i] != 0.0 {
            let t = q[i] / p[i];
            if p[i] < 0.0 {
                if t > t_max {
                    return false;
                }
                t_min = t_min.max(t);
            } else {
                if t < t_min {
                    return false;
                }
                t_max = t_max.min(t);
            }
        } else if q[i] < 0.0 {
            // parallel to this slab and outside it
            return false;
        }
    }
    t_min <= t_max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_strict() {
        let one = Vec2::ONE;
        assert!(is_overlapping(Vec2::ZERO, one, Vec2::new(0.5, 0.5), one));
        // edges touching exactly
        assert!(!is_overlapping(Vec2::ZERO, one, Vec2::new(1.0, 0.0), one));
        assert!(!is_overlapping(Vec2::ZERO, one, Vec2::new(0.0, -1.0), one));
    }

    #[test]
    fn segment_through_box_hits() {
        let pos = Vec2::new(5.0, 5.0);
        let size = Vec2::new(2.0, 2.0);
        assert!(is_intersecting(Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0), pos, size));
        assert!(is_intersecting(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0), pos, size));
    }

    #[test]
    fn segment_stopping_short_misses() {
        let pos = Vec2::new(5.0, 5.0);
        let size = Vec2::new(2.0, 2.0);
        assert!(!is_intersecting(Vec2::new(0.0, 5.0), Vec2::new(3.9, 5.0), pos, size));
    }

    #[test]
    fn parallel_segment_outside_slab_misses() {
        let pos = Vec2::new(5.0, 5.0);
        let size = Vec2::new(2.0, 2.0);
        // horizontal line above the box
        assert!(!is_intersecting(Vec2::new(0.0, 7.0), Vec2::new(10.0, 7.0), pos, size));
        // vertical line left of the box
        assert!(!is_intersecting(Vec2::new(3.0, 0.0), Vec2::new(3.0, 10.0), pos, size));
    }

    #[test]
    fn degenerate_segment_is_point_test() {
        let pos = Vec2::new(5.0, 5.0);
        let size = Vec2::new(2.0, 2.0);
        assert!(is_intersecting(Vec2::new(5.5, 5.5), Vec2::new(5.5, 5.5), pos, size));
        assert!(!is_intersecting(Vec2::new(8.0, 5.5), Vec2::new(8.0, 5.5), pos, size));
    }

    #[test]
    fn segment_starting_inside_hits() {
        let pos = Vec2::new(5.0, 5.0);
        let size = Vec2::new(2.0, 2.0);
        assert!(is_intersecting(Vec2::new(5.0, 5.0), Vec2::new(20.0, 20.0), pos, size));
    }
}
