/// Clamp `value` into `[min, max]`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation from `a` to `b` by `t` (unclamped).
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// `-1` for negative values, `1` otherwise (zero counts as positive).
#[inline]
pub fn sign(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Where `value` sits between `a` and `b`, clamped to `[0, 1]`.
#[inline]
pub fn percent(value: f32, a: f32, b: f32) -> f32 {
    if b == a {
        return 0.0;
    }
    clamp((value - a) / (b - a), 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_treats_zero_as_positive() {
        assert_eq!(sign(0.0), 1.0);
        assert_eq!(sign(-0.5), -1.0);
        assert_eq!(sign(3.0), 1.0);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn percent_handles_degenerate_range() {
        assert_eq!(percent(5.0, 1.0, 1.0), 0.0);
        assert_eq!(percent(5.0, 0.0, 10.0), 0.5);
        assert_eq!(percent(50.0, 0.0, 10.0), 1.0);
    }
}
