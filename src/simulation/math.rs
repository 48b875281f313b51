//! Small vector and angle helpers shared by the solver and the partitioner.

use std::f64::consts::TAU;

use super::states::NVec2;

/// Wrap an angle into [0, 2pi)
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round tiny negatives up to exactly TAU
    if a >= TAU { 0.0 } else { a }
}

/// Linear interpolation between `a` and `b`
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// 2D cross product (z-component)
pub fn cross(a: &NVec2, b: &NVec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Rotate `v` by +90 degrees
pub fn perpendicular(v: &NVec2) -> NVec2 {
    NVec2::new(-v.y, v.x)
}

/// Vector of length `r` at angle `theta`
pub fn from_polar(r: f64, theta: f64) -> NVec2 {
    NVec2::new(r * theta.cos(), r * theta.sin())
}

/// Polar angle of `v` in [0, 2pi)
pub fn angle_of(v: &NVec2) -> f64 {
    normalize_angle(v.y.atan2(v.x))
}

/// Replace non-finite components of `proposed` with those of `fallback`
pub fn finite_or(proposed: NVec2, fallback: &NVec2) -> NVec2 {
    NVec2::new(
        if proposed.x.is_finite() { proposed.x } else { fallback.x },
        if proposed.y.is_finite() { proposed.y } else { fallback.y },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn normalize_wraps_into_range() {
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-12);
        assert_eq!(normalize_angle(TAU), 0.0);
        assert!(normalize_angle(-1e-18) < TAU);
    }

    #[test]
    fn polar_and_angle_agree() {
        let v = from_polar(2.0, 0.75 * PI);
        assert!((v.norm() - 2.0).abs() < 1e-12);
        assert!((angle_of(&v) - 0.75 * PI).abs() < 1e-12);
    }

    #[test]
    fn perpendicular_is_counterclockwise() {
        let x = NVec2::new(1.0, 0.0);
        assert!(cross(&x, &perpendicular(&x)) > 0.0);
        assert_eq!(lerp(2.0, 4.0, 0.25), 2.5);
    }

    #[test]
    fn finite_or_keeps_valid_components() {
        let v = finite_or(NVec2::new(f64::NAN, 3.0), &NVec2::new(1.0, 2.0));
        assert_eq!(v, NVec2::new(1.0, 3.0));
    }
}
