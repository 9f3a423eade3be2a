//! Value-type linear algebra used by the pipeline
//!
//! Everything here is `Copy`. Matrices use the row-vector convention
//! (`v * M`), so `world * view * projection` applies `world` first.

mod color;
mod matrix;
mod quaternion;
mod vector;

pub use color::Color4;
pub use matrix::Matrix;
pub use quaternion::Quaternion;
pub use vector::{Vector2, Vector3, Vector4};

/// Magnitudes below this are treated as zero when normalizing.
pub const ZERO_TOLERANCE: f32 = 1e-6;

/// Clamps `value` into `[min, max]`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    f32::max(min, f32::min(value, max))
}

/// Linear blend between `min` and `max`. The gradient is clamped to
/// `[0, 1]` first, so overshoot never extrapolates.
pub fn interpolate(min: f32, max: f32, gradient: f32) -> f32 {
    let t = clamp(gradient, 0., 1.);
    // `min + (max - min)` can round away from `max`
    if t >= 1. {
        return max;
    }
    min + (max - min) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_clamps_gradient() {
        assert_eq!(interpolate(2., 6., -0.5), 2.);
        assert_eq!(interpolate(2., 6., 1.5), 6.);
        assert_eq!(interpolate(2., 6., 0.25), 3.);
    }

    #[test]
    fn interpolate_endpoints_are_exact() {
        for &(a, b) in &[(0.1f32, 0.7f32), (-3., 12.5), (1e6, -1e6)] {
            assert_eq!(interpolate(a, b, 0.), a);
            assert_eq!(interpolate(a, b, 1.), b);
        }
    }

    #[test]
    fn interpolate_constant_range() {
        for t in [-1f32, 0., 0.33, 1., 7.] {
            assert_eq!(interpolate(4.2, 4.2, t), 4.2);
        }
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(-1., 0., 1.), 0.);
        assert_eq!(clamp(2., 0., 1.), 1.);
        assert_eq!(clamp(0.5, 0., 1.), 0.5);
    }
}
