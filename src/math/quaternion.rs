use std::ops::{Add, Mul, Sub};

/// Rotation quaternion, `w` is the scalar part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion { x: 0., y: 0., z: 0., w: 1. };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation by `yaw` around Y, then `pitch` around X, then `roll` around Z
    /// (all in radians).
    pub fn rotation_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        let (sin_roll, cos_roll) = (roll * 0.5).sin_cos();
        let (sin_pitch, cos_pitch) = (pitch * 0.5).sin_cos();
        let (sin_yaw, cos_yaw) = (yaw * 0.5).sin_cos();

        Self {
            x: cos_yaw * sin_pitch * cos_roll + sin_yaw * cos_pitch * sin_roll,
            y: sin_yaw * cos_pitch * cos_roll - cos_yaw * sin_pitch * sin_roll,
            z: cos_yaw * cos_pitch * sin_roll - sin_yaw * sin_pitch * cos_roll,
            w: cos_yaw * cos_pitch * cos_roll + sin_yaw * sin_pitch * sin_roll,
        }
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }
}

impl Add for Quaternion {
    type Output = Quaternion;
    fn add(self, r: Quaternion) -> Quaternion {
        Quaternion::new(self.x + r.x, self.y + r.y, self.z + r.z, self.w + r.w)
    }
}

impl Sub for Quaternion {
    type Output = Quaternion;
    fn sub(self, r: Quaternion) -> Quaternion {
        Quaternion::new(self.x - r.x, self.y - r.y, self.z - r.z, self.w - r.w)
    }
}

/// Composes two rotations; `a * b` rotates by `b` first, then `a`.
impl Mul for Quaternion {
    type Output = Quaternion;
    fn mul(self, r: Quaternion) -> Quaternion {
        let l = self;
        let a = l.y * r.z - l.z * r.y;
        let b = l.z * r.x - l.x * r.z;
        let c = l.x * r.y - l.y * r.x;
        let d = l.x * r.x + l.y * r.y + l.z * r.z;
        Quaternion {
            x: l.x * r.w + r.x * l.w + a,
            y: l.y * r.w + r.y * l.w + b,
            z: l.z * r.w + r.z * l.w + c,
            w: l.w * r.w - d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_angles_is_identity() {
        assert_eq!(Quaternion::rotation_yaw_pitch_roll(0., 0., 0.), Quaternion::IDENTITY);
    }

    #[test]
    fn yaw_pitch_roll_is_unit() {
        let q = Quaternion::rotation_yaw_pitch_roll(0.3, -1.2, 2.5);
        assert_relative_eq!(q.length_squared(), 1., epsilon = 1e-5);
    }

    #[test]
    fn multiply_by_identity() {
        let q = Quaternion::rotation_yaw_pitch_roll(0.7, 0.1, -0.4);
        let p = q * Quaternion::IDENTITY;
        assert_relative_eq!(p.x, q.x);
        assert_relative_eq!(p.w, q.w);
    }

    #[test]
    fn two_half_turns_compose() {
        let half = Quaternion::rotation_yaw_pitch_roll(std::f32::consts::FRAC_PI_4, 0., 0.);
        let full = Quaternion::rotation_yaw_pitch_roll(std::f32::consts::FRAC_PI_2, 0., 0.);
        let composed = half * half;
        assert_relative_eq!(composed.y, full.y, epsilon = 1e-6);
        assert_relative_eq!(composed.w, full.w, epsilon = 1e-6);
    }
}
