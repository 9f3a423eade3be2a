use std::ops::{Add, Div, Mul, Neg, Sub};

use super::ZERO_TOLERANCE;

/// 2D vector, used for projected pixel positions on the point and line paths
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0., y: 0. };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vector2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction; a zero vector is returned as is.
    pub fn normalize(self) -> Vector2 {
        let l = self.length();
        if l < ZERO_TOLERANCE {
            return self;
        }
        self / l
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;
    fn mul(self, s: f32) -> Vector2 {
        Vector2::new(self.x * s, self.y * s)
    }
}

impl Div<f32> for Vector2 {
    type Output = Vector2;
    fn div(self, s: f32) -> Vector2 {
        Vector2::new(self.x / s, self.y / s)
    }
}

/// 3D vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0., y: 0., z: 0. };
    pub const ONE: Vector3 = Vector3 { x: 1., y: 1., z: 1. };
    pub const UNIT_X: Vector3 = Vector3 { x: 1., y: 0., z: 0. };
    pub const UNIT_Y: Vector3 = Vector3 { x: 0., y: 1., z: 0. };
    pub const UNIT_Z: Vector3 = Vector3 { x: 0., y: 0., z: 1. };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vector3) -> Vector3 {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction. Vectors shorter than
    /// [`ZERO_TOLERANCE`] are returned unchanged instead of dividing by ~0.
    pub fn normalize(self) -> Vector3 {
        let l = self.length();
        if l < ZERO_TOLERANCE {
            return self;
        }
        self * (1. / l)
    }

    /// Component-wise product.
    pub fn scale_by(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Vector3::new(v[0], v[1], v[2])
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;
    fn mul(self, s: f32) -> Vector3 {
        Vector3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;
    fn mul(self, v: Vector3) -> Vector3 {
        v * self
    }
}

impl Div<f32> for Vector3 {
    type Output = Vector3;
    fn div(self, s: f32) -> Vector3 {
        Vector3::new(self.x / s, self.y / s, self.z / s)
    }
}

/// Homogeneous 4D vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const ZERO: Vector4 = Vector4 { x: 0., y: 0., z: 0., w: 0. };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Lifts a point into homogeneous space (`w = 1`).
    pub fn from_point(p: Vector3) -> Self {
        Self::new(p.x, p.y, p.z, 1.)
    }

    pub fn dot(self, other: Vector4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn normalize(self) -> Vector4 {
        let l = self.length();
        if l < ZERO_TOLERANCE {
            return self;
        }
        self * (1. / l)
    }

    /// Perspective divide back to 3D.
    pub fn xyz_over_w(self) -> Vector3 {
        let inv = 1. / self.w;
        Vector3::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl Add for Vector4 {
    type Output = Vector4;
    fn add(self, o: Vector4) -> Vector4 {
        Vector4::new(self.x + o.x, self.y + o.y, self.z + o.z, self.w + o.w)
    }
}

impl Sub for Vector4 {
    type Output = Vector4;
    fn sub(self, o: Vector4) -> Vector4 {
        Vector4::new(self.x - o.x, self.y - o.y, self.z - o.z, self.w - o.w)
    }
}

impl Mul<f32> for Vector4 {
    type Output = Vector4;
    fn mul(self, s: f32) -> Vector4 {
        Vector4::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_zero_is_unchanged() {
        assert_eq!(Vector3::ZERO.normalize(), Vector3::ZERO);
        assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
        assert_eq!(Vector4::ZERO.normalize(), Vector4::ZERO);
    }

    #[test]
    fn normalize_gives_unit_length() {
        let n = Vector3::new(3., -4., 12.).normalize();
        assert_relative_eq!(n.length(), 1., epsilon = 1e-6);
        assert_relative_eq!(n.x, 3. / 13., epsilon = 1e-6);
    }

    #[test]
    fn dot_and_cross() {
        let a = Vector3::new(1., 2., 3.);
        let b = Vector3::new(4., 5., 6.);
        assert_relative_eq!(a.dot(b), 32.);
        assert_eq!(Vector3::UNIT_X.cross(Vector3::UNIT_Y), Vector3::UNIT_Z);
        assert_relative_eq!(a.cross(b).dot(a), 0.);
    }

    #[test]
    fn vector2_arithmetic() {
        let a = Vector2::new(4., 2.);
        let b = Vector2::new(0., 8.);
        assert_eq!(a + (b - a) / 2., Vector2::new(2., 5.));
        assert_relative_eq!(Vector2::new(3., 4.).length(), 5.);
    }

    #[test]
    fn perspective_divide() {
        let v = Vector4::new(2., 4., 6., 2.).xyz_over_w();
        assert_eq!(v, Vector3::new(1., 2., 3.));
    }
}
