use std::ops::Mul;

use super::{Quaternion, Vector3, Vector4};

/// 4x4 transform, row-major, applied to row vectors (`v * M`)
///
/// `m[3]` holds the translation. Composition reads left to right in
/// application order: `world * view * projection`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub m: [[f32; 4]; 4],
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        m: [
            [1., 0., 0., 0.],
            [0., 1., 0., 0.],
            [0., 0., 1., 0.],
            [0., 0., 0., 1.],
        ],
    };

    pub fn translation(offset: Vector3) -> Self {
        let mut r = Self::IDENTITY;
        r.m[3][0] = offset.x;
        r.m[3][1] = offset.y;
        r.m[3][2] = offset.z;
        r
    }

    pub fn scaling(scale: Vector3) -> Self {
        let mut r = Self::IDENTITY;
        r.m[0][0] = scale.x;
        r.m[1][1] = scale.y;
        r.m[2][2] = scale.z;
        r
    }

    pub fn rotation_quaternion(q: Quaternion) -> Self {
        let (xx, yy, zz) = (q.x * q.x, q.y * q.y, q.z * q.z);
        let (xy, zw, zx) = (q.x * q.y, q.z * q.w, q.z * q.x);
        let (yw, yz, xw) = (q.y * q.w, q.y * q.z, q.x * q.w);

        Self {
            m: [
                [1. - 2. * (yy + zz), 2. * (xy + zw), 2. * (zx - yw), 0.],
                [2. * (xy - zw), 1. - 2. * (zz + xx), 2. * (yz + xw), 0.],
                [2. * (zx + yw), 2. * (yz - xw), 1. - 2. * (yy + xx), 0.],
                [0., 0., 0., 1.],
            ],
        }
    }

    /// Yaw around Y, pitch around X, roll around Z, in radians.
    pub fn rotation_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self::rotation_quaternion(Quaternion::rotation_yaw_pitch_roll(yaw, pitch, roll))
    }

    /// Left-handed view matrix looking from `eye` towards `target`.
    pub fn look_at_lh(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let zaxis = (target - eye).normalize();
        let xaxis = up.cross(zaxis).normalize();
        let yaxis = zaxis.cross(xaxis);

        Self {
            m: [
                [xaxis.x, yaxis.x, zaxis.x, 0.],
                [xaxis.y, yaxis.y, zaxis.y, 0.],
                [xaxis.z, yaxis.z, zaxis.z, 0.],
                [-xaxis.dot(eye), -yaxis.dot(eye), -zaxis.dot(eye), 1.],
            ],
        }
    }

    /// Left-handed perspective projection. `fov` is the vertical field of
    /// view in radians; depth maps `znear..zfar` onto `0..1`.
    pub fn perspective_fov_lh(fov: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let y_scale = 1. / (fov * 0.5).tan();
        let x_scale = y_scale / aspect;
        let q = zfar / (zfar - znear);

        Self {
            m: [
                [x_scale, 0., 0., 0.],
                [0., y_scale, 0., 0.],
                [0., 0., q, 1.],
                [0., 0., -q * znear, 0.],
            ],
        }
    }

    pub fn transpose(&self) -> Self {
        let mut r = [[0f32; 4]; 4];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[j][i];
            }
        }
        Self { m: r }
    }

    pub fn transform(&self, v: Vector4) -> Vector4 {
        let m = &self.m;
        Vector4 {
            x: v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0] + v.w * m[3][0],
            y: v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1] + v.w * m[3][1],
            z: v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2] + v.w * m[3][2],
            w: v.x * m[0][3] + v.y * m[1][3] + v.z * m[2][3] + v.w * m[3][3],
        }
    }

    /// Transforms a point (`w = 1`) and divides the result by `w`.
    ///
    /// This is the only projection primitive in the pipeline. A zero `w`
    /// yields non-finite components, which callers treat as degenerate.
    pub fn transform_coordinate(&self, coordinate: Vector3) -> Vector3 {
        self.transform(Vector4::from_point(coordinate)).xyz_over_w()
    }
}

impl Mul for Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Matrix) -> Matrix {
        let mut r = [[0f32; 4]; 4];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Matrix { m: r }
    }
}
