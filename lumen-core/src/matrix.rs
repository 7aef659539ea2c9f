/// 4x4 homogeneous transformation matrices
///
/// Storage is column-major, `data[column * 4 + row]`, so [`Matrix4::data`] can be
/// uploaded as a 4x4 uniform without transposition. Constructors never fail:
/// degenerate input produces a fallback matrix (identity, translation only, or
/// all zero) as documented on each constructor.
use std::ops::Mul;

use nalgebra::{Point3, Vector3};

use crate::vector::Vector4;

/// A 4x4 single-precision matrix in column-major order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Matrix4 {
    data: [f32; 16],
}

impl Matrix4 {
    /// The all-zero matrix, returned by projections with a zero-extent volume
    pub const fn zero() -> Self {
        Self { data: [0.0; 16] }
    }

    pub const fn identity() -> Self {
        let mut data = [0.0; 16];
        data[0] = 1.0;
        data[5] = 1.0;
        data[10] = 1.0;
        data[15] = 1.0;
        Self { data }
    }

    pub const fn from_column_major(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Column-major element buffer
    pub fn data(&self) -> &[f32; 16] {
        &self.data
    }

    /// Element at `row`, `col`
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[col * 4 + row] = value;
    }

    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        let mut t = Self::identity();
        t.set(0, 3, x);
        t.set(1, 3, y);
        t.set(2, 3, z);
        t
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut t = Self::identity();
        t.set(0, 0, x);
        t.set(1, 1, y);
        t.set(2, 2, z);
        t
    }

    /// Shear that adds `s` times y into x
    pub fn shear_xy(s: f32) -> Self {
        let mut t = Self::identity();
        t.set(0, 1, s);
        t
    }

    pub fn rotate_x(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        let mut t = Self::identity();
        t.set(1, 1, c);
        t.set(2, 1, s);
        t.set(1, 2, -s);
        t.set(2, 2, c);
        t
    }

    /// Rotation in the x/z plane. Both off-diagonal terms carry `-sin(theta)`.
    pub fn rotate_y(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        let mut t = Self::identity();
        t.set(0, 0, c);
        t.set(0, 2, -s);
        t.set(2, 0, -s);
        t.set(2, 2, c);
        t
    }

    pub fn rotate_z(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        let mut t = Self::identity();
        t.set(0, 0, c);
        t.set(1, 0, s);
        t.set(0, 1, -s);
        t.set(1, 1, c);
        t
    }

    /// Right-handed rotation by `angle` radians about the axis `(x, y, z)`.
    ///
    /// The axis is normalized first. A zero-length axis yields the identity.
    pub fn rotate(angle: f32, x: f32, y: f32, z: f32) -> Self {
        let d = (x * x + y * y + z * z).sqrt();
        if d == 0.0 {
            return Self::identity();
        }

        let (l, m, n) = (x / d, y / d, z / d);
        let (l2, m2, n2) = (l * l, m * m, n * n);
        let (lm, mn, nl) = (l * m, m * n, n * l);
        let (s, c) = angle.sin_cos();
        let c1 = 1.0 - c;

        let mut t = Self::identity();
        t.set(0, 0, (1.0 - l2) * c + l2);
        t.set(1, 0, lm * c1 + n * s);
        t.set(2, 0, nl * c1 - m * s);
        t.set(0, 1, lm * c1 - n * s);
        t.set(1, 1, (1.0 - m2) * c + m2);
        t.set(2, 1, mn * c1 + l * s);
        t.set(0, 2, nl * c1 + m * s);
        t.set(1, 2, mn * c1 - l * s);
        t.set(2, 2, (1.0 - n2) * c + n2);
        t
    }

    /// View matrix looking from `eye` towards `target`.
    ///
    /// When `up` is parallel to the line of sight the rotation is undefined and
    /// only the translation by `-eye` is returned.
    pub fn look_at(eye: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Self {
        let tv = Self::translate(-eye.x, -eye.y, -eye.z);

        // t points from the target back to the eye
        let t = eye - target;
        let r = up.cross(&t);
        let s = t.cross(&r);

        let s2 = s.norm_squared();
        if s2 == 0.0 {
            return tv;
        }

        let r = r / r.norm();
        let s = s / s2.sqrt();
        let t = t / t.norm();

        let mut rv = Self::identity();
        for col in 0..3 {
            rv.set(0, col, r[col]);
            rv.set(1, col, s[col]);
            rv.set(2, col, t[col]);
        }

        rv * tv
    }

    /// OpenGL-style orthographic projection; all zero if any extent is zero
    pub fn orthogonal(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let dx = right - left;
        let dy = top - bottom;
        let dz = z_far - z_near;

        if dx == 0.0 || dy == 0.0 || dz == 0.0 {
            return Self::zero();
        }

        let mut t = Self::identity();
        t.set(0, 0, 2.0 / dx);
        t.set(1, 1, 2.0 / dy);
        t.set(2, 2, -2.0 / dz);
        t.set(0, 3, -(right + left) / dx);
        t.set(1, 3, -(top + bottom) / dy);
        t.set(2, 3, -(z_far + z_near) / dz);
        t
    }

    /// OpenGL-style off-axis perspective projection; all zero if any extent is zero
    pub fn frustum(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let dx = right - left;
        let dy = top - bottom;
        let dz = z_far - z_near;

        if dx == 0.0 || dy == 0.0 || dz == 0.0 {
            return Self::zero();
        }

        let mut t = Self::identity();
        t.set(0, 0, 2.0 * z_near / dx);
        t.set(1, 1, 2.0 * z_near / dy);
        t.set(0, 2, (right + left) / dx);
        t.set(1, 2, (top + bottom) / dy);
        t.set(2, 2, -(z_far + z_near) / dz);
        t.set(3, 2, -1.0);
        t.set(2, 3, -2.0 * z_far * z_near / dz);
        t.set(3, 3, 0.0);
        t
    }

    /// Symmetric perspective projection.
    ///
    /// `fovy` is the vertical field of view in radians. Only `z_far == z_near` is
    /// guarded (all-zero result); `fovy` and `aspect` are taken as given.
    pub fn perspective(fovy: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let dz = z_far - z_near;
        if dz == 0.0 {
            return Self::zero();
        }

        let f = 1.0 / (fovy * 0.5).tan();
        let mut t = Self::identity();
        t.set(1, 1, f);
        t.set(0, 0, f / aspect);
        t.set(2, 2, -(z_far + z_near) / dz);
        t.set(3, 2, -1.0);
        t.set(2, 3, -2.0 * z_far * z_near / dz);
        t.set(3, 3, 0.0);
        t
    }

    /// Cofactor matrix of the upper-left 3x3 block.
    ///
    /// This equals `det * inverse(A)^T`, so it transforms normals correctly under
    /// non-uniform scale and shear up to length. Transformed normals must be
    /// renormalized by the consumer.
    pub fn normal_matrix(&self) -> NormalMatrix {
        let a = |row, col| self.at(row, col);
        NormalMatrix::from_column_major([
            a(1, 1) * a(2, 2) - a(2, 1) * a(1, 2),
            a(2, 1) * a(0, 2) - a(0, 1) * a(2, 2),
            a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2),
            a(1, 2) * a(2, 0) - a(2, 2) * a(1, 0),
            a(2, 2) * a(0, 0) - a(0, 2) * a(2, 0),
            a(0, 2) * a(1, 0) - a(1, 2) * a(0, 0),
            a(1, 0) * a(2, 1) - a(2, 0) * a(1, 1),
            a(2, 0) * a(0, 1) - a(0, 0) * a(2, 1),
            a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1),
        ])
    }
}

/// `a * b` applies `b` first, then `a`
impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        let mut t = Matrix4::zero();
        for j in 0..4 {
            for i in 0..4 {
                t.data[j * 4 + i] = (0..4)
                    .map(|k| self.data[k * 4 + i] * rhs.data[j * 4 + k])
                    .sum();
            }
        }
        t
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, v: Vector4) -> Vector4 {
        let v = v.data();
        let row = |i: usize| (0..4).map(|k| self.data[k * 4 + i] * v[k]).sum::<f32>();
        Vector4::new(row(0), row(1), row(2), row(3))
    }
}

/// 3x3 matrix for transforming surface normals, column-major like [`Matrix4`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalMatrix {
    data: [f32; 9],
}

impl NormalMatrix {
    pub const fn from_column_major(data: [f32; 9]) -> Self {
        Self { data }
    }

    /// Column-major element buffer, suitable for a 3x3 uniform
    pub fn data(&self) -> &[f32; 9] {
        &self.data
    }

    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 3 + row]
    }
}

impl Mul<Vector3<f32>> for NormalMatrix {
    type Output = Vector3<f32>;

    fn mul(self, n: Vector3<f32>) -> Vector3<f32> {
        Vector3::from_fn(|i, _| (0..3).map(|k| self.at(i, k) * n[k]).sum())
    }
}
