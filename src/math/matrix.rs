use crate::error::MathError;
use crate::math::{Quaternion, Vector3, Vector4};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;
use std::fmt;
use std::ops::{Index, IndexMut, Mul, MulAssign};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A 4x4 transformation matrix.
///
/// Elements are stored in column-major order in a single flat array, so
/// [`as_slice`](Matrix4::as_slice) can be handed directly to graphics APIs.
/// The first three columns are the basis axes, the fourth the translation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Matrix4 {
    pub data: [f32; 16],
}

impl Matrix4 {
    /// Creates a new 4x4 matrix from column-major elements
    #[inline]
    pub fn new(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Creates a new 4x4 identity matrix
    #[inline]
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Creates a new 4x4 zero matrix
    #[inline]
    pub fn zero() -> Self {
        Self { data: [0.0; 16] }
    }

    /// Creates a matrix from three basis axes and a translation
    pub fn from_cols(axis_x: Vector3, axis_y: Vector3, axis_z: Vector3, translation: Vector3) -> Self {
        Self {
            data: [
                axis_x.x, axis_x.y, axis_x.z, 0.0,
                axis_y.x, axis_y.y, axis_y.z, 0.0,
                axis_z.x, axis_z.y, axis_z.z, 0.0,
                translation.x, translation.y, translation.z, 1.0,
            ],
        }
    }

    /// Creates a matrix from a column-major slice of 16 elements
    pub fn from_slice(slice: &[f32]) -> Result<Self, MathError> {
        if slice.len() != 16 {
            return Err(MathError::InvalidSliceLength {
                expected: 16,
                actual: slice.len(),
            });
        }
        let mut data = [0.0; 16];
        data.copy_from_slice(slice);
        Ok(Self { data })
    }

    /// Creates a new 4x4 translation matrix
    #[inline]
    pub fn from_translation(translation: Vector3) -> Self {
        let mut result = Self::identity();
        result.data[12] = translation.x;
        result.data[13] = translation.y;
        result.data[14] = translation.z;
        result
    }

    /// Creates a new 4x4 scaling matrix
    #[inline]
    pub fn from_scale(scale: Vector3) -> Self {
        let mut result = Self::identity();
        result.data[0] = scale.x;
        result.data[5] = scale.y;
        result.data[10] = scale.z;
        result
    }

    /// Creates a rotation matrix from a quaternion.
    ///
    /// The quaternion is expected to be normalized.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let xx = q.x * q.x;
        let xy = q.x * q.y;
        let xz = q.x * q.z;
        let xw = q.x * q.w;

        let yy = q.y * q.y;
        let yz = q.y * q.z;
        let yw = q.y * q.w;

        let zz = q.z * q.z;
        let zw = q.z * q.w;

        Self {
            data: [
                1.0 - 2.0 * (yy + zz), 2.0 * (xy + zw), 2.0 * (xz - yw), 0.0,
                2.0 * (xy - zw), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + xw), 0.0,
                2.0 * (xz + yw), 2.0 * (yz - xw), 1.0 - 2.0 * (xx + yy), 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Creates a right-handed perspective projection matrix.
    ///
    /// `fov_y` is the vertical field of view in radians. The near and far
    /// planes map to -1 and 1 in normalized device coordinates.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y * 0.5).tan();
        let mut result = Self::zero();
        result.data[0] = f / aspect;
        result.data[5] = f;
        result.data[10] = (far + near) / (near - far);
        result.data[11] = -1.0;
        result.data[14] = (2.0 * far * near) / (near - far);
        result
    }

    /// Creates a right-handed orthographic projection matrix
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut result = Self::identity();
        result.data[0] = 2.0 / (right - left);
        result.data[5] = 2.0 / (top - bottom);
        result.data[10] = -2.0 / (far - near);
        result.data[12] = -(right + left) / (right - left);
        result.data[13] = -(top + bottom) / (top - bottom);
        result.data[14] = -(far + near) / (far - near);
        result
    }

    /// Creates a right-handed view matrix looking from `eye` toward `target`
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let forward = (target - eye).normalize();
        let side = forward.cross(&up).normalize();
        let up = side.cross(&forward);

        Self {
            data: [
                side.x, up.x, -forward.x, 0.0,
                side.y, up.y, -forward.y, 0.0,
                side.z, up.z, -forward.z, 0.0,
                -side.dot(&eye), -up.dot(&eye), forward.dot(&eye), 1.0,
            ],
        }
    }

    /// Returns the element at the given row and column
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    /// Sets the element at the given row and column
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[col * 4 + row] = value;
    }

    /// Returns the x basis axis (first column)
    #[inline]
    pub fn axis_x(&self) -> Vector3 {
        Vector3::new(self.data[0], self.data[1], self.data[2])
    }

    /// Returns the y basis axis (second column)
    #[inline]
    pub fn axis_y(&self) -> Vector3 {
        Vector3::new(self.data[4], self.data[5], self.data[6])
    }

    /// Returns the z basis axis (third column)
    #[inline]
    pub fn axis_z(&self) -> Vector3 {
        Vector3::new(self.data[8], self.data[9], self.data[10])
    }

    /// Returns the translation part of the matrix (fourth column)
    #[inline]
    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.data[12], self.data[13], self.data[14])
    }

    /// Sets the translation part of the matrix
    #[inline]
    pub fn set_translation(&mut self, translation: Vector3) {
        self.data[12] = translation.x;
        self.data[13] = translation.y;
        self.data[14] = translation.z;
    }

    /// Returns the elements as a column-major slice, suitable for uploading
    /// to a graphics API
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the determinant of the matrix
    pub fn determinant(&self) -> f32 {
        let m = &self.data;
        let (m00, m10, m20, m30) = (m[0], m[1], m[2], m[3]);
        let (m01, m11, m21, m31) = (m[4], m[5], m[6], m[7]);
        let (m02, m12, m22, m32) = (m[8], m[9], m[10], m[11]);
        let (m03, m13, m23, m33) = (m[12], m[13], m[14], m[15]);

        let s0 = m00 * m11 - m10 * m01;
        let s1 = m00 * m12 - m10 * m02;
        let s2 = m00 * m13 - m10 * m03;
        let s3 = m01 * m12 - m11 * m02;
        let s4 = m01 * m13 - m11 * m03;
        let s5 = m02 * m13 - m12 * m03;

        let c5 = m22 * m33 - m32 * m23;
        let c4 = m21 * m33 - m31 * m23;
        let c3 = m21 * m32 - m31 * m22;
        let c2 = m20 * m33 - m30 * m23;
        let c1 = m20 * m32 - m30 * m22;
        let c0 = m20 * m31 - m30 * m21;

        s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0
    }

    /// Returns the inverse of the matrix, or None if it is not invertible.
    ///
    /// The matrix itself is left untouched either way.
    pub fn inverse(&self) -> Option<Self> {
        let m = &self.data;
        let (m00, m10, m20, m30) = (m[0], m[1], m[2], m[3]);
        let (m01, m11, m21, m31) = (m[4], m[5], m[6], m[7]);
        let (m02, m12, m22, m32) = (m[8], m[9], m[10], m[11]);
        let (m03, m13, m23, m33) = (m[12], m[13], m[14], m[15]);

        let s0 = m00 * m11 - m10 * m01;
        let s1 = m00 * m12 - m10 * m02;
        let s2 = m00 * m13 - m10 * m03;
        let s3 = m01 * m12 - m11 * m02;
        let s4 = m01 * m13 - m11 * m03;
        let s5 = m02 * m13 - m12 * m03;

        let c5 = m22 * m33 - m32 * m23;
        let c4 = m21 * m33 - m31 * m23;
        let c3 = m21 * m32 - m31 * m22;
        let c2 = m20 * m33 - m30 * m23;
        let c1 = m20 * m32 - m30 * m22;
        let c0 = m20 * m31 - m30 * m21;

        let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;
        if det.abs() < crate::math::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let mut inv = Self::zero();

        inv.set(0, 0, (m11 * c5 - m12 * c4 + m13 * c3) * inv_det);
        inv.set(0, 1, (-m01 * c5 + m02 * c4 - m03 * c3) * inv_det);
        inv.set(0, 2, (m31 * s5 - m32 * s4 + m33 * s3) * inv_det);
        inv.set(0, 3, (-m21 * s5 + m22 * s4 - m23 * s3) * inv_det);

        inv.set(1, 0, (-m10 * c5 + m12 * c2 - m13 * c1) * inv_det);
        inv.set(1, 1, (m00 * c5 - m02 * c2 + m03 * c1) * inv_det);
        inv.set(1, 2, (-m30 * s5 + m32 * s2 - m33 * s1) * inv_det);
        inv.set(1, 3, (m20 * s5 - m22 * s2 + m23 * s1) * inv_det);

        inv.set(2, 0, (m10 * c4 - m11 * c2 + m13 * c0) * inv_det);
        inv.set(2, 1, (-m00 * c4 + m01 * c2 - m03 * c0) * inv_det);
        inv.set(2, 2, (m30 * s4 - m31 * s2 + m33 * s0) * inv_det);
        inv.set(2, 3, (-m20 * s4 + m21 * s2 - m23 * s0) * inv_det);

        inv.set(3, 0, (-m10 * c3 + m11 * c1 - m12 * c0) * inv_det);
        inv.set(3, 1, (m00 * c3 - m01 * c1 + m02 * c0) * inv_det);
        inv.set(3, 2, (-m30 * s3 + m31 * s1 - m32 * s0) * inv_det);
        inv.set(3, 3, (m20 * s3 - m21 * s1 + m22 * s0) * inv_det);

        Some(inv)
    }

    /// Returns the transpose of the matrix
    pub fn transpose(&self) -> Self {
        let mut result = Self::zero();
        for row in 0..4 {
            for col in 0..4 {
                result.set(col, row, self.get(row, col));
            }
        }
        result
    }

    /// Multiplies the matrix by another matrix.
    ///
    /// With column vectors, `a.multiply_matrix(&b)` applies `b` first and
    /// `a` second.
    pub fn multiply_matrix(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.get(row, k) * other.get(k, col);
                }
                result.set(row, col, sum);
            }
        }
        result
    }

    /// Multiplies the matrix by a homogeneous vector
    #[inline]
    pub fn multiply_vector(&self, v: Vector4) -> Vector4 {
        let m = &self.data;
        Vector4::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12] * v.w,
            m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13] * v.w,
            m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14] * v.w,
            m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15] * v.w,
        )
    }

    /// Multiplies the matrix by a 3D point (as if w=1), applying the
    /// perspective divide when the resulting w is meaningful
    #[inline]
    pub fn multiply_point(&self, v: Vector3) -> Vector3 {
        let result = self.multiply_vector(Vector4::from_vector3(v, 1.0));

        if result.w.abs() > crate::math::EPSILON {
            Vector3::new(result.x / result.w, result.y / result.w, result.z / result.w)
        } else {
            result.xyz()
        }
    }

    /// Multiplies the matrix by a 3D direction vector (as if w=0), ignoring
    /// the translation. Useful for transforming normals and tangents.
    #[inline]
    pub fn multiply_direction(&self, v: Vector3) -> Vector3 {
        self.multiply_vector(Vector4::from_vector3(v, 0.0)).xyz()
    }

    /// Convert to nalgebra Matrix4
    #[inline]
    pub fn to_nalgebra(&self) -> na::Matrix4<f32> {
        na::Matrix4::from_column_slice(&self.data)
    }

    /// Convert from nalgebra Matrix4
    #[inline]
    pub fn from_nalgebra(m: &na::Matrix4<f32>) -> Self {
        let mut data = [0.0; 16];
        data.copy_from_slice(m.as_slice());
        Self { data }
    }
}

impl From<[f32; 16]> for Matrix4 {
    #[inline]
    fn from(data: [f32; 16]) -> Self {
        Self { data }
    }
}

impl Index<usize> for Matrix4 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.data[index]
    }
}

impl IndexMut<usize> for Matrix4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.data[index]
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply_matrix(&rhs)
    }
}

impl MulAssign for Matrix4 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply_matrix(&rhs);
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..4 {
            write!(
                f,
                "[ {}, {}, {}, {} ]",
                self.get(row, 0),
                self.get(row, 1),
                self.get(row, 2),
                self.get(row, 3)
            )?;
            if row < 3 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl AbsDiffEq for Matrix4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| f32::abs_diff_eq(a, b, epsilon))
    }
}

impl RelativeEq for Matrix4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| f32::relative_eq(a, b, epsilon, max_relative))
    }
}
