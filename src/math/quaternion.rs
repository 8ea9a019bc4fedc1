use crate::math::{Matrix4, Vector3};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;
use std::fmt;
use std::ops::{Add, Div, Mul, MulAssign, Neg, Sub};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Quaternion for representing rotations in 3D space.
///
/// The arithmetic operators never normalize; only a unit quaternion is
/// meaningful as a rotation, so callers must normalize explicitly before
/// using one to rotate vectors or build matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Quaternion {
    /// Real component
    pub w: f32,

    /// First imaginary component
    pub x: f32,

    /// Second imaginary component
    pub y: f32,

    /// Third imaginary component
    pub z: f32,
}

impl Quaternion {
    /// Creates a new quaternion
    #[inline]
    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Creates an identity quaternion (no rotation)
    #[inline]
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Creates a quaternion from an axis-angle representation
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let half_angle = angle * 0.5;
        let s = half_angle.sin();
        let c = half_angle.cos();

        let axis = axis.normalize();

        Self {
            w: c,
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
        }
    }

    /// Creates a quaternion from Euler angles in radians (applied z, then y,
    /// then x)
    pub fn from_euler(x: f32, y: f32, z: f32) -> Self {
        let half_x = x * 0.5;
        let half_y = y * 0.5;
        let half_z = z * 0.5;

        let sin_x = half_x.sin();
        let cos_x = half_x.cos();
        let sin_y = half_y.sin();
        let cos_y = half_y.cos();
        let sin_z = half_z.sin();
        let cos_z = half_z.cos();

        Self {
            w: cos_x * cos_y * cos_z + sin_x * sin_y * sin_z,
            x: sin_x * cos_y * cos_z - cos_x * sin_y * sin_z,
            y: cos_x * sin_y * cos_z + sin_x * cos_y * sin_z,
            z: cos_x * cos_y * sin_z - sin_x * sin_y * cos_z,
        }
    }

    /// Extracts the Euler angles in radians from this quaternion, inverse of
    /// [`from_euler`](Quaternion::from_euler)
    pub fn euler_angles(&self) -> Vector3 {
        let x = (2.0 * (self.w * self.x + self.y * self.z))
            .atan2(1.0 - 2.0 * (self.x * self.x + self.y * self.y));

        let sin_y = 2.0 * (self.w * self.y - self.z * self.x);
        let y = sin_y.clamp(-1.0, 1.0).asin();

        let z = (2.0 * (self.w * self.z + self.x * self.y))
            .atan2(1.0 - 2.0 * (self.y * self.y + self.z * self.z));

        Vector3::new(x, y, z)
    }

    /// Creates the shortest-arc rotation carrying the direction of `from`
    /// onto the direction of `to`.
    ///
    /// Inputs need not be normalized. Opposite directions rotate half a turn
    /// about an arbitrary perpendicular axis.
    pub fn from_to_rotation(from: Vector3, to: Vector3) -> Self {
        let from = from.normalize();
        let to = to.normalize();
        let d = from.dot(&to);

        if d >= 1.0 - crate::math::EPSILON {
            return Self::identity();
        }

        if d <= -1.0 + crate::math::EPSILON {
            // Antiparallel: pick any axis perpendicular to `from`
            let mut axis = from.cross(&Vector3::unit_x());
            if axis.is_zero() {
                axis = from.cross(&Vector3::unit_y());
            }
            return Self::from_axis_angle(axis, std::f32::consts::PI);
        }

        let axis = from.cross(&to);
        Self {
            w: 1.0 + d,
            x: axis.x,
            y: axis.y,
            z: axis.z,
        }
        .normalize()
    }

    /// Creates a quaternion from the rotation part of a matrix.
    ///
    /// The upper-left 3x3 block is expected to be a pure rotation.
    pub fn from_rotation_matrix(m: &Matrix4) -> Self {
        let trace = m.get(0, 0) + m.get(1, 1) + m.get(2, 2);

        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self {
                w: 0.25 / s,
                x: (m.get(2, 1) - m.get(1, 2)) * s,
                y: (m.get(0, 2) - m.get(2, 0)) * s,
                z: (m.get(1, 0) - m.get(0, 1)) * s,
            }
        } else if m.get(0, 0) > m.get(1, 1) && m.get(0, 0) > m.get(2, 2) {
            let s = 2.0 * (1.0 + m.get(0, 0) - m.get(1, 1) - m.get(2, 2)).sqrt();
            Self {
                w: (m.get(2, 1) - m.get(1, 2)) / s,
                x: 0.25 * s,
                y: (m.get(0, 1) + m.get(1, 0)) / s,
                z: (m.get(0, 2) + m.get(2, 0)) / s,
            }
        } else if m.get(1, 1) > m.get(2, 2) {
            let s = 2.0 * (1.0 + m.get(1, 1) - m.get(0, 0) - m.get(2, 2)).sqrt();
            Self {
                w: (m.get(0, 2) - m.get(2, 0)) / s,
                x: (m.get(0, 1) + m.get(1, 0)) / s,
                y: 0.25 * s,
                z: (m.get(1, 2) + m.get(2, 1)) / s,
            }
        } else {
            let s = 2.0 * (1.0 + m.get(2, 2) - m.get(0, 0) - m.get(1, 1)).sqrt();
            Self {
                w: (m.get(1, 0) - m.get(0, 1)) / s,
                x: (m.get(0, 2) + m.get(2, 0)) / s,
                y: (m.get(1, 2) + m.get(2, 1)) / s,
                z: 0.25 * s,
            }
        }
    }

    /// Converts the quaternion to a rotation matrix
    #[inline]
    pub fn to_rotation_matrix(&self) -> Matrix4 {
        Matrix4::from_quaternion(self)
    }

    /// Returns the conjugate of this quaternion
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Returns the squared length of this quaternion
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the length of this quaternion
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns a normalized copy of this quaternion; ill-conditioned input
    /// falls back to the identity
    #[inline]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > crate::math::EPSILON {
            Self {
                w: self.w / len,
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Quaternion::identity()
        }
    }

    /// Normalizes this quaternion in-place
    #[inline]
    pub fn normalize_mut(&mut self) {
        *self = self.normalize();
    }

    /// Returns the inverse of this quaternion
    #[inline]
    pub fn inverse(&self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > crate::math::EPSILON {
            let inv_len_sq = 1.0 / len_sq;
            Self {
                w: self.w * inv_len_sq,
                x: -self.x * inv_len_sq,
                y: -self.y * inv_len_sq,
                z: -self.z * inv_len_sq,
            }
        } else {
            Quaternion::identity()
        }
    }

    /// Computes the dot product of two quaternions
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Normalized linear interpolation between two quaternions, taking the
    /// shorter path
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let other = if self.dot(other) < 0.0 { -*other } else { *other };
        Self {
            w: self.w + t * (other.w - self.w),
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
            z: self.z + t * (other.z - self.z),
        }
        .normalize()
    }

    /// Spherical linear interpolation between two quaternions
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        let mut cos_half_theta = self.dot(other);

        // If the dot product is negative, slerp won't take the shorter path.
        // Fix by reversing one quaternion.
        let mut other_adj = *other;
        if cos_half_theta < 0.0 {
            other_adj = -*other;
            cos_half_theta = -cos_half_theta;
        }

        // Quaternions are very close - fall back to linear interpolation
        if cos_half_theta > 0.999 {
            return Self {
                w: self.w + t * (other_adj.w - self.w),
                x: self.x + t * (other_adj.x - self.x),
                y: self.y + t * (other_adj.y - self.y),
                z: self.z + t * (other_adj.z - self.z),
            }
            .normalize();
        }

        let half_theta = cos_half_theta.acos();
        let sin_half_theta = (1.0 - cos_half_theta * cos_half_theta).sqrt();

        if sin_half_theta.abs() < 0.001 {
            return Self {
                w: self.w * 0.5 + other_adj.w * 0.5,
                x: self.x * 0.5 + other_adj.x * 0.5,
                y: self.y * 0.5 + other_adj.y * 0.5,
                z: self.z * 0.5 + other_adj.z * 0.5,
            }
            .normalize();
        }

        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;

        Self {
            w: self.w * ratio_a + other_adj.w * ratio_b,
            x: self.x * ratio_a + other_adj.x * ratio_b,
            y: self.y * ratio_a + other_adj.y * ratio_b,
            z: self.z * ratio_a + other_adj.z * ratio_b,
        }
    }

    /// Rotates a vector by this quaternion, which must be normalized
    pub fn rotate_vector(&self, v: Vector3) -> Vector3 {
        // q * v * q^-1
        let vec_quat = Quaternion::new(0.0, v.x, v.y, v.z);
        let result = *self * vec_quat * self.conjugate();

        Vector3::new(result.x, result.y, result.z)
    }

    /// Returns the angle in radians of this rotation
    #[inline]
    pub fn angle(&self) -> f32 {
        2.0 * self.w.clamp(-1.0, 1.0).acos()
    }

    /// Returns the normalized axis of this rotation
    pub fn axis(&self) -> Vector3 {
        let mut v = Vector3::new(self.x, self.y, self.z);

        let len = v.length();
        if len > crate::math::EPSILON {
            v = v / len;
        }

        v
    }

    /// Convert to nalgebra Quaternion
    #[inline]
    pub fn to_nalgebra(&self) -> na::Quaternion<f32> {
        na::Quaternion::new(self.w, self.x, self.y, self.z)
    }

    /// Convert from nalgebra Quaternion
    #[inline]
    pub fn from_nalgebra(q: &na::Quaternion<f32>) -> Self {
        Self {
            w: q.scalar(),
            x: q.vector()[0],
            y: q.vector()[1],
            z: q.vector()[2],
        }
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.w, self.x, self.y, self.z)
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        f32::abs_diff_eq(&self.w, &other.w, epsilon)
            && f32::abs_diff_eq(&self.x, &other.x, epsilon)
            && f32::abs_diff_eq(&self.y, &other.y, epsilon)
            && f32::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        f32::relative_eq(&self.w, &other.w, epsilon, max_relative)
            && f32::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && f32::relative_eq(&self.y, &other.y, epsilon, max_relative)
            && f32::relative_eq(&self.z, &other.z, epsilon, max_relative)
    }
}

// Hamilton product
impl Mul for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

impl MulAssign for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Add for Quaternion {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.w + rhs.w, self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.w - rhs.w, self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.w * rhs, self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Quaternion {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.w / rhs, self.x / rhs, self.y / rhs, self.z / rhs)
    }
}
