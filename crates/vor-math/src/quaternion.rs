//! Unit quaternions for 3D rotation.

use std::fmt;
use std::ops::Mul;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::{EPSILON, Vector3};

/// A rotation quaternion `(x, y, z, w)` with `w` as the scalar part.
///
/// Values produced by [`angle_axis`](Self::angle_axis), [`euler`](Self::euler) and
/// [`normalized`](Self::normalized) are unit length. Anything built by hand may not be until
/// normalized.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
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
    /// The no-op rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a quaternion from raw components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `degrees` about `axis`. The axis does not need to be unit length.
    #[must_use]
    pub fn angle_axis(degrees: f32, axis: Vector3) -> Self {
        let half = degrees.to_radians() * 0.5;
        let (sin_half, cos_half) = half.sin_cos();
        let axis = axis.normalized();

        Self::new(axis.x * sin_half, axis.y * sin_half, axis.z * sin_half, cos_half)
    }

    /// Rotation from Euler angles in degrees.
    ///
    /// Composed as `roll * pitch * yaw`: yaw (about Y) is applied first, then pitch
    /// (about X), then roll (about Z). The order is fixed; callers depend on it.
    #[must_use]
    pub fn euler(x: f32, y: f32, z: f32) -> Self {
        let pitch = Self::angle_axis(x, Vector3::RIGHT);
        let yaw = Self::angle_axis(y, Vector3::UP);
        let roll = Self::angle_axis(z, Vector3::FORWARD);

        (roll * pitch * yaw).normalized()
    }

    /// [`euler`](Self::euler) taking the angles packed in a vector.
    #[must_use]
    pub fn from_euler(angles: Vector3) -> Self {
        Self::euler(angles.x, angles.y, angles.z)
    }

    /// Four-component dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[must_use]
    pub fn sqr_magnitude(self) -> f32 {
        self.dot(self)
    }

    #[must_use]
    pub fn magnitude(self) -> f32 {
        self.sqr_magnitude().sqrt()
    }

    /// Unit-length copy, or [`Quaternion::IDENTITY`] if the squared magnitude is at most
    /// `EPSILON²`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let sqr_mag = self.sqr_magnitude();
        if sqr_mag > EPSILON * EPSILON {
            let inv = 1.0 / sqr_mag.sqrt();
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }

    /// Inverse rotation for unit quaternions.
    #[must_use]
    pub const fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotate a point: `p + 2w(u × p) + 2(u × (u × p))` with `u = (x, y, z)`.
    #[must_use]
    pub fn rotate(self, point: Vector3) -> Vector3 {
        let u = Vector3::new(self.x, self.y, self.z);
        let uv = u.cross(point);
        let uuv = u.cross(uv);

        point + uv * (2.0 * self.w) + uuv * 2.0
    }

    /// Whether two quaternions describe the same rotation within `tolerance`.
    ///
    /// `q` and `-q` rotate identically, so both signs are accepted.
    #[must_use]
    pub fn approx_eq_rotation(self, other: Self, tolerance: f32) -> bool {
        let close = |a: Self, b: Self| {
            (a.x - b.x).abs() <= tolerance
                && (a.y - b.y).abs() <= tolerance
                && (a.z - b.z).abs() <= tolerance
                && (a.w - b.w).abs() <= tolerance
        };
        let neg = Self::new(-other.x, -other.y, -other.z, -other.w);

        close(self, other) || close(self, neg)
    }
}

/// Hamilton product: `(a * b).rotate(v) == a.rotate(b.rotate(v))`.
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;

    fn mul(self, point: Vector3) -> Vector3 {
        self.rotate(point)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x: {}, y: {}, z: {}, w: {}", self.x, self.y, self.z, self.w)
    }
}
