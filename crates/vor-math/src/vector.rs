//! 3D vectors.
//!
//! Equality on [`Vector3`] is approximate: two vectors compare equal when the squared
//! distance between them is below `EPSILON²`. Site deduplication and degenerate-cell
//! detection in the partition rely on this, so never swap it for bitwise comparison.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::EPSILON;

/// A 3D vector of `f32` components.
#[derive(Clone, Copy, Default, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const POSITIVE_INFINITY: Self = Self::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
    pub const NEGATIVE_INFINITY: Self =
        Self::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);

    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product (right-handed).
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Squared length. Prefer this over [`magnitude`](Self::magnitude) for comparisons.
    #[must_use]
    pub fn sqr_magnitude(self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length.
    #[must_use]
    pub fn magnitude(self) -> f32 {
        self.sqr_magnitude().sqrt()
    }

    /// Squared distance between two points.
    #[must_use]
    pub fn sqr_distance(self, other: Self) -> f32 {
        (other - self).sqr_magnitude()
    }

    /// Distance between two points.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        self.sqr_distance(other).sqrt()
    }

    /// Unit vector in the same direction, or [`Vector3::ZERO`] when the length is at most
    /// `EPSILON`.
    ///
    /// The length is computed from the squared length, which overflows to infinity once a
    /// component reaches about `1e19`. Such vectors also come back as zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mag = self.magnitude();
        if mag > EPSILON {
            self / mag
        } else {
            Self::ZERO
        }
    }

    /// Normalize in place. Same fallback as [`normalized`](Self::normalized).
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Component-wise product.
    #[must_use]
    pub fn scale(self, factors: Self) -> Self {
        Self::new(self.x * factors.x, self.y * factors.y, self.z * factors.z)
    }

    /// Component-wise product, in place.
    pub fn scale_mut(&mut self, factors: Self) {
        *self = self.scale(factors);
    }

    /// Linear interpolation with `t` clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        self.lerp_unclamped(to, t.clamp(0.0, 1.0))
    }

    /// Linear interpolation; `t` outside `[0, 1]` extrapolates.
    #[must_use]
    pub fn lerp_unclamped(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(
            if self.x < other.x { self.x } else { other.x },
            if self.y < other.y { self.y } else { other.y },
            if self.z < other.z { self.z } else { other.z },
        )
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(
            if self.x > other.x { self.x } else { other.x },
            if self.y > other.y { self.y } else { other.y },
            if self.z > other.z { self.z } else { other.z },
        )
    }

    /// Reflect a direction off the plane defined by `normal`.
    ///
    /// `normal` is expected to be unit length; it is not normalized here.
    #[must_use]
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2.0 * self.dot(normal))
    }

    /// Project onto `on_normal`. Returns zero when `on_normal` is (nearly) zero.
    #[must_use]
    pub fn project(self, on_normal: Self) -> Self {
        let sqr_mag = on_normal.sqr_magnitude();
        if sqr_mag < EPSILON {
            return Self::ZERO;
        }
        on_normal * (self.dot(on_normal) / sqr_mag)
    }

    /// Shorten to `max_length` if longer, keeping the direction.
    #[must_use]
    pub fn clamp_magnitude(self, max_length: f32) -> Self {
        let sqr_mag = self.sqr_magnitude();
        if sqr_mag > max_length * max_length {
            self * (max_length / sqr_mag.sqrt())
        } else {
            self
        }
    }

    /// Unsigned angle between two vectors, in radians.
    ///
    /// Returns `None` if either vector has zero length.
    #[must_use]
    pub fn try_angle(self, to: Self) -> Option<f32> {
        let mag_from = self.magnitude();
        let mag_to = to.magnitude();
        if mag_from == 0.0 || mag_to == 0.0 {
            return None;
        }
        let cos_theta = (self.dot(to) / (mag_from * mag_to)).clamp(-1.0, 1.0);
        Some(cos_theta.acos())
    }

    /// Unsigned angle between two vectors, in radians.
    ///
    /// A zero-length input is logged and reported as `0.0`. Use
    /// [`try_angle`](Self::try_angle) to tell that case apart from parallel vectors.
    #[must_use]
    pub fn angle(self, to: Self) -> f32 {
        self.try_angle(to).unwrap_or_else(|| {
            tracing::warn!(from = %self, to = %to, "angle requested for zero-length vector");
            0.0
        })
    }

    /// Components as an array.
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl PartialEq for Vector3 {
    fn eq(&self, other: &Self) -> bool {
        self.sqr_distance(*other) < EPSILON * EPSILON
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl fmt::Debug for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({}, {}, {})", self.x, self.y, self.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X = {}.  Y = {}.  Z = {}.", self.x, self.y, self.z)
    }
}

// ============================================================================
// Operators
// ============================================================================

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        v * self
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, scalar: f32) {
        *self = *self * scalar;
    }
}

impl DivAssign<f32> for Vector3 {
    fn div_assign(&mut self, scalar: f32) {
        *self = *self / scalar;
    }
}
