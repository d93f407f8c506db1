//! Half-spaces bounded by a plane.

use serde::{Deserialize, Serialize};
use vor_math::{EPSILON, Vector3};

/// The plane `dot(normal, p) = d`, with `dot(normal, p) > d` as the positive (outside) side.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HalfSpace {
    /// Unit normal, pointing to the positive side.
    pub normal: Vector3,
    /// Signed offset from the origin along `normal`.
    pub d: f32,
}

impl HalfSpace {
    /// Plane through `point_on_plane` facing `normal`.
    ///
    /// `normal` is normalized. If it is shorter than `EPSILON` it is replaced by
    /// [`Vector3::UP`].
    #[must_use]
    pub fn new(normal: Vector3, point_on_plane: Vector3) -> Self {
        let mag = normal.magnitude();
        let normal = if mag > EPSILON { normal / mag } else { Vector3::UP };

        Self {
            normal,
            d: normal.dot(point_on_plane),
        }
    }

    /// Perpendicular bisector of `a` and `b`, with `a` on the non-positive side.
    ///
    /// Coincident sites fall back to an upward normal through the shared point.
    #[must_use]
    pub fn bisector(a: Vector3, b: Vector3) -> Self {
        let midpoint = Vector3::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5, (a.z + b.z) * 0.5);
        Self::new(b - a, midpoint)
    }

    /// Distance from the plane, positive on the outside.
    #[must_use]
    pub fn signed_distance(&self, p: Vector3) -> f32 {
        self.normal.dot(p) - self.d
    }

    /// Strictly outside, with no tolerance.
    #[must_use]
    pub fn is_positive_side(&self, p: Vector3) -> bool {
        self.signed_distance(p) > 0.0
    }
}
