//! Local transform data for a single node.

use smallvec::SmallVec;
use vor_math::{Matrix4, Quaternion, Vector3};

use crate::NodeId;

/// Reference frame for [`Hierarchy::translate`](crate::Hierarchy::translate) and
/// [`Hierarchy::rotate`](crate::Hierarchy::rotate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Space {
    /// Relative to the parent's frame.
    World,
    /// Relative to the node itself.
    #[default]
    Local,
}

/// Position, rotation and scale relative to the parent, plus hierarchy links.
#[derive(Debug, Clone)]
pub struct TransformNode {
    pub local_position: Vector3,
    pub local_rotation: Quaternion,
    pub local_scale: Vector3,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
}

impl Default for TransformNode {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Quaternion::IDENTITY, Vector3::ONE)
    }
}

impl TransformNode {
    /// A detached node with the given local transform.
    #[must_use]
    pub fn new(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self {
            local_position: position,
            local_rotation: rotation,
            local_scale: scale,
            parent: None,
            children: SmallVec::new(),
        }
    }

    /// `TRS(local_position, local_rotation, local_scale)`.
    #[must_use]
    pub fn local_matrix(&self) -> Matrix4 {
        Matrix4::trs(self.local_position, self.local_rotation, self.local_scale)
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
