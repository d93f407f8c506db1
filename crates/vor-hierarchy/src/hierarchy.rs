//! Hierarchy - arena holding every transform node.
//!
//! Nodes refer to each other by [`NodeId`]. A child stores its parent's handle and the
//! parent stores an ordered list of child handles; neither owns the other, the arena owns
//! both.
//!
//! Cycles (a node becoming its own ancestor) are a caller error. Only the direct
//! self-parenting case is rejected; anything longer makes
//! [`local_to_world_matrix`](Hierarchy::local_to_world_matrix) loop.

use vor_math::{Matrix4, Quaternion, Vector3};

use crate::{
    Space,
    node::{NodeAllocator, NodeId},
    transform::TransformNode,
};

/// Arena of [`TransformNode`]s.
#[derive(Default)]
pub struct Hierarchy {
    allocator: NodeAllocator,
    /// Node data indexed by slot.
    nodes: Vec<Option<TransformNode>>,
}

impl Hierarchy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Node Operations ====================

    /// Spawn a root node with identity transform.
    pub fn spawn(&mut self) -> NodeId {
        self.insert(TransformNode::default())
    }

    /// Spawn a root node with the given local transform.
    pub fn spawn_with(&mut self, position: Vector3, rotation: Quaternion, scale: Vector3) -> NodeId {
        self.insert(TransformNode::new(position, rotation, scale))
    }

    fn insert(&mut self, node: TransformNode) -> NodeId {
        let id = self.allocator.allocate();
        let slot = id.index() as usize;

        if slot >= self.nodes.len() {
            self.nodes.resize_with(slot + 1, || None);
        }
        self.nodes[slot] = Some(node);

        id
    }

    /// Remove a node.
    ///
    /// The node is detached from its parent and its children become roots, keeping their
    /// local transforms. Returns `false` for a stale handle.
    pub fn despawn(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.get(id).map(TransformNode::parent) else {
            return false;
        };

        if let Some(parent) = parent {
            self.remove_child(parent, id);
        }

        let Some(node) = self.nodes[id.index() as usize].take() else {
            return false;
        };
        for child in node.children {
            if let Some(child) = self.get_mut(child) {
                child.parent = None;
            }
        }

        self.allocator.deallocate(id)
    }

    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.allocator.is_alive(id)
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.allocator.alive_count() as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&TransformNode> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes.get(id.index() as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TransformNode> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes.get_mut(id.index() as usize)?.as_mut()
    }

    // ==================== Parent/Child Operations ====================

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Children of `id`, empty for a stale handle.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(node) => node.children(),
            None => &[],
        }
    }

    /// Make `child` a child of `parent`.
    ///
    /// Does nothing if `child` is already a child of `parent`, if either handle is stale,
    /// or if `parent == child`. A child with a different parent is moved.
    /// Returns whether the hierarchy changed.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent == child || !self.is_alive(parent) || !self.is_alive(child) {
            return false;
        }
        if self.children(parent).contains(&child) {
            return false;
        }

        if let Some(previous) = self.parent(child) {
            self.remove_child(previous, child);
        }

        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }

        tracing::trace!(%parent, %child, "attached node");
        true
    }

    /// Detach `child` from `parent`, making it a root.
    ///
    /// Does nothing if `child` is not a child of `parent`.
    /// Returns whether the hierarchy changed.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(node) = self.get_mut(parent) else {
            return false;
        };
        let Some(position) = node.children.iter().position(|&c| c == child) else {
            return false;
        };
        node.children.remove(position);

        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }

        tracing::trace!(%parent, %child, "detached node");
        true
    }

    // ==================== Transform Operations ====================

    /// Local-to-world matrix: `parent_world * TRS(local)`, composed up to the root.
    ///
    /// Returns `None` for a stale handle.
    #[must_use]
    pub fn local_to_world_matrix(&self, id: NodeId) -> Option<Matrix4> {
        let node = self.get(id)?;
        let mut matrix = node.local_matrix();
        let mut ancestor = node.parent;

        while let Some(parent) = ancestor.and_then(|p| self.get(p)) {
            matrix = parent.local_matrix() * matrix;
            ancestor = parent.parent;
        }

        Some(matrix)
    }

    /// World-space position of `id`.
    #[must_use]
    pub fn world_position(&self, id: NodeId) -> Option<Vector3> {
        Some(self.local_to_world_matrix(id)?.get_translation())
    }

    /// Move a node.
    ///
    /// In [`Space::Local`] the translation is added to `local_position` as given. In
    /// [`Space::World`] it is first rotated by the node's own `local_rotation`, not by any
    /// ancestor rotation.
    pub fn translate(&mut self, id: NodeId, translation: Vector3, relative_to: Space) -> bool {
        let Some(node) = self.get_mut(id) else {
            return false;
        };

        node.local_position += match relative_to {
            Space::Local => translation,
            Space::World => node.local_rotation * translation,
        };
        true
    }

    /// Rotate a node by Euler angles in degrees.
    ///
    /// In [`Space::Local`] the delta is composed on the right of the current rotation,
    /// in [`Space::World`] on the left.
    pub fn rotate(&mut self, id: NodeId, euler_angles: Vector3, relative_to: Space) -> bool {
        let Some(node) = self.get_mut(id) else {
            return false;
        };

        let delta = Quaternion::from_euler(euler_angles);
        node.local_rotation = match relative_to {
            Space::Local => node.local_rotation * delta,
            Space::World => delta * node.local_rotation,
        };
        true
    }
}
