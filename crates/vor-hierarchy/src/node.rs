//! Node handles with generational indices.
//!
//! Parent links are plain handles, not references, so a despawned parent is detected by
//! its generation instead of dangling.

use std::fmt;

/// Handle to a [`TransformNode`](crate::TransformNode) inside a [`Hierarchy`](crate::Hierarchy).
///
/// The generation is bumped every time a slot is freed, so a handle issued before the
/// free no longer matches the slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// How many times the slot had been recycled when this handle was issued.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Allocator for node slots with generation tracking.
#[derive(Default)]
pub(crate) struct NodeAllocator {
    /// Current generation of each slot.
    generations: Vec<u32>,
    /// Free list of recycled slots.
    free_list: Vec<u32>,
    /// Number of live nodes.
    alive_count: u32,
}

impl NodeAllocator {
    pub(crate) fn allocate(&mut self) -> NodeId {
        self.alive_count += 1;

        if let Some(index) = self.free_list.pop() {
            NodeId::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            NodeId::new(index, 0)
        }
    }

    /// Returns `true` if the handle was live and is now freed.
    pub(crate) fn deallocate(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }

        let slot = id.index() as usize;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free_list.push(id.index());
        self.alive_count -= 1;
        true
    }

    pub(crate) fn is_alive(&self, id: NodeId) -> bool {
        self.generations
            .get(id.index() as usize)
            .is_some_and(|&g| g == id.generation())
    }

    pub(crate) const fn alive_count(&self) -> u32 {
        self.alive_count
    }
}
