#![allow(clippy::float_cmp)]

//! vor hierarchy - parented transform nodes.
//!
//! A [`Hierarchy`] owns every [`TransformNode`]. Nodes point at their parent and children
//! through generational [`NodeId`] handles, so there is no shared ownership and a
//! despawned node cannot be reached through an old handle.
//!
//! ```ignore
//! let mut hierarchy = Hierarchy::new();
//! let parent = hierarchy.spawn();
//! let child = hierarchy.spawn_with(Vector3::RIGHT, Quaternion::IDENTITY, Vector3::ONE);
//!
//! hierarchy.add_child(parent, child);
//! hierarchy.translate(parent, Vector3::new(5.0, 0.0, 0.0), Space::Local);
//!
//! // (6, 0, 0)
//! let world = hierarchy.world_position(child);
//! ```

mod hierarchy;
mod node;
mod transform;

pub use hierarchy::Hierarchy;
pub use node::NodeId;
pub use transform::{Space, TransformNode};
