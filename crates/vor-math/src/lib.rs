#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]

//! vor math - value types for 3D placement and partitioning.
//!
//! # Key Types
//!
//! - **Vector3**: 3D vector with approximate (epsilon) equality
//! - **Quaternion**: unit rotation, Hamilton product composition
//! - **Matrix4**: row-major affine transform with TRS composition and decomposition
//!
//! All types are `Copy`, `#[repr(C)]` and `Pod`, so a slice of them can be handed to a
//! renderer via `bytemuck::cast_slice` without conversion.

mod error;
mod matrix;
mod quaternion;
mod vector;

pub use error::{MathError, MathResult};
pub use matrix::Matrix4;
pub use quaternion::Quaternion;
pub use vector::Vector3;

/// Tolerance shared by every approximate comparison in the workspace.
pub const EPSILON: f32 = 1e-5;
