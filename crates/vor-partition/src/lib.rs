#![allow(clippy::float_cmp)]

//! vor partition - implicit 3D Voronoi cells.
//!
//! Divides space among a set of sites without building any cell geometry. A point is in
//! a site's cell when it is on the site's side of the bisector plane against every other
//! site.
//!
//! # Key Types
//!
//! - **HalfSpace**: plane plus side test, built as the bisector of two sites
//! - **SpatialPartition**: per-site bisector table with containment and nearest queries
//! - **CellTracker**: per-frame containment poll for a moving point
//!
//! ```ignore
//! let partition = SpatialPartition::from_sites([Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0)]);
//!
//! assert!(partition.is_point_inside_cell(SiteId(0), Vector3::new(2.0, 0.0, 0.0)));
//! assert_eq!(partition.get_nearest_node_index(Vector3::new(9.0, 0.0, 0.0)).index, Some(SiteId(1)));
//! ```

mod error;
pub mod generate;
mod partition;
mod plane;
pub mod tracker;

pub use error::{GenerateError, GenerateResult};
pub use generate::generate_sites;
pub use partition::{Nearest, SiteId, SpatialPartition};
pub use plane::HalfSpace;
pub use tracker::{CellLink, CellTracker};
