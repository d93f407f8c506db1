//! Spatial partition over a fixed set of sites.
//!
//! Each site's cell is the intersection of the half-spaces on its side of the bisector
//! against every other site. Cells are never built as geometry; containment is answered
//! by testing the point against the stored planes.
//!
//! ```text
//!   site 0            site 1
//!     *-------|-------*
//!     cell 0  |  cell 1
//!          bisector
//! ```
//!
//! The site list is a snapshot. When sites move, call
//! [`build_all_partitions`](SpatialPartition::build_all_partitions) again; nothing is
//! updated incrementally.

use std::fmt;

use serde::{Deserialize, Serialize};
use vor_math::{EPSILON, Vector3};

use crate::HalfSpace;

/// Index of a site (and of its cell) in the order sites were supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteId(pub u32);

impl SiteId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of [`SpatialPartition::get_nearest_node_index`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Nearest {
    /// Closest site, `None` when there are no sites.
    pub index: Option<SiteId>,
    /// Euclidean distance to that site, `f32::INFINITY` when there are no sites.
    pub distance: f32,
}

impl Nearest {
    /// Result for an empty site set.
    pub const NONE: Self = Self {
        index: None,
        distance: f32::INFINITY,
    };

    /// Index as a signed integer, `-1` when there are no sites.
    #[must_use]
    pub fn raw_index(&self) -> i64 {
        self.index.map_or(-1, |site| i64::from(site.0))
    }
}

/// Brute-force Voronoi partition.
///
/// Building is O(n²) in the number of sites; every query is O(n).
#[derive(Debug, Default, Clone)]
pub struct SpatialPartition {
    /// Site positions, snapshotted at build time.
    sites: Vec<Vector3>,
    /// `planes[i]` holds one bisector per other site, in site order.
    planes: Vec<Vec<HalfSpace>>,
}

impl SpatialPartition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a partition from the given sites.
    #[must_use]
    pub fn from_sites<I>(sites: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Vector3>>,
    {
        let mut partition = Self::new();
        partition.build_all_partitions(sites);
        partition
    }

    /// Replace all sites and rebuild every cell.
    ///
    /// Accepts plain positions or `Option`s; a missing position is treated as the origin.
    /// Sites that coincide (within `EPSILON`) are kept, but logged, since the bisector
    /// between them is the fallback plane rather than a real boundary.
    pub fn build_all_partitions<I>(&mut self, sites: I)
    where
        I: IntoIterator,
        I::Item: Into<Option<Vector3>>,
    {
        self.sites.clear();
        self.sites
            .extend(sites.into_iter().map(|site| site.into().unwrap_or(Vector3::ZERO)));

        let n = self.sites.len();
        self.planes.clear();
        self.planes.reserve(n);

        for (i, &site) in self.sites.iter().enumerate() {
            let mut planes = Vec::with_capacity(n.saturating_sub(1));
            for (j, &other) in self.sites.iter().enumerate() {
                if i == j {
                    continue;
                }
                if j > i && site == other {
                    tracing::warn!(first = i, second = j, position = %site, "coincident sites");
                }
                planes.push(HalfSpace::bisector(site, other));
            }
            self.planes.push(planes);
        }

        tracing::debug!(
            sites = n,
            planes = n * n.saturating_sub(1),
            "rebuilt spatial partition"
        );
    }

    /// Whether `point` lies in the cell of `site`.
    ///
    /// Points on a shared boundary, or outside it by at most `EPSILON`, belong to both
    /// cells. Unknown sites contain nothing.
    #[must_use]
    pub fn is_point_inside_cell(&self, site: SiteId, point: Vector3) -> bool {
        self.planes
            .get(site.index())
            .is_some_and(|planes| planes.iter().all(|plane| plane.signed_distance(point) <= EPSILON))
    }

    /// Closest site to `point`. Ties go to the lowest index.
    #[must_use]
    pub fn get_nearest_node_index(&self, point: Vector3) -> Nearest {
        let mut best: Option<(usize, f32)> = None;

        for (i, site) in self.sites.iter().enumerate() {
            let sqr_distance = site.sqr_distance(point);
            if best.is_none_or(|(_, current)| sqr_distance < current) {
                best = Some((i, sqr_distance));
            }
        }

        match best {
            Some((i, sqr_distance)) => Nearest {
                index: Some(SiteId(i as u32)),
                distance: sqr_distance.sqrt(),
            },
            None => Nearest::NONE,
        }
    }

    /// First cell, in site order, that contains `point`.
    #[must_use]
    pub fn first_containing_cell(&self, point: Vector3) -> Option<SiteId> {
        (0..self.sites.len())
            .map(|i| SiteId(i as u32))
            .find(|&site| self.is_point_inside_cell(site, point))
    }

    /// Cell owning `point`.
    ///
    /// Uses [`first_containing_cell`](Self::first_containing_cell), and falls back to the
    /// nearest site if rounding left the point outside every cell. `None` only when there
    /// are no sites.
    #[must_use]
    pub fn cell_of(&self, point: Vector3) -> Option<SiteId> {
        self.first_containing_cell(point)
            .or_else(|| self.get_nearest_node_index(point).index)
    }

    // ==================== Accessors ====================

    /// Snapshotted site positions.
    #[must_use]
    pub fn sites(&self) -> &[Vector3] {
        &self.sites
    }

    #[must_use]
    pub fn site(&self, site: SiteId) -> Option<Vector3> {
        self.sites.get(site.index()).copied()
    }

    /// Bisector planes bounding the cell of `site`, empty for unknown sites.
    #[must_use]
    pub fn planes(&self, site: SiteId) -> &[HalfSpace] {
        match self.planes.get(site.index()) {
            Some(planes) => planes,
            None => &[],
        }
    }

    /// Number of sites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sites() -> SpatialPartition {
        SpatialPartition::from_sites([Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0)])
    }

    #[test]
    fn test_two_site_containment() {
        let partition = two_sites();

        assert!(partition.is_point_inside_cell(SiteId(0), Vector3::new(2.0, 0.0, 0.0)));
        assert!(!partition.is_point_inside_cell(SiteId(1), Vector3::new(2.0, 0.0, 0.0)));
        assert!(partition.is_point_inside_cell(SiteId(1), Vector3::new(8.0, 0.0, 0.0)));
        assert!(!partition.is_point_inside_cell(SiteId(0), Vector3::new(8.0, 0.0, 0.0)));
    }

    #[test]
    fn test_boundary_belongs_to_both() {
        let partition = two_sites();

        for point in [
            Vector3::new(5.0, 0.0, 0.0),
            Vector3::new(5.0, 7.0, -3.0),
            Vector3::new(5.0 + EPSILON * 0.5, 0.0, 0.0),
            Vector3::new(5.0 - EPSILON * 0.5, 0.0, 0.0),
        ] {
            assert!(partition.is_point_inside_cell(SiteId(0), point), "{point:?}");
            assert!(partition.is_point_inside_cell(SiteId(1), point), "{point:?}");
        }

        assert!(!partition.is_point_inside_cell(SiteId(0), Vector3::new(5.001, 0.0, 0.0)));
    }

    #[test]
    fn test_unknown_index_contains_nothing() {
        let partition = two_sites();

        assert!(!partition.is_point_inside_cell(SiteId(2), Vector3::ZERO));
        assert!(!SpatialPartition::new().is_point_inside_cell(SiteId(0), Vector3::ZERO));
        assert!(partition.planes(SiteId(7)).is_empty());
        assert_eq!(partition.site(SiteId(7)), None);
    }

    #[test]
    fn test_nearest() {
        let partition = two_sites();

        let nearest = partition.get_nearest_node_index(Vector3::new(9.0, 0.0, 0.0));
        assert_eq!(nearest.index, Some(SiteId(1)));
        assert!((nearest.distance - 1.0).abs() < 1e-6);
        assert_eq!(nearest.raw_index(), 1);
    }

    #[test]
    fn test_nearest_tie_prefers_first() {
        let partition = two_sites();

        let nearest = partition.get_nearest_node_index(Vector3::new(5.0, 1.0, 0.0));
        assert_eq!(nearest.index, Some(SiteId(0)));
    }

    #[test]
    fn test_nearest_on_empty() {
        let nearest = SpatialPartition::new().get_nearest_node_index(Vector3::ONE);

        assert_eq!(nearest.index, None);
        assert_eq!(nearest.raw_index(), -1);
        assert!(nearest.distance.is_infinite() && nearest.distance > 0.0);
    }

    #[test]
    fn test_single_site_owns_everything() {
        let partition = SpatialPartition::from_sites([Vector3::new(3.0, 3.0, 3.0)]);

        assert!(partition.planes(SiteId(0)).is_empty());
        assert!(partition.is_point_inside_cell(SiteId(0), Vector3::new(-1e6, 0.0, 1e6)));
        assert_eq!(partition.cell_of(Vector3::ZERO), Some(SiteId(0)));
    }

    #[test]
    fn test_missing_positions_become_origin() {
        let partition =
            SpatialPartition::from_sites([Some(Vector3::new(4.0, 0.0, 0.0)), None, None]);

        assert_eq!(partition.len(), 3);
        assert_eq!(partition.sites()[1], Vector3::ZERO);
        // Sites 1 and 2 coincide, so their mutual plane is the upward fallback
        assert_eq!(partition.planes(SiteId(1))[1].normal, Vector3::UP);
    }

    #[test]
    fn test_plane_table_shape() {
        let sites: Vec<_> = (0..5).map(|i| Vector3::new(i as f32, 0.0, 0.0)).collect();
        let partition = SpatialPartition::from_sites(sites.clone());

        for i in 0..5 {
            let planes = partition.planes(SiteId(i));
            assert_eq!(planes.len(), 4);
            for plane in planes {
                assert!(plane.signed_distance(sites[i as usize]) < 0.0);
            }
        }
    }

    #[test]
    fn test_rebuild_replaces_state() {
        let mut partition = two_sites();
        partition.build_all_partitions([Vector3::new(-4.0, 0.0, 0.0)]);

        assert_eq!(partition.len(), 1);
        assert!(!partition.is_point_inside_cell(SiteId(1), Vector3::new(8.0, 0.0, 0.0)));
        assert!(partition.is_point_inside_cell(SiteId(0), Vector3::new(8.0, 0.0, 0.0)));

        partition.build_all_partitions(Vec::<Vector3>::new());
        assert!(partition.is_empty());
        assert_eq!(partition.cell_of(Vector3::ZERO), None);
    }

    #[test]
    fn test_cell_of_prefers_first_index_on_boundary() {
        let partition = two_sites();

        assert_eq!(partition.cell_of(Vector3::new(5.0, 0.0, 0.0)), Some(SiteId(0)));
        assert_eq!(partition.cell_of(Vector3::new(7.0, 0.0, 0.0)), Some(SiteId(1)));
        assert_eq!(partition.first_containing_cell(Vector3::new(-1.0, 0.0, 0.0)), Some(SiteId(0)));
    }
}
