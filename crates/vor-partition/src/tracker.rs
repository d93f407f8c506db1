//! Per-frame cell tracking for a moving point.
//!
//! The host loop calls [`CellTracker::poll`] once per frame with the tracked position.
//! Drawing is left to the host: [`CellTracker::link`] returns the segment between the
//! position and its site, ready for a renderer.

use serde::{Deserialize, Serialize};
use vor_math::Vector3;

use crate::{SiteId, SpatialPartition};

/// Segment from a tracked position to the site whose cell contains it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellLink {
    pub site: SiteId,
    /// Tracked position.
    pub from: Vector3,
    /// Site position.
    pub to: Vector3,
    pub distance: f32,
}

/// Remembers the last cell a point was found in.
#[derive(Debug, Default, Clone)]
pub struct CellTracker {
    current: Option<SiteId>,
}

impl CellTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the cell containing `position`.
    ///
    /// Cells are tested in site order and the first match wins. If no cell contains the
    /// point the previous result is kept.
    pub fn poll(&mut self, partition: &SpatialPartition, position: Vector3) -> Option<SiteId> {
        if let Some(site) = partition.first_containing_cell(position) {
            if self.current != Some(site) {
                tracing::debug!(%site, %position, "tracked point entered cell");
            }
            self.current = Some(site);
        }

        self.current
    }

    /// Last cell found by [`poll`](Self::poll).
    #[must_use]
    pub const fn current(&self) -> Option<SiteId> {
        self.current
    }

    /// Forget the current cell.
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Segment to draw for `position`.
    ///
    /// `None` before the first successful poll, or if the partition was rebuilt with
    /// fewer sites since.
    #[must_use]
    pub fn link(&self, partition: &SpatialPartition, position: Vector3) -> Option<CellLink> {
        let site = self.current?;
        let to = partition.site(site)?;

        Some(CellLink {
            site,
            from: position,
            to,
            distance: position.distance(to),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sites() -> SpatialPartition {
        SpatialPartition::from_sites([Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0)])
    }

    #[test]
    fn test_poll_follows_point() {
        let partition = two_sites();
        let mut tracker = CellTracker::new();

        assert_eq!(tracker.current(), None);
        assert_eq!(tracker.poll(&partition, Vector3::new(1.0, 0.0, 0.0)), Some(SiteId(0)));
        assert_eq!(tracker.poll(&partition, Vector3::new(9.0, 0.0, 0.0)), Some(SiteId(1)));
        assert_eq!(tracker.current(), Some(SiteId(1)));
    }

    #[test]
    fn test_poll_keeps_last_when_nothing_matches() {
        let partition = two_sites();
        let mut tracker = CellTracker::new();

        tracker.poll(&partition, Vector3::new(9.0, 0.0, 0.0));
        assert_eq!(tracker.poll(&SpatialPartition::new(), Vector3::ZERO), Some(SiteId(1)));

        tracker.reset();
        assert_eq!(tracker.poll(&SpatialPartition::new(), Vector3::ZERO), None);
    }

    #[test]
    fn test_link() {
        let partition = two_sites();
        let mut tracker = CellTracker::new();
        let position = Vector3::new(7.0, 4.0, 0.0);

        assert_eq!(tracker.link(&partition, position), None);

        tracker.poll(&partition, position);
        let link = tracker.link(&partition, position).unwrap();

        assert_eq!(link.site, SiteId(1));
        assert_eq!(link.from, position);
        assert_eq!(link.to, Vector3::new(10.0, 0.0, 0.0));
        assert!((link.distance - 5.0).abs() < 1e-6);

        let shrunk = SpatialPartition::from_sites([Vector3::ZERO]);
        assert_eq!(tracker.link(&shrunk, position), None);
    }
}
