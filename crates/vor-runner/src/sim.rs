//! One run of the host loop.
//!
//! A rig node sits at the centre of the site box with a probe child offset along +X.
//! Each step the rig yaws by `360 / steps` degrees, so the probe sweeps a full circle,
//! and the tracker is polled with the probe's world position.

use rand::SeedableRng as _;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, warn};
use vor_hierarchy::{Hierarchy, Space};
use vor_math::{Quaternion, Vector3};
use vor_partition::{CellLink, CellTracker, SiteId, SpatialPartition, generate_sites};

use crate::config::RunnerConfig;

/// Distance slack allowed between the tracked cell's site and the nearest site.
const DISTANCE_TOLERANCE: f32 = 1e-3;

/// Probe entered a new cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub step: u32,
    pub site: SiteId,
    pub position: Vector3,
}

/// What the run observed, written to stdout as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub seed: u64,
    pub sites: Vec<Vector3>,
    pub steps: u32,
    pub transitions: Vec<Transition>,
    /// Steps where the tracked cell's site was farther than the nearest site.
    pub mismatches: u32,
    pub final_link: Option<CellLink>,
}

pub fn run(config: &RunnerConfig) -> eyre::Result<Summary> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let sites = generate_sites(config.site_count, config.min, config.max, &mut rng)?;
    let partition = SpatialPartition::from_sites(sites.iter().copied());
    info!(sites = partition.len(), "partition ready");

    let centre = config.min.lerp(config.max, 0.5);
    let radius = (config.max - config.min).magnitude() * 0.3;

    let mut hierarchy = Hierarchy::new();
    let rig = hierarchy.spawn_with(centre, Quaternion::IDENTITY, Vector3::ONE);
    let probe = hierarchy.spawn_with(Vector3::RIGHT * radius, Quaternion::IDENTITY, Vector3::ONE);
    hierarchy.add_child(rig, probe);

    let yaw_step = Vector3::new(0.0, 360.0 / config.steps as f32, 0.0);
    let mut tracker = CellTracker::new();
    let mut transitions = Vec::new();
    let mut mismatches = 0;
    let mut position = centre;

    for step in 0..config.steps {
        position = hierarchy
            .world_position(probe)
            .ok_or_else(|| eyre::eyre!("probe node missing from hierarchy"))?;

        let previous = tracker.current();
        let tracked = tracker.poll(&partition, position);
        let nearest = partition.get_nearest_node_index(position);

        if let Some(site) = tracked.filter(|&site| Some(site) != previous) {
            info!(step, %site, %position, "probe entered cell");
            transitions.push(Transition { step, site, position });
        }

        if let (Some(site), Some(_)) = (tracked.and_then(|s| partition.site(s)), nearest.index) {
            let excess = site.distance(position) - nearest.distance;
            if excess > DISTANCE_TOLERANCE {
                warn!(step, excess, "tracked cell disagrees with nearest site");
                mismatches += 1;
            }
        }

        debug!(step, %position, nearest = nearest.raw_index(), "step");
        hierarchy.rotate(rig, yaw_step, Space::Local);
    }

    Ok(Summary {
        seed: config.seed,
        sites,
        steps: config.steps,
        transitions,
        mismatches,
        final_link: tracker.link(&partition, position),
    })
}
