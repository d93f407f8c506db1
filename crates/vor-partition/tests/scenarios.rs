//! End-to-end partition scenarios, including points placed through a transform hierarchy.

#![allow(clippy::float_cmp)]

use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};
use vor_hierarchy::{Hierarchy, Space};
use vor_math::{Quaternion, Vector3};
use vor_partition::{CellTracker, SiteId, SpatialPartition, generate_sites};

fn random_point(rng: &mut StdRng, extent: f32) -> Vector3 {
    Vector3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

#[test]
fn test_two_site_scenario() {
    let partition = SpatialPartition::from_sites([Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0)]);

    let inside_zero = Vector3::new(2.0, 0.0, 0.0);
    let inside_one = Vector3::new(8.0, 0.0, 0.0);
    let boundary = Vector3::new(5.0, 0.0, 0.0);

    assert!(partition.is_point_inside_cell(SiteId(0), inside_zero));
    assert!(!partition.is_point_inside_cell(SiteId(1), inside_zero));
    assert!(partition.is_point_inside_cell(SiteId(1), inside_one));
    assert!(partition.is_point_inside_cell(SiteId(0), boundary));
    assert!(partition.is_point_inside_cell(SiteId(1), boundary));

    let nearest = partition.get_nearest_node_index(Vector3::new(9.0, 0.0, 0.0));
    assert_eq!(nearest.raw_index(), 1);
    assert!((nearest.distance - 1.0).abs() < 1e-6);

    let empty = SpatialPartition::new().get_nearest_node_index(Vector3::new(9.0, 0.0, 0.0));
    assert_eq!(empty.raw_index(), -1);
    assert_eq!(empty.distance, f32::INFINITY);
}

#[test]
fn test_containment_agrees_with_nearest_site() {
    let mut rng = StdRng::seed_from_u64(2024);
    let sites: Vec<_> = (0..24).map(|_| random_point(&mut rng, 10.0)).collect();
    let partition = SpatialPartition::from_sites(sites.iter().copied());

    for _ in 0..2000 {
        let p = random_point(&mut rng, 12.0);
        let nearest = partition.get_nearest_node_index(p);
        let owner = nearest.index.unwrap();

        // The nearest site's cell always contains the point
        assert!(partition.is_point_inside_cell(owner, p), "{p:?}");

        // Any other cell containing it must be (nearly) tied for distance
        for (i, site) in sites.iter().enumerate() {
            let id = SiteId(i as u32);
            if id != owner && partition.is_point_inside_cell(id, p) {
                assert!((site.distance(p) - nearest.distance).abs() < 1e-2);
            }
        }

        let cell = partition.cell_of(p).unwrap();
        assert!(cell <= owner);
        assert!(partition.is_point_inside_cell(cell, p));
    }
}

#[test]
fn test_generated_sites_own_their_cells() {
    let mut rng = StdRng::seed_from_u64(77);
    let sites = generate_sites(
        30,
        Vector3::new(-10.0, 0.0, -10.0),
        Vector3::new(10.0, 0.0, 10.0),
        &mut rng,
    )
    .unwrap();
    let partition = SpatialPartition::from_sites(sites.clone());

    for (i, &site) in sites.iter().enumerate() {
        assert!(partition.is_point_inside_cell(SiteId(i as u32), site));
        assert_eq!(partition.get_nearest_node_index(site).index, Some(SiteId(i as u32)));
    }
}

#[test]
fn test_hierarchy_child_crosses_cells() {
    let partition = SpatialPartition::from_sites([Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0)]);
    let mut hierarchy = Hierarchy::new();
    let rig = hierarchy.spawn();
    let probe = hierarchy.spawn_with(Vector3::RIGHT, Quaternion::IDENTITY, Vector3::ONE);
    hierarchy.add_child(rig, probe);

    let mut tracker = CellTracker::new();
    let mut visited = Vec::new();

    for _ in 0..10 {
        let position = hierarchy.world_position(probe).unwrap();
        if let Some(site) = tracker.poll(&partition, position) {
            if visited.last() != Some(&site) {
                visited.push(site);
            }
        }
        hierarchy.translate(rig, Vector3::RIGHT, Space::Local);
    }

    assert_eq!(visited, vec![SiteId(0), SiteId(1)]);
    assert_eq!(
        hierarchy.world_position(probe),
        Some(Vector3::new(11.0, 0.0, 0.0))
    );
}

#[test]
fn test_parent_translation_reaches_child() {
    let mut hierarchy = Hierarchy::new();
    let parent = hierarchy.spawn();
    let child = hierarchy.spawn_with(Vector3::new(1.0, 0.0, 0.0), Quaternion::IDENTITY, Vector3::ONE);

    hierarchy.add_child(parent, child);
    hierarchy.translate(parent, Vector3::new(5.0, 0.0, 0.0), Space::Local);

    let world = hierarchy.local_to_world_matrix(child).unwrap();
    assert_eq!(world.get_translation(), Vector3::new(6.0, 0.0, 0.0));
}
