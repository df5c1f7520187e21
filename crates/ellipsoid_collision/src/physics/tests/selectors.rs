use super::*;
use crate::foundation::math::Transform;
use crate::physics::{CollisionManager, CollisionOutcome, CollisionRequest};
use crate::scene::NodeRegistry;
use crate::spatial::{MetaTriangleSelector, OctreeConfig, OctreeTriangleSelector};

#[test]
fn test_hit_node_follows_last_contact() {
    let mut registry = NodeRegistry::new();
    let floor_node = registry.insert("floor", Transform::identity());
    let wall_node = registry.insert("wall", Transform::identity());

    let mut level = MetaTriangleSelector::new();
    level.add_selector(Box::new(selector_of(vec![floor_triangle()], Some(floor_node))));
    level.add_selector(Box::new(selector_of(vec![wall_triangle(2.0)], Some(wall_node))));

    let mut manager = CollisionManager::new();
    let request = CollisionRequest::new(Vec3::new(0.0, 1.5, -10.0), Vec3::new(1.0, 1.0, 1.0), Vec3::new(4.0, 0.0, 0.0));

    // Walking into the wall with no gravity: the wall is the only contact
    let outcome = manager.collide_ellipsoid_with_world(Some(&level), &request).unwrap();
    let hit = outcome.hit.unwrap();
    assert_eq!(hit.node, Some(wall_node));
    assert_eq!(registry.name_of(wall_node), Some("wall"));

    // With gravity the floor contact of the second pass is reported
    let outcome = manager
        .collide_ellipsoid_with_world(Some(&level), &request.with_gravity(Vec3::new(0.0, -1.0, 0.0)))
        .unwrap();
    let hit = outcome.hit.unwrap();
    assert_eq!(hit.node, Some(floor_node));
    assert!(!outcome.falling);
}

/// Gently rolling terrain as a grid of quads
fn terrain(cells: usize) -> Vec<Triangle> {
    let height = |i: usize, j: usize| ((i as f32) * 0.7).sin() * 0.4 + ((j as f32) * 0.5).cos() * 0.3;
    let mut triangles = Vec::with_capacity(cells * cells * 2);
    for i in 0..cells {
        for j in 0..cells {
            let p = |di: usize, dj: usize| {
                Vec3::new((i + di) as f32, height(i + di, j + dj), (j + dj) as f32)
            };
            triangles.push(Triangle::new(p(0, 0), p(0, 1), p(1, 0)));
            triangles.push(Triangle::new(p(1, 0), p(0, 1), p(1, 1)));
        }
    }
    triangles
}

fn walk(selector: &dyn TriangleSelector, start: Vec3, steps: usize) -> Vec<CollisionOutcome> {
    let mut manager = CollisionManager::new();
    let mut position = start;
    let mut outcomes = Vec::new();
    for step in 0..steps {
        let heading = (step as f32) * 0.3;
        let velocity = Vec3::new(heading.cos(), 0.0, heading.sin()) * 0.6;
        let request = CollisionRequest::new(position, Vec3::new(0.4, 0.8, 0.4), velocity)
            .with_gravity(Vec3::new(0.0, -0.5, 0.0));
        let outcome = manager
            .collide_ellipsoid_with_world(Some(selector), &request)
            .unwrap();
        position = outcome.position;
        outcomes.push(outcome);
    }
    outcomes
}

#[test]
fn test_octree_and_flat_selectors_agree() {
    let mut registry = NodeRegistry::new();
    let ground = registry.insert("ground", Transform::identity());

    let flat = selector_of(terrain(24), Some(ground));
    let config = OctreeConfig {
        max_triangles_per_node: 8,
        ..OctreeConfig::default()
    };
    let octree = OctreeTriangleSelector::from_mesh_selector(&flat, &config);
    assert!(octree.node_count() > 1);

    let start = Vec3::new(12.0, 3.0, 12.0);
    let expected = walk(&flat, start, 20);
    let actual = walk(&octree, start, 20);

    assert_eq!(actual, expected);
    assert!(expected.iter().any(|outcome| outcome.hit.map_or(false, |hit| hit.node == Some(ground))));
}

#[test]
fn test_parallel_actors_share_one_world() {
    let world = selector_of(terrain(16), None);
    let starts = [
        Vec3::new(4.0, 2.0, 4.0),
        Vec3::new(8.0, 2.5, 6.0),
        Vec3::new(10.0, 3.0, 11.0),
        Vec3::new(6.0, 2.0, 12.0),
    ];

    let sequential: Vec<_> = starts.iter().map(|&start| walk(&world, start, 10)).collect();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = starts
            .iter()
            .map(|&start| {
                let world = &world;
                scope.spawn(move || walk(world, start, 10))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(parallel, sequential);
}
