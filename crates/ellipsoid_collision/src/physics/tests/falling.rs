use approx::assert_relative_eq;

use super::*;
use crate::core::CollisionConfig;
use crate::physics::{CollisionManager, CollisionRequest};

fn gravity() -> Vec3 {
    Vec3::new(0.0, -1.0, 0.0)
}

#[test]
fn test_unsupported_body_is_falling() {
    let floor = selector_of(vec![floor_triangle()], None);
    let mut manager = CollisionManager::new();

    // Far above the floor
    let request = CollisionRequest::new(Vec3::new(-10.0, 40.0, -10.0), Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.5, 0.0, 0.0))
        .with_gravity(gravity());
    let outcome = manager.collide_ellipsoid_with_world(Some(&floor), &request).unwrap();

    assert!(outcome.falling);
    assert!(!outcome.hit_occurred());
    assert_relative_eq!(outcome.position, Vec3::new(-9.5, 39.0, -10.0), epsilon = 1e-5);

    // Beside the floor entirely
    let request = CollisionRequest::new(Vec3::new(300.0, 1.0, 300.0), Vec3::new(1.0, 1.0, 1.0), Vec3::zeros())
        .with_gravity(gravity());
    let outcome = manager.collide_ellipsoid_with_world(Some(&floor), &request).unwrap();
    assert!(outcome.falling);

    // No world at all
    let outcome = manager.collide_ellipsoid_with_world(None, &request).unwrap();
    assert!(outcome.falling);
}

#[test]
fn test_resting_body_is_not_falling() {
    let floor = selector_of(vec![floor_triangle()], None);
    let mut manager = CollisionManager::new();
    let config = CollisionConfig::default()
        .with_radius(Vec3::new(0.5, 1.0, 0.5))
        .with_gravity(gravity());
    let rest_height = config.radius.y * (1.0 + config.sliding_epsilon);

    let mut position = Vec3::new(-10.0, rest_height, -10.0);
    for _ in 0..5 {
        let request = CollisionRequest::from_config(&config, position, Vec3::new(0.25, 0.0, 0.0));
        let outcome = manager.collide_ellipsoid_with_world(Some(&floor), &request).unwrap();

        assert!(!outcome.falling);
        assert!(outcome.hit_occurred());
        assert_relative_eq!(outcome.position.y, rest_height, epsilon = 1e-4);
        position = outcome.position;
    }

    // Walked the full distance while standing on the floor
    assert_relative_eq!(position.x, -8.75, epsilon = 1e-3);
}

#[test]
fn test_landing_ends_falling() {
    let floor = selector_of(vec![floor_triangle()], None);
    let mut manager = CollisionManager::new();

    let mut position = Vec3::new(-10.0, 3.5, -10.0);
    let mut states = Vec::new();
    for _ in 0..4 {
        let request = CollisionRequest::new(position, Vec3::new(1.0, 1.0, 1.0), Vec3::zeros()).with_gravity(gravity());
        let outcome = manager.collide_ellipsoid_with_world(Some(&floor), &request).unwrap();
        states.push(outcome.falling);
        position = outcome.position;
    }

    // 3.5 -> 2.5 -> 1.5 falling, then lands and stays landed
    assert_eq!(states, vec![true, true, false, false]);
    assert_relative_eq!(position.y, 1.0 + EPSILON, epsilon = 1e-4);
}

#[test]
fn test_zero_gravity_skips_falling_check() {
    let mut manager = CollisionManager::new();
    let request = CollisionRequest::new(Vec3::new(0.0, 100.0, 0.0), Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 0.0, 0.0));

    let outcome = manager.collide_ellipsoid_with_world(None, &request).unwrap();
    assert!(!outcome.falling);
    assert_eq!(outcome.position, Vec3::new(1.0, 100.0, 0.0));
}
