//! Walker demo application
//!
//! Builds a small level (floor, enclosing walls, a ramp and a few
//! pillars) and walks an ellipsoid across it, logging where it ends up
//! each tick, whether it is falling and which node it touched.
//!
//! Usage: `walker_demo [config.toml|config.ron]`
//! Run with `RUST_LOG=debug` to also see ground probes, or `trace` for
//! every slide iteration.

use ellipsoid_collision::config::{Config, ConfigError};
use ellipsoid_collision::core::CollisionConfig;
use ellipsoid_collision::foundation::logging;
use ellipsoid_collision::foundation::math::{Quat, Transform, Vec3};
use ellipsoid_collision::physics::{CollisionError, CollisionManager, CollisionRequest, Line3};
use ellipsoid_collision::scene::{NodeId, NodeRegistry};
use ellipsoid_collision::spatial::{
    MeshTriangleSelector,
    MetaTriangleSelector,
    OctreeConfig,
    OctreeTriangleSelector,
    TriangleSelector,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unit cube centred on the origin
const CUBE_VERTICES: [[f32; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];

/// Outward facing cube, two triangles per side
const CUBE_INDICES: [u32; 36] = [
    0, 2, 1, 0, 3, 2, // -Z
    4, 5, 6, 4, 6, 7, // +Z
    0, 4, 7, 0, 7, 3, // -X
    1, 2, 6, 1, 6, 5, // +X
    0, 1, 5, 0, 5, 4, // -Y
    3, 7, 6, 3, 6, 2, // +Y
];

/// Demo settings, loadable from TOML or RON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct WalkerConfig {
    /// Ellipsoid shape and gravity of the walker
    collision: CollisionConfig,
    /// Where the walker is dropped into the level
    start: Vec3,
    /// Distance covered per tick
    speed: f32,
    /// Largest heading change per tick, radians
    turn_rate: f32,
    /// Number of simulated ticks
    ticks: u32,
    /// Seed for the heading changes and pillar placement
    seed: u64,
    /// Half the side length of the square level
    level_half_size: f32,
    /// Number of pillars scattered over the floor
    pillars: u32,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            collision: CollisionConfig::default()
                .with_radius(Vec3::new(0.4, 0.9, 0.4))
                .with_gravity(Vec3::new(0.0, -0.3, 0.0)),
            start: Vec3::new(0.0, 4.0, 0.0),
            speed: 0.35,
            turn_rate: 0.4,
            ticks: 200,
            seed: 7,
            level_half_size: 16.0,
            pillars: 6,
        }
    }
}

impl Config for WalkerConfig {}

/// Demo errors
#[derive(Error, Debug)]
enum WalkerError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Collision request was rejected
    #[error("Collision error: {0}")]
    Collision(#[from] CollisionError),
}

/// The level and the names of its parts
struct Level {
    nodes: NodeRegistry,
    selector: MetaTriangleSelector,
}

impl Level {
    fn build(config: &WalkerConfig, rng: &mut StdRng) -> Self {
        let mut nodes = NodeRegistry::new();
        let mut selector = MetaTriangleSelector::new();
        let half = config.level_half_size;

        // Floor: a dense grid, so it goes into an octree
        let floor_node = nodes.insert("floor", Transform::identity());
        let floor = grid_mesh(half, (half * 2.0) as u32, floor_node);
        let octree = OctreeTriangleSelector::from_mesh_selector(&floor, &OctreeConfig::default());
        log::info!(
            "Floor: {} triangles in {} octree nodes",
            octree.triangle_count(),
            octree.node_count()
        );
        selector.add_selector(Box::new(octree));

        // Enclosing walls: the cube sides turned inside out
        let walls_transform = Transform::from_position(Vec3::new(0.0, 4.0, 0.0))
            .with_scale(Vec3::new(half * 2.0, 8.0, half * 2.0));
        let walls_node = nodes.insert("walls", walls_transform.clone());
        let inward = flipped(&CUBE_INDICES[..24]);
        selector.add_selector(Box::new(MeshTriangleSelector::from_mesh(
            &cube_vertices(),
            &inward,
            &walls_transform,
            Some(walls_node),
        )));

        // Ramp rising two units over six
        let ramp_transform = Transform::from_position(Vec3::new(half * 0.25, 0.0, -half * 0.5));
        let ramp_node = nodes.insert("ramp", ramp_transform.clone());
        let ramp_vertices = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(6.0, 2.0, 4.0),
            Vec3::new(6.0, 2.0, 0.0),
        ];
        selector.add_selector(Box::new(MeshTriangleSelector::from_mesh(
            &ramp_vertices,
            &[0, 1, 2, 0, 2, 3],
            &ramp_transform,
            Some(ramp_node),
        )));

        // Pillars at random spots, randomly turned
        for i in 0..config.pillars {
            let position = Vec3::new(
                rng.gen_range(-half * 0.8..=half * 0.8),
                2.0,
                rng.gen_range(-half * 0.8..=half * 0.8),
            );
            let rotation = Quat::from_axis_angle(&Vec3::y_axis(), rng.gen_range(0.0..std::f32::consts::PI));
            let transform = Transform::from_position_rotation(position, rotation).with_scale(Vec3::new(1.0, 4.0, 1.0));
            let node = nodes.insert(format!("pillar {}", i), transform.clone());
            selector.add_selector(Box::new(MeshTriangleSelector::from_mesh(
                &cube_vertices(),
                &CUBE_INDICES,
                &transform,
                Some(node),
            )));
        }

        log::info!(
            "Level built: {} nodes, {} selectors, {} triangles",
            nodes.len(),
            selector.selector_count(),
            selector.triangle_count()
        );

        Self { nodes, selector }
    }

    fn name_of(&self, node: Option<NodeId>) -> &str {
        node.and_then(|id| self.nodes.name_of(id)).unwrap_or("-")
    }
}

fn cube_vertices() -> Vec<Vec3> {
    CUBE_VERTICES.iter().map(|&[x, y, z]| Vec3::new(x, y, z)).collect()
}

/// Reverse the winding of every triangle so it faces the other way
fn flipped(indices: &[u32]) -> Vec<u32> {
    indices
        .chunks_exact(3)
        .flat_map(|tri| [tri[0], tri[2], tri[1]])
        .collect()
}

/// Upward facing square grid of `cells * cells` quads on y = 0
fn grid_mesh(half: f32, cells: u32, node: NodeId) -> MeshTriangleSelector {
    let cells = cells.max(1);
    let step = half * 2.0 / cells as f32;
    let row = cells + 1;

    let mut vertices = Vec::with_capacity((row * row) as usize);
    for i in 0..row {
        for j in 0..row {
            vertices.push(Vec3::new(-half + i as f32 * step, 0.0, -half + j as f32 * step));
        }
    }

    let mut indices = Vec::with_capacity((cells * cells * 6) as usize);
    for i in 0..cells {
        for j in 0..cells {
            let v00 = i * row + j;
            let v01 = v00 + 1;
            let v10 = v00 + row;
            let v11 = v10 + 1;
            indices.extend_from_slice(&[v00, v01, v10, v10, v01, v11]);
        }
    }

    MeshTriangleSelector::from_mesh(&vertices, &indices, &Transform::identity(), Some(node))
}

fn load_config() -> Result<WalkerConfig, WalkerError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading walker configuration from {}", path);
            Ok(WalkerConfig::load_from_file(path)?)
        }
        None => Ok(WalkerConfig::default()),
    }
}

fn run(config: &WalkerConfig) -> Result<(), WalkerError> {
    config.collision.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let level = Level::build(config, &mut rng);
    let mut manager = CollisionManager::new();

    let mut position = config.start;
    let mut heading = 0.0_f32;
    let mut airborne_ticks = 0;

    for tick in 0..config.ticks {
        heading += rng.gen_range(-1.0_f32..=1.0) * config.turn_rate;
        let velocity = Vec3::new(heading.cos(), 0.0, heading.sin()) * config.speed;

        let request = CollisionRequest::from_config(&config.collision, position, velocity);
        let outcome = manager.collide_ellipsoid_with_world(Some(&level.selector), &request)?;

        // Turn around when blocked
        let travelled = (outcome.position - position).xz().magnitude();
        if outcome.hit_occurred() && travelled < config.speed * 0.25 {
            heading += std::f32::consts::PI;
        }

        if outcome.falling {
            airborne_ticks += 1;
        }

        log::info!(
            "tick {:3}: pos ({:6.2}, {:5.2}, {:6.2}) falling={} hit={}",
            tick,
            outcome.position.x,
            outcome.position.y,
            outcome.position.z,
            outcome.falling,
            level.name_of(outcome.hit.and_then(|hit| hit.node)),
        );

        if tick % 20 == 0 {
            let probe = Line3::new(outcome.position, outcome.position - Vec3::new(0.0, 50.0, 0.0));
            match manager.collision_point(Some(&level.selector), &probe) {
                Some(ground) => log::debug!(
                    "ground probe: {} at distance {:.3}",
                    level.name_of(ground.node),
                    ground.distance
                ),
                None => log::debug!("ground probe: nothing below"),
            }
        }

        position = outcome.position;
    }

    log::info!(
        "Finished {} ticks at ({:.2}, {:.2}, {:.2}), airborne for {} ticks",
        config.ticks,
        position.x,
        position.y,
        position.z,
        airborne_ticks
    );

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");

    println!("=== Ellipsoid Walker Demo ===");

    let config = load_config()?;
    run(&config)?;
    Ok(())
}
