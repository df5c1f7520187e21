//! # Ellipsoid Collision
//!
//! Swept-ellipsoid collision detection and sliding response against static
//! triangle worlds, for characters, cameras and other actors that walk
//! through level geometry.
//!
//! ## Features
//!
//! - **Swept Tests**: Continuous sphere-vs-triangle sweeps, no tunneling
//! - **Sliding Response**: Remaining motion is projected along contacts
//! - **Gravity Pass**: Separate gravity slide with falling detection
//! - **Triangle Selectors**: Flat, octree and composite candidate providers
//! - **Configuration**: Per-actor settings loaded from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use ellipsoid_collision::prelude::*;
//!
//! fn main() -> Result<(), CollisionError> {
//!     let mut nodes = NodeRegistry::new();
//!     let ground = nodes.insert("ground", Transform::identity());
//!
//!     let vertices = [
//!         Vec3::new(-20.0, 0.0, -20.0),
//!         Vec3::new(-20.0, 0.0, 20.0),
//!         Vec3::new(20.0, 0.0, 20.0),
//!         Vec3::new(20.0, 0.0, -20.0),
//!     ];
//!     let floor = MeshTriangleSelector::from_mesh(&vertices, &[0, 1, 2, 0, 2, 3], &Transform::identity(), Some(ground));
//!
//!     let config = CollisionConfig::default().with_gravity(Vec3::new(0.0, -0.2, 0.0));
//!     let mut manager = CollisionManager::new();
//!
//!     let request = CollisionRequest::from_config(&config, Vec3::new(0.0, 1.1, 0.0), Vec3::new(0.5, 0.0, 0.0));
//!     let outcome = manager.collide_ellipsoid_with_world(Some(&floor), &request)?;
//!
//!     assert!(!outcome.falling);
//!     assert_eq!(outcome.hit.and_then(|hit| hit.node), Some(ground));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Configuration
pub mod core;
pub mod config;

// Shared utilities
pub mod foundation;

// Geometry sources and collision
pub mod spatial;
pub mod scene;
pub mod physics;

/// Common imports for collision users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::CollisionConfig,
        foundation::math::{Mat4, Transform, Vec3},
        physics::{
            CollisionError,
            CollisionHit,
            CollisionManager,
            CollisionOutcome,
            CollisionRequest,
            Line3,
            RayCollision,
            Triangle,
        },
        scene::{NodeId, NodeRegistry},
        spatial::{
            MeshTriangleSelector,
            MetaTriangleSelector,
            OctreeConfig,
            OctreeTriangleSelector,
            TriangleSelector,
            AABB,
        },
    };
}
