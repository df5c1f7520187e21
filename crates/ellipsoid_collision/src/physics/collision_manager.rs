//! Collision manager
//!
//! Public entry point for moving an ellipsoid through a triangle world.
//! Converts requests into ellipsoid space, runs the movement and gravity
//! passes, and reports the result back in world space together with the
//! scene node that owns the contacted triangle.
//!
//! ```
//! use ellipsoid_collision::prelude::*;
//!
//! let floor = MeshTriangleSelector::new(
//!     vec![Triangle::new(
//!         Vec3::new(-50.0, 0.0, -50.0),
//!         Vec3::new(-50.0, 0.0, 50.0),
//!         Vec3::new(50.0, 0.0, -50.0),
//!     )],
//!     None,
//! );
//!
//! let config = CollisionConfig::default().with_gravity(Vec3::new(0.0, -0.5, 0.0));
//! let request = CollisionRequest::from_config(&config, Vec3::new(-10.0, 3.0, -10.0), Vec3::new(1.0, 0.0, 0.0));
//!
//! let mut manager = CollisionManager::new();
//! let outcome = manager.collide_ellipsoid_with_world(Some(&floor), &request)?;
//! assert!(outcome.falling);
//! # Ok::<(), CollisionError>(())
//! ```

use thiserror::Error;

use crate::core::config::{CollisionConfig, DEFAULT_SLIDING_EPSILON};
use crate::foundation::math::{self, Vec3};
use crate::scene::NodeId;
use crate::spatial::TriangleSelector;

use super::collision::{collide_with_gravity, CollisionContext, EllipsoidSpace, Line3, Triangle, TriangleScratch};

/// Caller misuse rejected by the collision manager
///
/// Degenerate geometry is never reported here; it produces a well-defined
/// fallback outcome instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Sliding epsilon was zero, negative or not finite
    #[error("Sliding epsilon must be positive and finite, got {0}")]
    InvalidSlidingEpsilon(f32),

    /// An input vector contained NaN or infinity
    #[error("Non-finite collision input: {0}")]
    NonFiniteInput(&'static str),
}

/// One collision step for one ellipsoid, world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRequest {
    /// Ellipsoid centre at the start of the step
    pub position: Vec3,
    /// Per-axis ellipsoid radii; any axis `<= 0` makes the step a no-op
    pub radius: Vec3,
    /// Intended displacement for this step
    pub velocity: Vec3,
    /// Minimum approach distance kept from any surface, ellipsoid space
    pub sliding_epsilon: f32,
    /// Displacement of the gravity pass, zero to skip it
    pub gravity: Vec3,
}

impl CollisionRequest {
    /// Request with the default sliding epsilon and no gravity
    pub fn new(position: Vec3, radius: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            radius,
            velocity,
            sliding_epsilon: DEFAULT_SLIDING_EPSILON,
            gravity: Vec3::zeros(),
        }
    }

    /// Request using an actor's configured radius, epsilon and gravity
    pub fn from_config(config: &CollisionConfig, position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            radius: config.radius,
            velocity,
            sliding_epsilon: config.sliding_epsilon,
            gravity: config.gravity,
        }
    }

    /// Builder-style gravity override
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder-style sliding epsilon override
    pub fn with_sliding_epsilon(mut self, sliding_epsilon: f32) -> Self {
        self.sliding_epsilon = sliding_epsilon;
        self
    }

    /// Reject inputs the resolver cannot give a meaningful answer for
    pub fn validate(&self) -> Result<(), CollisionError> {
        if !(self.sliding_epsilon.is_finite() && self.sliding_epsilon > 0.0) {
            return Err(CollisionError::InvalidSlidingEpsilon(self.sliding_epsilon));
        }
        let vectors = [
            ("position", &self.position),
            ("radius", &self.radius),
            ("velocity", &self.velocity),
            ("gravity", &self.gravity),
        ];
        for (name, vector) in vectors {
            if !math::is_finite(vector) {
                return Err(CollisionError::NonFiniteInput(name));
            }
        }
        Ok(())
    }
}

/// Contact reported by a collision step, world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionHit {
    /// Contact point
    pub point: Vec3,
    /// Contacted triangle
    pub triangle: Triangle,
    /// Scene node owning the triangle, if the selector knows one
    pub node: Option<NodeId>,
}

/// Result of a collision step, world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionOutcome {
    /// Final ellipsoid centre
    pub position: Vec3,
    /// True when the gravity pass found nothing underneath
    pub falling: bool,
    /// Last closest hit recorded over both passes
    pub hit: Option<CollisionHit>,
}

impl CollisionOutcome {
    fn unmoved(position: Vec3) -> Self {
        Self {
            position,
            falling: false,
            hit: None,
        }
    }

    /// Whether either pass touched any triangle
    pub fn hit_occurred(&self) -> bool {
        self.hit.is_some()
    }
}

/// Closest triangle crossed by a line segment, world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCollision {
    /// Intersection point
    pub point: Vec3,
    /// Distance from the segment start to `point`
    pub distance: f32,
    /// Intersected triangle
    pub triangle: Triangle,
    /// Scene node owning the triangle, if the selector knows one
    pub node: Option<NodeId>,
}

/// Ellipsoid collision and line picking against triangle selectors
///
/// Owns only a scratch buffer, reused between calls to avoid allocating
/// per step. Use one manager per thread when resolving actors in
/// parallel; the selectors themselves can be shared.
#[derive(Debug, Default)]
pub struct CollisionManager {
    scratch: TriangleScratch,
}

impl CollisionManager {
    /// Create a manager with an empty scratch buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Move an ellipsoid by `request.velocity`, then apply `request.gravity`
    ///
    /// A missing selector behaves like an empty world. A degenerate radius
    /// leaves the position unchanged and reports no hit.
    pub fn collide_ellipsoid_with_world(
        &mut self,
        selector: Option<&dyn TriangleSelector>,
        request: &CollisionRequest,
    ) -> Result<CollisionOutcome, CollisionError> {
        request.validate()?;

        let Some(space) = EllipsoidSpace::new(request.radius) else {
            log::debug!("Degenerate ellipsoid radius {:?}, collision skipped", request.radius);
            return Ok(CollisionOutcome::unmoved(request.position));
        };

        let mut context = CollisionContext::new(
            request.radius,
            request.position,
            request.velocity,
            request.sliding_epsilon,
        );

        let result = collide_with_gravity(&mut context, &space, selector, &mut self.scratch, request.gravity);

        let hit = if context.total_hits > 0 {
            Some(CollisionHit {
                point: space.to_world(&context.intersection_point),
                triangle: space.triangle_to_world(&context.hit_triangle),
                node: selector
                    .zip(context.hit_index)
                    .and_then(|(selector, index)| selector.node_for_triangle(index)),
            })
        } else {
            None
        };

        Ok(CollisionOutcome {
            position: space.to_world(&result.position),
            falling: result.falling,
            hit,
        })
    }

    /// Find the triangle closest to `line.start` that the segment crosses
    ///
    /// Both faces of a triangle are hit. Returns `None` when nothing lies
    /// between the end points.
    pub fn collision_point(
        &mut self,
        selector: Option<&dyn TriangleSelector>,
        line: &Line3,
    ) -> Option<RayCollision> {
        let selector = selector?;

        let capacity = selector.triangle_count();
        self.scratch.prepare(capacity);
        selector.triangles_on_line(self.scratch.buffer_mut(), capacity, line, None);

        let region = line.bounding_box();
        let direction = line.vector();
        let length = direction.magnitude();

        let mut nearest: Option<(f32, usize)> = None;
        for (slot, selected) in self.scratch.triangles().iter().enumerate() {
            // Quick rejection before the exact test
            if !region.intersects(&selected.triangle.bounding_box()) {
                continue;
            }
            let Some(t) = selected.triangle.intersect_line(&line.start, &direction) else {
                continue;
            };
            if t > 1.0 {
                continue;
            }
            if nearest.map_or(true, |(best, _)| t < best) {
                nearest = Some((t, slot));
            }
        }

        let (t, slot) = nearest?;
        let selected = self.scratch.triangles()[slot];
        Some(RayCollision {
            point: line.start + direction * t,
            distance: t * length,
            triangle: selected.triangle,
            node: selector.node_for_triangle(selected.index),
        })
    }
}
