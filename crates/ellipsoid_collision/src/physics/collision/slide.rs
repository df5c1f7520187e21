//! Recursive sliding response
//!
//! Moves the unit sphere as far as it can along its velocity, then
//! projects the rest of the motion onto the plane tangent to the contact
//! and tries again. Runs as a loop with a depth counter; hitting the
//! bound returns the last position reached, not an error.

use crate::foundation::math::{self, Vec3};
use crate::spatial::{SelectedTriangle, TriangleSelector, AABB};

use super::ellipsoid::EllipsoidSpace;
use super::primitives::Plane;
use super::sweep::CollisionContext;

/// Deepest slide iteration that still scans; one past it returns as is
pub const MAX_RECURSION_DEPTH: u32 = 5;

/// Reusable candidate buffer for one collision caller
///
/// Holds no state between calls beyond its allocation. Give every thread
/// (or every concurrently resolved actor) its own scratch.
#[derive(Debug, Default)]
pub struct TriangleScratch {
    triangles: Vec<SelectedTriangle>,
}

impl TriangleScratch {
    /// Create an empty scratch buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear and make room for up to `capacity` triangles
    pub fn prepare(&mut self, capacity: usize) {
        self.triangles.clear();
        self.triangles.reserve(capacity);
    }

    /// Mutable access to the backing buffer for selector queries
    pub fn buffer_mut(&mut self) -> &mut Vec<SelectedTriangle> {
        &mut self.triangles
    }

    /// Candidates gathered by the last query
    pub fn triangles(&self) -> &[SelectedTriangle] {
        &self.triangles
    }
}

/// Outcome of one sliding pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideResult {
    /// Final sphere centre, ellipsoid space
    pub position: Vec3,
    /// Number of candidate scans performed
    pub scans: u32,
    /// True when the pass stopped because the depth bound was hit
    pub exhausted: bool,
}

/// Slide the unit sphere from `position` by `velocity` through the world
///
/// `context.world_position` and `context.world_velocity` are not touched;
/// the candidate region is derived from the current scan so it follows
/// the sphere as it slides.
pub fn collide_with_world(
    context: &mut CollisionContext,
    space: &EllipsoidSpace,
    selector: Option<&dyn TriangleSelector>,
    scratch: &mut TriangleScratch,
    position: Vec3,
    velocity: Vec3,
) -> SlideResult {
    let very_close_distance = context.sliding_epsilon;
    let unit_scale = space.unit_scale_matrix();

    let mut base_point = position;
    let mut velocity = velocity;
    let mut scans = 0;

    for depth in 0..=MAX_RECURSION_DEPTH {
        context.begin_scan(base_point, velocity);
        scans += 1;

        // Collide with every triangle the selector thinks is nearby
        if let Some(selector) = selector {
            let world_start = space.to_world(&base_point);
            let world_end = space.to_world(&(base_point + velocity));
            let region = AABB::from_points(world_start, world_end).expanded(&space.radius());

            let capacity = selector.triangle_count();
            scratch.prepare(capacity);
            selector.triangles_in_box(scratch.buffer_mut(), capacity, &region, Some(&unit_scale));

            for selected in scratch.triangles() {
                context.test_triangle(selected);
            }

            log::trace!(
                "slide depth {}: {} candidates, hit = {}",
                depth,
                scratch.triangles().len(),
                context.found_collision
            );
        }

        if !context.found_collision {
            return SlideResult {
                position: base_point + velocity,
                scans,
                exhausted: false,
            };
        }

        // Original destination point
        let destination_point = base_point + velocity;
        let mut new_base_point = base_point;

        // Only move if not already very close, and then only to just short
        // of the contact
        if context.nearest_distance >= very_close_distance {
            new_base_point = base_point + math::with_length(&velocity, context.nearest_distance - very_close_distance);
            context.intersection_point -= math::with_length(&velocity, very_close_distance);
        }

        let slide_origin = context.intersection_point;
        let Some(slide_normal) = (new_base_point - slide_origin).try_normalize(0.0) else {
            log::trace!("slide depth {}: contact at sphere centre, stopping", depth);
            return SlideResult {
                position: new_base_point,
                scans,
                exhausted: false,
            };
        };
        let sliding_plane = Plane::from_point_normal(slide_origin, slide_normal);

        let new_destination_point =
            destination_point - slide_normal * sliding_plane.distance_to_point(destination_point);
        let new_velocity = new_destination_point - slide_origin;

        if new_velocity.magnitude() < very_close_distance {
            return SlideResult {
                position: new_base_point,
                scans,
                exhausted: false,
            };
        }

        base_point = new_base_point;
        velocity = new_velocity;
    }

    log::debug!(
        "slide stopped at depth bound {} with {:.6} still to travel",
        MAX_RECURSION_DEPTH,
        velocity.magnitude()
    );

    SlideResult {
        position: base_point,
        scans,
        exhausted: true,
    }
}
