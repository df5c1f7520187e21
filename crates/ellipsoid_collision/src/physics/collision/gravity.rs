//! Gravity pass
//!
//! One collision step is two slides: the intended motion first, then the
//! gravity displacement from wherever the first slide ended. The body is
//! falling when the gravity slide touched nothing.

use crate::foundation::math::Vec3;
use crate::spatial::TriangleSelector;

use super::ellipsoid::EllipsoidSpace;
use super::slide::{collide_with_world, TriangleScratch};
use super::sweep::CollisionContext;

/// Result of the movement and gravity passes, ellipsoid space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallResult {
    /// Final sphere centre, ellipsoid space
    pub position: Vec3,
    /// True when the gravity pass found no supporting geometry
    pub falling: bool,
}

/// Run the movement slide and then the gravity slide
///
/// `context` must have been created for this call with the world-space
/// position and velocity. A gravity of exactly zero skips the second pass
/// and reports not falling.
pub fn collide_with_gravity(
    context: &mut CollisionContext,
    space: &EllipsoidSpace,
    selector: Option<&dyn TriangleSelector>,
    scratch: &mut TriangleScratch,
    gravity: Vec3,
) -> FallResult {
    let unit_position = space.to_unit(&context.world_position);
    let unit_velocity = space.to_unit(&context.world_velocity);

    let moved = collide_with_world(context, space, selector, scratch, unit_position, unit_velocity);

    if gravity == Vec3::zeros() {
        return FallResult {
            position: moved.position,
            falling: false,
        };
    }

    context.begin_pass(space.to_world(&moved.position), gravity);
    let unit_gravity = space.to_unit(&gravity);
    let settled = collide_with_world(context, space, selector, scratch, moved.position, unit_gravity);

    let falling = context.hit_count == 0;
    log::trace!(
        "gravity pass: {} hits, falling = {}",
        context.hit_count,
        falling
    );

    FallResult {
        position: settled.position,
        falling,
    }
}
