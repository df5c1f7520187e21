//! Physics module for ellipsoid collision detection and response
//!
//! Moves an axis-scaled ellipsoid through static triangle geometry so it
//! never penetrates, slides along obstacles and falls when unsupported.

pub mod collision;
pub mod collision_manager;

#[cfg(test)]
mod tests;

pub use collision::{Line3, Triangle};
pub use collision_manager::{
    CollisionError,
    CollisionHit,
    CollisionManager,
    CollisionOutcome,
    CollisionRequest,
    RayCollision,
};
