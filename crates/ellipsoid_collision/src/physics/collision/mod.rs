//! Ellipsoid sweep collision and sliding response
//!
//! The geometric core of the collision manager. Everything below the
//! facade works in ellipsoid space, where the moving body is a unit
//! sphere and 1.0 means "touching".
//!
//! # Module Organization
//!
//! - [`primitives`] - Triangles, planes and line segments
//! - [`quadratic`] - Smallest root in range, for the vertex and edge sweeps
//! - [`ellipsoid`] - World space to ellipsoid space mapping
//! - [`sweep`] - Swept unit sphere against one triangle, closest-hit context
//! - [`slide`] - Iterative slide along contacts with a bounded depth
//! - [`gravity`] - Movement pass followed by a gravity pass
//!
//! Dependency order runs top to bottom.

pub mod primitives;
pub mod quadratic;
pub mod ellipsoid;
pub mod sweep;
pub mod slide;
pub mod gravity;

// Re-export commonly used types
pub use primitives::{Line3, Plane, Triangle};
pub use quadratic::lowest_root;
pub use ellipsoid::EllipsoidSpace;
pub use sweep::{sweep_unit_sphere, CollisionContext, SweepResult};
pub use slide::{collide_with_world, SlideResult, TriangleScratch, MAX_RECURSION_DEPTH};
pub use gravity::{collide_with_gravity, FallResult};
