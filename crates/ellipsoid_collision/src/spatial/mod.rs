//! Spatial partitioning data structures
//!
//! Candidate triangle providers for the collision core. The collision
//! code only ever talks to [`TriangleSelector`]; whether the triangles
//! come from a flat list, an octree or a composite of several sources is
//! invisible to it.

mod aabb;
mod selector;
mod octree;

pub use aabb::AABB;
pub use selector::{
    MeshTriangleSelector,
    MetaTriangleSelector,
    SelectedTriangle,
    TriangleSelector,
};
pub use octree::{OctreeConfig, OctreeTriangleSelector};
