//! Scenario tests for whole collision steps through the manager

mod falling;
mod selectors;

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::foundation::math::{Mat4, Vec3};
use crate::physics::collision::Triangle;
use crate::scene::NodeId;
use crate::spatial::{MeshTriangleSelector, SelectedTriangle, TriangleSelector, AABB};

pub(super) const EPSILON: f32 = 0.0005;

/// Large floor in the y = 0 plane facing +Y, covering `x + z <= 0`
pub(super) fn floor_triangle() -> Triangle {
    Triangle::new(
        Vec3::new(-100.0, 0.0, -100.0),
        Vec3::new(-100.0, 0.0, 100.0),
        Vec3::new(100.0, 0.0, -100.0),
    )
}

/// Large wall in the x = `x` plane facing -X, covering `y + z <= 0`
pub(super) fn wall_triangle(x: f32) -> Triangle {
    Triangle::new(
        Vec3::new(x, -50.0, -50.0),
        Vec3::new(x, -50.0, 50.0),
        Vec3::new(x, 50.0, -50.0),
    )
}

pub(super) fn selector_of(triangles: Vec<Triangle>, node: Option<NodeId>) -> MeshTriangleSelector {
    MeshTriangleSelector::new(triangles, node)
}

/// Wraps a selector and counts box queries, one per resolver scan
pub(super) struct CountingSelector {
    pub inner: MeshTriangleSelector,
    pub queries: AtomicUsize,
}

impl CountingSelector {
    pub fn new(inner: MeshTriangleSelector) -> Self {
        Self {
            inner,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl TriangleSelector for CountingSelector {
    fn triangle_count(&self) -> usize {
        self.inner.triangle_count()
    }

    fn triangles_in_box(
        &self,
        out: &mut Vec<SelectedTriangle>,
        max_count: usize,
        region: &AABB,
        transform: Option<&Mat4>,
    ) -> usize {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.inner.triangles_in_box(out, max_count, region, transform)
    }

    fn node_for_triangle(&self, index: usize) -> Option<NodeId> {
        self.inner.node_for_triangle(index)
    }
}
