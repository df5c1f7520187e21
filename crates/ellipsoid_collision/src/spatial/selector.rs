//! Abstract triangle query interface for collision detection
//!
//! A selector hands out the triangles near a region of space so the
//! narrow phase only has to look at a bounded candidate set. Selectors
//! are read-only during queries and must be shareable between threads,
//! so one world can serve collision queries for many actors at once.

use crate::foundation::math::{Mat4, Transform, Vec3};
use crate::physics::collision::{Line3, Triangle};
use crate::scene::NodeId;

use super::AABB;

/// A triangle returned by a selector query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedTriangle {
    /// The triangle, already transformed into the caller's query space
    pub triangle: Triangle,
    /// Selector-global index, valid for [`TriangleSelector::node_for_triangle`]
    pub index: usize,
}

/// Abstract interface for candidate triangle providers
///
/// Implementations append to `out` and never clear it, which lets
/// composites stack the results of their children.
pub trait TriangleSelector: Send + Sync {
    /// Total number of triangles this selector can return
    fn triangle_count(&self) -> usize;

    /// Append at most `max_count` triangles whose world-space bounds overlap
    /// `region`, each transformed by `transform` when given
    ///
    /// Returns how many triangles were appended.
    fn triangles_in_box(
        &self,
        out: &mut Vec<SelectedTriangle>,
        max_count: usize,
        region: &AABB,
        transform: Option<&Mat4>,
    ) -> usize;

    /// Append at most `max_count` triangles that may intersect `line`
    fn triangles_on_line(
        &self,
        out: &mut Vec<SelectedTriangle>,
        max_count: usize,
        line: &Line3,
        transform: Option<&Mat4>,
    ) -> usize {
        self.triangles_in_box(out, max_count, &line.bounding_box(), transform)
    }

    /// Scene node owning the triangle with the given selector-global index
    fn node_for_triangle(&self, index: usize) -> Option<NodeId>;
}

/// Push one triangle into a query result, applying the optional transform
pub(crate) fn push_selected(
    out: &mut Vec<SelectedTriangle>,
    triangle: &Triangle,
    index: usize,
    transform: Option<&Mat4>,
) {
    let triangle = match transform {
        Some(matrix) => triangle.transformed(matrix),
        None => *triangle,
    };
    out.push(SelectedTriangle { triangle, index });
}

/// Flat list of world-space triangles owned by at most one scene node
///
/// Every query walks the whole list with a per-triangle bounding box
/// test. Sufficient for small meshes; use
/// [`OctreeTriangleSelector`](super::OctreeTriangleSelector) for large ones.
#[derive(Debug, Clone, Default)]
pub struct MeshTriangleSelector {
    triangles: Vec<Triangle>,
    node: Option<NodeId>,
}

impl MeshTriangleSelector {
    /// Create a selector over world-space triangles
    pub fn new(triangles: Vec<Triangle>, node: Option<NodeId>) -> Self {
        Self { triangles, node }
    }

    /// Build from model-space vertices and a triangle index list, placed
    /// in the world by `transform`
    ///
    /// A trailing partial triangle in `indices` is ignored, as are index
    /// triples that reference missing vertices.
    pub fn from_mesh(
        vertices: &[Vec3],
        indices: &[u32],
        transform: &Transform,
        node: Option<NodeId>,
    ) -> Self {
        let matrix = transform.to_matrix();
        let triangles = indices
            .chunks_exact(3)
            .filter_map(|chunk| {
                let a = vertices.get(chunk[0] as usize)?;
                let b = vertices.get(chunk[1] as usize)?;
                let c = vertices.get(chunk[2] as usize)?;
                Some(Triangle::new(*a, *b, *c).transformed(&matrix))
            })
            .collect::<Vec<_>>();

        if triangles.len() * 3 != indices.len() {
            log::warn!(
                "Mesh selector dropped {} malformed index entries",
                indices.len() - triangles.len() * 3
            );
        }

        Self::new(triangles, node)
    }

    /// Triangles in world space
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Scene node this mesh belongs to
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}

impl TriangleSelector for MeshTriangleSelector {
    fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn triangles_in_box(
        &self,
        out: &mut Vec<SelectedTriangle>,
        max_count: usize,
        region: &AABB,
        transform: Option<&Mat4>,
    ) -> usize {
        let before = out.len();
        for (index, triangle) in self.triangles.iter().enumerate() {
            if out.len() - before >= max_count {
                break;
            }
            if region.intersects(&triangle.bounding_box()) {
                push_selected(out, triangle, index, transform);
            }
        }
        out.len() - before
    }

    fn node_for_triangle(&self, index: usize) -> Option<NodeId> {
        if index < self.triangles.len() {
            self.node
        } else {
            None
        }
    }
}

/// Composite selector combining several child selectors
///
/// Triangle indices are offset by the cumulative triangle count of the
/// preceding children, so index `n` of the second child is reported as
/// `first.triangle_count() + n`.
#[derive(Default)]
pub struct MetaTriangleSelector {
    selectors: Vec<Box<dyn TriangleSelector>>,
}

impl MetaTriangleSelector {
    /// Create an empty composite
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child selector
    pub fn add_selector(&mut self, selector: Box<dyn TriangleSelector>) {
        self.selectors.push(selector);
    }

    /// Remove every child selector
    pub fn remove_all(&mut self) {
        self.selectors.clear();
    }

    /// Number of child selectors
    pub fn selector_count(&self) -> usize {
        self.selectors.len()
    }
}

impl TriangleSelector for MetaTriangleSelector {
    fn triangle_count(&self) -> usize {
        self.selectors.iter().map(|s| s.triangle_count()).sum()
    }

    fn triangles_in_box(
        &self,
        out: &mut Vec<SelectedTriangle>,
        max_count: usize,
        region: &AABB,
        transform: Option<&Mat4>,
    ) -> usize {
        let before = out.len();
        let mut offset = 0;
        for selector in &self.selectors {
            let remaining = max_count - (out.len() - before);
            if remaining == 0 {
                break;
            }
            let start = out.len();
            selector.triangles_in_box(out, remaining, region, transform);
            for selected in &mut out[start..] {
                selected.index += offset;
            }
            offset += selector.triangle_count();
        }
        out.len() - before
    }

    fn triangles_on_line(
        &self,
        out: &mut Vec<SelectedTriangle>,
        max_count: usize,
        line: &Line3,
        transform: Option<&Mat4>,
    ) -> usize {
        let before = out.len();
        let mut offset = 0;
        for selector in &self.selectors {
            let remaining = max_count - (out.len() - before);
            if remaining == 0 {
                break;
            }
            let start = out.len();
            selector.triangles_on_line(out, remaining, line, transform);
            for selected in &mut out[start..] {
                selected.index += offset;
            }
            offset += selector.triangle_count();
        }
        out.len() - before
    }

    fn node_for_triangle(&self, index: usize) -> Option<NodeId> {
        let mut local = index;
        for selector in &self.selectors {
            let count = selector.triangle_count();
            if local < count {
                return selector.node_for_triangle(local);
            }
            local -= count;
        }
        None
    }
}
