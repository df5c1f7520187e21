//! Octree triangle selector
//!
//! Divides the mesh bounds into a hierarchy of octants so box queries
//! only visit the triangles stored near the queried region. A triangle
//! lives in the deepest node whose bounds fully contain it; triangles
//! straddling an octant boundary stay in the parent.

use crate::foundation::math::{Mat4, Vec3};
use crate::physics::collision::Triangle;
use crate::scene::NodeId;

use super::selector::{push_selected, MeshTriangleSelector, SelectedTriangle, TriangleSelector};
use super::AABB;

/// Configuration for octree behavior
#[derive(Debug, Clone)]
pub struct OctreeConfig {
    /// Maximum triangles per node before subdivision
    pub max_triangles_per_node: usize,

    /// Maximum subdivision depth
    pub max_depth: u32,

    /// Minimum node size (prevents excessive subdivision)
    pub min_node_size: f32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_triangles_per_node: 16,
            max_depth: 8,
            min_node_size: 1.0,
        }
    }
}

/// Single node in the octree hierarchy
#[derive(Debug, Clone)]
struct OctreeNode {
    /// World-space bounds of this node
    bounds: AABB,

    /// Indices of triangles stored directly in this node
    triangles: Vec<usize>,

    /// Child nodes (8 octants), None if this is a leaf
    children: Option<Box<[OctreeNode; 8]>>,

    /// Depth in the tree (0 = root)
    depth: u32,
}

impl OctreeNode {
    fn new(bounds: AABB, depth: u32) -> Self {
        Self {
            bounds,
            triangles: Vec::new(),
            children: None,
            depth,
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Subdivide this node into 8 children
    ///
    /// Octant layout: bit 0 = +X, bit 1 = +Y, bit 2 = +Z.
    fn subdivide(&mut self, boxes: &[AABB]) {
        if self.children.is_some() {
            return;
        }

        let center = self.bounds.center();
        let quarter_extents = self.bounds.extents() * 0.5;
        let depth = self.depth + 1;

        let children: [OctreeNode; 8] = std::array::from_fn(|octant| {
            let sign = |bit: usize| if octant & bit != 0 { 1.0 } else { -1.0 };
            let child_center = center + Vec3::new(
                quarter_extents.x * sign(1),
                quarter_extents.y * sign(2),
                quarter_extents.z * sign(4),
            );
            OctreeNode::new(AABB::from_center_extents(child_center, quarter_extents), depth)
        });
        self.children = Some(Box::new(children));

        // Push down whatever now fits entirely inside one child
        let stored = std::mem::take(&mut self.triangles);
        for index in stored {
            if !self.push_into_child(index, boxes) {
                self.triangles.push(index);
            }
        }
    }

    /// Hand `index` to the child that fully contains it, if any
    fn push_into_child(&mut self, index: usize, boxes: &[AABB]) -> bool {
        let Some(children) = self.children.as_mut() else {
            return false;
        };
        match children.iter_mut().find(|child| child.bounds.contains(&boxes[index])) {
            Some(child) => {
                child.triangles.push(index);
                true
            }
            None => false,
        }
    }

    fn insert(&mut self, index: usize, boxes: &[AABB], config: &OctreeConfig) {
        if self.is_leaf() {
            let should_subdivide = self.triangles.len() >= config.max_triangles_per_node
                && self.depth < config.max_depth
                && self.bounds.extents().x > config.min_node_size;

            if !should_subdivide {
                self.triangles.push(index);
                return;
            }
            self.subdivide(boxes);
        }

        let target = self.children.as_mut().and_then(|children| {
            children.iter_mut().find(|child| child.bounds.contains(&boxes[index]))
        });
        match target {
            Some(child) => child.insert(index, boxes, config),
            None => self.triangles.push(index),
        }
    }

    fn collect(&self, region: &AABB, boxes: &[AABB], found: &mut Vec<usize>) {
        if !self.bounds.intersects(region) {
            return;
        }
        found.extend(
            self.triangles
                .iter()
                .copied()
                .filter(|&index| boxes[index].intersects(region)),
        );
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect(region, boxes, found);
            }
        }
    }

    fn node_count(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map_or(0, |children| children.iter().map(OctreeNode::node_count).sum())
    }
}

/// Triangle selector backed by an octree
///
/// Query results are identical to a [`MeshTriangleSelector`] over the
/// same triangles, including their order; only the amount of work
/// differs.
#[derive(Debug, Clone)]
pub struct OctreeTriangleSelector {
    triangles: Vec<Triangle>,
    boxes: Vec<AABB>,
    root: OctreeNode,
    node: Option<NodeId>,
}

impl OctreeTriangleSelector {
    /// Build an octree over world-space triangles
    pub fn new(triangles: Vec<Triangle>, node: Option<NodeId>, config: &OctreeConfig) -> Self {
        let boxes: Vec<AABB> = triangles.iter().map(Triangle::bounding_box).collect();

        let bounds = boxes
            .iter()
            .copied()
            .reduce(|mut acc, b| {
                acc.add_point(b.min);
                acc.add_point(b.max);
                acc
            })
            .unwrap_or_else(|| AABB::new(Vec3::zeros(), Vec3::zeros()));

        // Cubic root bounds keep the octants well shaped
        let half = bounds.extents().max().max(config.min_node_size * 0.5);
        let root_bounds = AABB::from_center_extents(bounds.center(), Vec3::new(half, half, half));

        let mut root = OctreeNode::new(root_bounds, 0);
        for index in 0..triangles.len() {
            root.insert(index, &boxes, config);
        }

        log::debug!(
            "Built octree selector: {} triangles in {} nodes",
            triangles.len(),
            root.node_count()
        );

        Self { triangles, boxes, root, node }
    }

    /// Build an octree with the same triangles and owner as a mesh selector
    pub fn from_mesh_selector(mesh: &MeshTriangleSelector, config: &OctreeConfig) -> Self {
        Self::new(mesh.triangles().to_vec(), mesh.node(), config)
    }

    /// Number of octree nodes, for diagnostics
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

impl TriangleSelector for OctreeTriangleSelector {
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
        let mut found = Vec::new();
        self.root.collect(region, &self.boxes, &mut found);
        found.sort_unstable();

        let count = found.len().min(max_count);
        for &index in &found[..count] {
            push_selected(out, &self.triangles[index], index, transform);
        }
        count
    }

    fn node_for_triangle(&self, index: usize) -> Option<NodeId> {
        if index < self.triangles.len() {
            self.node
        } else {
            None
        }
    }
}
