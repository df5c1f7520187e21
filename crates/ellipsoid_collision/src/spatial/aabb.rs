//! Axis-aligned boxes for candidate culling

use crate::foundation::math::Vec3;

/// Axis-aligned box, used for selector queries and octree cells
///
/// Bounds are inclusive, so boxes that only share a face still overlap.
/// A flat box (one axis of zero size) is valid; triangle and line bounds
/// are often flat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Lowest corner
    pub min: Vec3,
    /// Highest corner
    pub max: Vec3,
}

impl AABB {
    /// Box from corners already in min/max order
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box holding both points, in any order
    pub fn from_points(p: Vec3, q: Vec3) -> Self {
        Self::new(p.inf(&q), p.sup(&q))
    }

    /// Box reaching `half_size` from `center` along each axis
    pub fn from_center_extents(center: Vec3, half_size: Vec3) -> Self {
        Self::new(center - half_size, center + half_size)
    }

    /// Grow to include `point`
    pub fn add_point(&mut self, point: Vec3) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }

    /// Copy grown by `amount` on every side
    pub fn expanded(&self, amount: &Vec3) -> Self {
        Self::new(self.min - amount, self.max + amount)
    }

    /// Midpoint
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    /// Half of the size along each axis
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) / 2.0
    }

    /// Whether `point` lies inside or on the boundary
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.iter().zip(point.iter()).all(|(lo, p)| lo <= p)
            && point.iter().zip(self.max.iter()).all(|(p, hi)| p <= hi)
    }

    /// Whether `other` fits entirely inside this box
    pub fn contains(&self, other: &AABB) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Whether the two boxes overlap or touch
    pub fn intersects(&self, other: &AABB) -> bool {
        (0..3).all(|axis| self.min[axis] <= other.max[axis] && other.min[axis] <= self.max[axis])
    }
}
