//! Ellipsoid space normalization
//!
//! Dividing every coordinate by the ellipsoid's per-axis radius turns the
//! ellipsoid into a unit sphere, so every later test can use 1.0 as the
//! "touching" distance.

use crate::foundation::math::{Mat4, Vec3};

use super::Triangle;

/// Mapping between world space and unit-sphere ("ellipsoid") space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsoidSpace {
    radius: Vec3,
}

impl EllipsoidSpace {
    /// Create the mapping for an ellipsoid radius
    ///
    /// Returns `None` if any axis is not strictly positive; callers treat
    /// that as a no-op collision.
    pub fn new(radius: Vec3) -> Option<Self> {
        if radius.iter().all(|&r| r > 0.0) {
            Some(Self { radius })
        } else {
            None
        }
    }

    /// Per-axis radius
    pub fn radius(&self) -> Vec3 {
        self.radius
    }

    /// World-space vector to ellipsoid space, `v ⊘ r`
    pub fn to_unit(&self, v: &Vec3) -> Vec3 {
        v.component_div(&self.radius)
    }

    /// Ellipsoid-space vector back to world space, `u ⊗ r`
    pub fn to_world(&self, u: &Vec3) -> Vec3 {
        u.component_mul(&self.radius)
    }

    /// Ellipsoid-space triangle back to world space
    pub fn triangle_to_world(&self, triangle: &Triangle) -> Triangle {
        triangle.scaled(&self.radius)
    }

    /// Matrix taking world-space geometry into ellipsoid space
    pub fn unit_scale_matrix(&self) -> Mat4 {
        Mat4::new_nonuniform_scaling(&self.radius.map(|r| 1.0 / r))
    }
}
