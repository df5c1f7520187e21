//! Math types and small float helpers
//!
//! Thin aliases over nalgebra plus the placement type used to put
//! model-space collision meshes into the world.

use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Rotation type for mesh placement
pub type Quat = UnitQuaternion<f32>;

/// Values closer to zero than this are treated as zero by the collision core
pub const ROUNDING_ERROR: f32 = 0.000_001;

/// Where a model-space mesh sits in the world
///
/// Applied scale first, then rotation, then translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// World position of the model origin
    pub position: Vec3,
    /// Orientation
    pub rotation: Quat,
    /// Per-axis scale in model space
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_position_rotation(Vec3::zeros(), Quat::identity())
    }
}

impl Transform {
    /// Leaves geometry where it is
    pub fn identity() -> Self {
        Self::default()
    }

    /// Pure translation
    pub fn from_position(position: Vec3) -> Self {
        Self::from_position_rotation(position, Quat::identity())
    }

    /// Translation and rotation, unit scale
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::repeat(1.0),
        }
    }

    /// Builder-style scale override
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Model to world matrix
    pub fn to_matrix(&self) -> Mat4 {
        self.rotation
            .to_homogeneous()
            .prepend_nonuniform_scaling(&self.scale)
            .append_translation(&self.position)
    }
}

/// Transform a position (w = 1) by a 4x4 matrix
pub fn transform_vec_point(matrix: &Mat4, point: Vec3) -> Vec3 {
    matrix.transform_point(&Point3::from(point)).coords
}

/// Check whether a value is within [`ROUNDING_ERROR`] of zero
pub fn is_zero(value: f32) -> bool {
    value.abs() <= ROUNDING_ERROR
}

/// Check that every component of a vector is finite
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Rescale a vector to the requested length, keeping its direction
///
/// A zero vector stays zero.
pub fn with_length(v: &Vec3, length: f32) -> Vec3 {
    let current = v.magnitude();
    if current == 0.0 {
        return *v;
    }
    v * (length / current)
}
