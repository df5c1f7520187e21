//! Primitive collision shapes and intersection algorithms
//!
//! Provides the triangle, plane and line primitives consumed by the
//! ellipsoid sweep and by line picking against triangle selectors.

use nalgebra::Vector3;

use crate::foundation::math::{self, Mat4, Vec3};
use crate::spatial::AABB;

/// Tolerance for the same-side test when a point sits on an edge line
const SAME_SIDE_EPSILON: f64 = 0.000_000_01;

/// A finite line segment in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    /// Start point of the segment
    pub start: Vec3,
    /// End point of the segment
    pub end: Vec3,
}

impl Line3 {
    /// Creates a new line segment
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Vector from start to end
    pub fn vector(&self) -> Vec3 {
        self.end - self.start
    }

    /// Squared length of the segment
    pub fn length_squared(&self) -> f32 {
        self.vector().magnitude_squared()
    }

    /// Axis-aligned box enclosing both end points
    pub fn bounding_box(&self) -> AABB {
        AABB::from_points(self.start, self.end)
    }
}

/// Plane defined by normal and distance from origin
///
/// Points satisfy `normal · p + distance = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (normalized)
    pub normal: Vec3,
    /// Distance from origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a plane through `point` with the given unit `normal`
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            distance: -normal.dot(&point),
        }
    }

    /// Calculate signed distance from plane to point
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }

    /// True when looking along `direction` sees the front side of the plane
    ///
    /// Parallel directions count as front facing.
    pub fn is_front_facing(&self, direction: &Vec3) -> bool {
        self.normal.dot(direction) <= 0.0
    }
}

/// A triangle for collision detection
///
/// The front face is the side the right-hand normal `(b - a) × (c - a)`
/// points to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub a: Vec3,
    /// Second vertex
    pub b: Vec3,
    /// Third vertex
    pub c: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Unit normal of the triangle (right-hand rule), `None` if degenerate
    pub fn normal(&self) -> Option<Vec3> {
        (self.b - self.a).cross(&(self.c - self.a)).try_normalize(0.0)
    }

    /// Supporting plane of the triangle, `None` if degenerate
    pub fn plane(&self) -> Option<Plane> {
        self.normal().map(|normal| Plane::from_point_normal(self.a, normal))
    }

    /// Axis-aligned box enclosing the triangle
    pub fn bounding_box(&self) -> AABB {
        let mut aabb = AABB::from_points(self.a, self.b);
        aabb.add_point(self.c);
        aabb
    }

    /// Returns this triangle with every vertex transformed by `matrix`
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            a: math::transform_vec_point(matrix, self.a),
            b: math::transform_vec_point(matrix, self.b),
            c: math::transform_vec_point(matrix, self.c),
        }
    }

    /// Returns this triangle with every vertex multiplied component-wise
    pub fn scaled(&self, scale: &Vec3) -> Self {
        Self {
            a: self.a.component_mul(scale),
            b: self.b.component_mul(scale),
            c: self.c.component_mul(scale),
        }
    }

    /// Check whether a point lying in the triangle's plane is inside it
    ///
    /// Points on an edge count as inside. Evaluated in double precision.
    pub fn is_point_inside(&self, point: &Vec3) -> bool {
        let p = point.cast::<f64>();
        let a = self.a.cast::<f64>();
        let b = self.b.cast::<f64>();
        let c = self.c.cast::<f64>();

        same_side(&p, &a, &b, &c) && same_side(&p, &b, &a, &c) && same_side(&p, &c, &a, &b)
    }

    /// Möller-Trumbore line-triangle intersection, two sided
    ///
    /// `direction` need not be normalized; the returned `t` is measured in
    /// multiples of it, so `t ∈ [0, 1]` means the hit lies between `origin`
    /// and `origin + direction`.
    /// See: "Fast, Minimum Storage Ray/Triangle Intersection" by Möller & Trumbore
    pub fn intersect_line(&self, origin: &Vec3, direction: &Vec3) -> Option<f32> {
        const EPSILON: f32 = 0.000_001;

        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;

        let h = direction.cross(&edge2);
        let det = edge1.dot(&h);

        // Line parallel to triangle?
        if det.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / det;
        let s = origin - self.a;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if t >= 0.0 {
            Some(t)
        } else {
            None
        }
    }
}

/// True if `p1` and `p2` lie on the same side of the line through `a` and `b`
fn same_side(p1: &Vector3<f64>, p2: &Vector3<f64>, a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
    let b_minus_a = b - a;
    let cp1 = b_minus_a.cross(&(p1 - a));
    let cp2 = b_minus_a.cross(&(p2 - a));
    let mut res = cp1.dot(&cp2);

    if res < 0.0 {
        // p1 may sit on the edge line with rounding noise pushing it across
        let edge = b_minus_a.try_normalize(0.0);
        let to_point = (p1 - a).try_normalize(0.0);
        if let (Some(edge), Some(to_point)) = (edge, to_point) {
            let cp = edge.cross(&to_point);
            if cp.iter().all(|c| c.abs() <= SAME_SIDE_EPSILON) {
                res = 0.0;
            }
        }
    }

    res >= 0.0
}
