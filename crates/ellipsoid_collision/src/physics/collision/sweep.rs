//! Swept unit sphere against triangle intersection
//!
//! Works entirely in ellipsoid space: the moving body is a unit sphere
//! at `base_point` travelling by `velocity` over one step, `t ∈ [0, 1]`.
//! A triangle is hit either on its face, at a vertex, or along an edge;
//! the face case is tested first because when it happens it is always
//! the earliest contact.

use crate::foundation::math::{self, Vec3};
use crate::spatial::SelectedTriangle;

use super::quadratic::lowest_root;
use super::Triangle;

/// Where and when a swept sphere first touches one triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepResult {
    /// Time of impact along the velocity, in `[0, 1]`
    pub t: f32,
    /// Contact point on the triangle, ellipsoid space
    pub point: Vec3,
}

/// Earliest contact between a moving unit sphere and a triangle
///
/// Back-facing and degenerate triangles are never hit.
pub fn sweep_unit_sphere(base_point: &Vec3, velocity: &Vec3, triangle: &Triangle) -> Option<SweepResult> {
    let plane = triangle.plane()?;

    // only check front facing polygons
    if !plane.is_front_facing(velocity) {
        return None;
    }

    let signed_dist = plane.distance_to_point(*base_point);
    let normal_dot_velocity = plane.normal.dot(velocity);

    // Interval of t during which the sphere straddles the plane
    let (t0, embedded_in_plane) = if math::is_zero(normal_dot_velocity) {
        // Travelling parallel to the plane
        if signed_dist.abs() >= 1.0 {
            return None;
        }
        // Already embedded: the whole step is admissible
        (0.0, true)
    } else {
        let inv = 1.0 / normal_dot_velocity;
        let mut t0 = (-1.0 - signed_dist) * inv;
        let mut t1 = (1.0 - signed_dist) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > 1.0 || t1 < 0.0 {
            return None;
        }
        (t0.clamp(0.0, 1.0), false)
    };

    // Face contact happens at t0, where the sphere first rests on the plane
    if !embedded_in_plane {
        let plane_intersection = (base_point - plane.normal) + velocity * t0;
        if triangle.is_point_inside(&plane_intersection) {
            return Some(SweepResult { t: t0, point: plane_intersection });
        }
    }

    sweep_vertices_and_edges(base_point, velocity, triangle)
}

/// Sweep against the three vertices and three edges, keeping the earliest hit
fn sweep_vertices_and_edges(base: &Vec3, velocity: &Vec3, triangle: &Triangle) -> Option<SweepResult> {
    let velocity_sq = velocity.magnitude_squared();
    let mut best: Option<SweepResult> = None;
    let mut t = 1.0_f32;

    // Vertices: |base + velocity·t - p|² = 1
    for vertex in [triangle.a, triangle.b, triangle.c] {
        let b = 2.0 * velocity.dot(&(base - vertex));
        let c = (vertex - base).magnitude_squared() - 1.0;
        if let Some(new_t) = lowest_root(velocity_sq, b, c, t) {
            accept(&mut best, &mut t, new_t, vertex);
        }
    }

    // Edges: sphere against the infinite line, then clamp to the segment
    for (from, to) in [(triangle.a, triangle.b), (triangle.b, triangle.c), (triangle.c, triangle.a)] {
        let edge = to - from;
        let base_to_vertex = from - base;
        let edge_sq = edge.magnitude_squared();
        let edge_dot_velocity = edge.dot(velocity);
        let edge_dot_base_to_vertex = edge.dot(&base_to_vertex);

        let a = edge_sq * -velocity_sq + edge_dot_velocity * edge_dot_velocity;
        let b = edge_sq * (2.0 * velocity.dot(&base_to_vertex))
            - 2.0 * edge_dot_velocity * edge_dot_base_to_vertex;
        let c = edge_sq * (1.0 - base_to_vertex.magnitude_squared())
            + edge_dot_base_to_vertex * edge_dot_base_to_vertex;

        if let Some(new_t) = lowest_root(a, b, c, t) {
            let f = (edge_dot_velocity * new_t - edge_dot_base_to_vertex) / edge_sq;
            if (0.0..=1.0).contains(&f) {
                accept(&mut best, &mut t, new_t, from + edge * f);
            }
        }
    }

    best
}

/// Record a vertex or edge hit; ties keep the feature found first
fn accept(best: &mut Option<SweepResult>, t: &mut f32, new_t: f32, point: Vec3) {
    if best.is_none() || new_t < *t {
        *t = new_t;
        *best = Some(SweepResult { t: new_t, point });
    }
}

/// Per-call collision state in ellipsoid space
///
/// Created fresh for every top-level collision call. While scanning the
/// candidate triangles of one step it keeps only the closest hit; a later
/// triangle at exactly the same distance does not replace it.
#[derive(Debug, Clone)]
pub struct CollisionContext {
    /// Per-axis ellipsoid radii
    pub radius: Vec3,
    /// Start of the current pass, world space
    pub world_position: Vec3,
    /// Displacement of the current pass, world space
    pub world_velocity: Vec3,
    /// Minimum approach distance kept from any surface
    pub sliding_epsilon: f32,

    /// Sphere centre for the current scan, ellipsoid space
    pub base_point: Vec3,
    /// Displacement for the current scan, ellipsoid space
    pub velocity: Vec3,

    /// Whether the current scan found a hit
    pub found_collision: bool,
    /// Distance to the closest hit of the current scan, ellipsoid space
    pub nearest_distance: f32,
    /// Contact point of the closest hit, ellipsoid space
    pub intersection_point: Vec3,
    /// Triangle of the closest hit, ellipsoid space
    pub hit_triangle: Triangle,
    /// Selector-global index of the closest hit triangle
    pub hit_index: Option<usize>,
    /// Improvements to the closest hit in the current pass
    pub hit_count: u32,
    /// Improvements to the closest hit over the whole call
    pub total_hits: u32,
}

impl CollisionContext {
    /// Create a context for one call
    pub fn new(radius: Vec3, world_position: Vec3, world_velocity: Vec3, sliding_epsilon: f32) -> Self {
        Self {
            radius,
            world_position,
            world_velocity,
            sliding_epsilon,
            base_point: Vec3::zeros(),
            velocity: Vec3::zeros(),
            found_collision: false,
            nearest_distance: f32::MAX,
            intersection_point: Vec3::zeros(),
            hit_triangle: Triangle::new(Vec3::zeros(), Vec3::zeros(), Vec3::zeros()),
            hit_index: None,
            hit_count: 0,
            total_hits: 0,
        }
    }

    /// Reset the per-scan state before testing a new candidate set
    pub fn begin_scan(&mut self, base_point: Vec3, velocity: Vec3) {
        self.base_point = base_point;
        self.velocity = velocity;
        self.found_collision = false;
        self.nearest_distance = f32::MAX;
    }

    /// Reset the per-pass hit counter, e.g. before the gravity pass
    pub fn begin_pass(&mut self, world_position: Vec3, world_velocity: Vec3) {
        self.world_position = world_position;
        self.world_velocity = world_velocity;
        self.hit_count = 0;
    }

    /// Sweep against one candidate and keep it if it is the closest so far
    ///
    /// Returns true when the candidate became the new closest hit.
    pub fn test_triangle(&mut self, selected: &SelectedTriangle) -> bool {
        let Some(hit) = sweep_unit_sphere(&self.base_point, &self.velocity, &selected.triangle) else {
            return false;
        };

        let distance = hit.t * self.velocity.magnitude();
        if self.found_collision && distance >= self.nearest_distance {
            return false;
        }

        self.nearest_distance = distance;
        self.intersection_point = hit.point;
        self.found_collision = true;
        self.hit_triangle = selected.triangle;
        self.hit_index = Some(selected.index);
        self.hit_count += 1;
        self.total_hits += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Large triangle in the y = 0 plane facing +Y
    fn floor() -> Triangle {
        Triangle::new(
            Vec3::new(-100.0, 0.0, -100.0),
            Vec3::new(-100.0, 0.0, 100.0),
            Vec3::new(100.0, 0.0, -100.0),
        )
    }

    fn selected(triangle: Triangle, index: usize) -> SelectedTriangle {
        SelectedTriangle { triangle, index }
    }

    #[test]
    fn test_face_hit_from_above() {
        let hit = sweep_unit_sphere(&Vec3::new(-10.0, 5.0, -10.0), &Vec3::new(0.0, -10.0, 0.0), &floor()).unwrap();

        // Touches when the centre is 1.0 above the plane: y = 1 at t = 0.4
        assert_relative_eq!(hit.t, 0.4, epsilon = 1e-6);
        assert_relative_eq!(hit.point, Vec3::new(-10.0, 0.0, -10.0), epsilon = 1e-5);
    }

    #[test]
    fn test_out_of_reach_is_missed() {
        assert!(sweep_unit_sphere(&Vec3::new(0.0, 5.0, 0.0), &Vec3::new(0.0, -3.0, 0.0), &floor()).is_none());
    }

    #[test]
    fn test_back_face_is_rejected() {
        // Coming from below, moving up through the plane
        let result = sweep_unit_sphere(&Vec3::new(-10.0, -5.0, -10.0), &Vec3::new(0.0, 10.0, 0.0), &floor());
        assert!(result.is_none());
    }

    #[test]
    fn test_parallel_outside_plane_is_missed() {
        let result = sweep_unit_sphere(&Vec3::new(-10.0, 1.5, -10.0), &Vec3::new(5.0, 0.0, 0.0), &floor());
        assert!(result.is_none());
    }

    #[test]
    fn test_vertex_hit() {
        // Small triangle; approach its corner a = (0, 0, 0) along -X from the side
        let tri = Triangle::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 1.0), Vec3::new(-1.0, 0.0, -1.0));
        let base = Vec3::new(3.0, 0.5, 0.0);
        let velocity = Vec3::new(-4.0, 0.0, 0.0);

        let hit = sweep_unit_sphere(&base, &velocity, &tri).unwrap();
        // Centre reaches distance 1 from the vertex when x = sqrt(0.75)
        let expected_t = (3.0 - 0.75_f32.sqrt()) / 4.0;
        assert_relative_eq!(hit.t, expected_t, epsilon = 1e-5);
        assert_relative_eq!(hit.point, Vec3::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn test_edge_hit() {
        // Edge from (0,0,-1) to (0,0,1); sphere slides towards it along -X just above the plane
        let tri = Triangle::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(-2.0, 0.0, 0.0));
        let base = Vec3::new(3.0, 0.5, 0.0);
        let velocity = Vec3::new(-4.0, 0.0, 0.0);

        let hit = sweep_unit_sphere(&base, &velocity, &tri).unwrap();
        let expected_t = (3.0 - 0.75_f32.sqrt()) / 4.0;
        assert_relative_eq!(hit.t, expected_t, epsilon = 1e-5);
        assert_relative_eq!(hit.point, Vec3::new(0.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_embedded_sphere_uses_whole_step() {
        // Moving parallel while already overlapping the plane, towards the edge x = 0
        let tri = Triangle::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 5.0), Vec3::new(5.0, 0.0, 0.0));
        let base = Vec3::new(-2.0, 0.5, 0.0);
        let velocity = Vec3::new(2.0, 0.0, 0.0);

        let hit = sweep_unit_sphere(&base, &velocity, &tri).unwrap();
        assert!(hit.t > 0.0 && hit.t <= 1.0);
        assert_relative_eq!(hit.point.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_velocity_never_hits() {
        assert!(sweep_unit_sphere(&Vec3::new(0.0, 0.5, 0.0), &Vec3::zeros(), &floor()).is_none());
    }

    #[test]
    fn test_context_keeps_closest_and_first_at_ties() {
        let mut context = CollisionContext::new(Vec3::new(1.0, 1.0, 1.0), Vec3::zeros(), Vec3::zeros(), 0.001);
        context.begin_scan(Vec3::new(-10.0, 5.0, -10.0), Vec3::new(0.0, -10.0, 0.0));

        let lower = Triangle::new(
            Vec3::new(-100.0, -2.0, -100.0),
            Vec3::new(-100.0, -2.0, 100.0),
            Vec3::new(100.0, -2.0, -100.0),
        );

        assert!(context.test_triangle(&selected(lower, 0)));
        assert_relative_eq!(context.nearest_distance, 6.0, epsilon = 1e-5);

        // Closer floor replaces it
        assert!(context.test_triangle(&selected(floor(), 1)));
        assert_relative_eq!(context.nearest_distance, 4.0, epsilon = 1e-5);
        assert_eq!(context.hit_index, Some(1));

        // Identical distance does not
        assert!(!context.test_triangle(&selected(floor(), 2)));
        assert_eq!(context.hit_index, Some(1));
        assert_eq!(context.hit_count, 2);
        assert_eq!(context.total_hits, 2);
    }
}
