//! Quadratic root solver for swept-sphere tests

/// Smallest root of `a·t² + b·t + c = 0` lying in `(0, max_r]`
///
/// Returns `None` when `a` is zero, the discriminant is negative, or
/// neither root is in range. The smaller root is preferred: it is the
/// earliest instant the swept sphere touches the feature.
pub fn lowest_root(a: f32, b: f32, c: f32, max_r: f32) -> Option<f32> {
    let determinant = b * b - 4.0 * a * c;

    if determinant < 0.0 || a == 0.0 {
        return None;
    }

    let sqrt_d = determinant.sqrt();
    let inv_2a = 1.0 / (2.0 * a);
    let mut r1 = (-b - sqrt_d) * inv_2a;
    let mut r2 = (-b + sqrt_d) * inv_2a;

    // a < 0 flips the order
    if r1 > r2 {
        std::mem::swap(&mut r1, &mut r2);
    }

    let in_range = |r: f32| r > 0.0 && r <= max_r;
    if in_range(r1) {
        Some(r1)
    } else if in_range(r2) {
        Some(r2)
    } else {
        None
    }
}
